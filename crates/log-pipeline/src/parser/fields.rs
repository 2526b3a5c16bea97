//! 캡처 그룹 → [`AlertRecord`] 변환
//!
//! strict/relaxed 문법은 같은 이름의 캡처 그룹을 사용하므로
//! 필드 추출과 숫자 변환을 이 모듈에서 공유합니다.

use regex::Captures;

use fastlog_core::error::ParseError;
use fastlog_core::types::{AlertRecord, RuleId};

/// 캡처 그룹에서 레코드를 생성합니다.
///
/// 10개 필드가 모두 존재하고 숫자 필드가 모두 변환될 때만 레코드를 반환합니다.
pub(crate) fn record_from_captures(caps: &Captures<'_>) -> Result<AlertRecord, ParseError> {
    let rule_id = text(caps, "rule_id")?;
    // gid:sid:rev 각 구성 요소도 정수 변환이 가능해야 함
    rule_id.parse::<RuleId>()?;

    Ok(AlertRecord {
        timestamp: text(caps, "timestamp")?.to_owned(),
        rule_id: rule_id.to_owned(),
        description: text(caps, "description")?.to_owned(),
        classification: text(caps, "classification")?.to_owned(),
        priority: integer(caps, "priority")?,
        protocol: text(caps, "protocol")?.to_owned(),
        src_ip: text(caps, "src_ip")?.to_owned(),
        src_port: integer(caps, "src_port")?,
        dst_ip: text(caps, "dst_ip")?.to_owned(),
        dst_port: integer(caps, "dst_port")?,
    })
}

fn text<'h>(caps: &Captures<'h>, name: &'static str) -> Result<&'h str, ParseError> {
    caps.name(name)
        .map(|m| m.as_str())
        .ok_or(ParseError::NoMatch)
}

fn integer(caps: &Captures<'_>, name: &'static str) -> Result<u64, ParseError> {
    let value = text(caps, name)?;
    value.parse().map_err(|_| ParseError::Coercion {
        field: name,
        value: value.to_owned(),
    })
}
