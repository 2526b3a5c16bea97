//! 완화된 fast.log 경보 라인 파서
//!
//! 센서 이름 등 추가 메타데이터가 타임스탬프와 규칙 ID 사이에 끼어 있는
//! 변형 라인을 위한 대체 문법입니다. 표준 문법이 실패한 경우에만 사용합니다.

use regex::Regex;

use fastlog_core::error::ParseError;
use fastlog_core::pipeline::LineParser;
use fastlog_core::types::AlertRecord;

use super::fields::record_from_captures;
use crate::error::PipelineError;

/// 대체 문법 정규식
///
/// 표준 문법과의 차이:
/// - 타임스탬프와 `[gid:sid:rev]` 사이에 임의의 텍스트를 허용합니다.
/// - description 뒤의 `[**]` 마커는 생략될 수 있습니다.
/// - IPv4는 숫자와 점으로만 구성된 문자열로 완화합니다.
pub(crate) const RELAXED_PATTERN: &str = r"(?x)
    (?P<timestamp>[0-9]{2}/[0-9]{2}/[0-9]{4}-[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]+)
    .*?
    \[(?P<rule_id>[0-9]+:[0-9]+:[0-9]+)\]\s+
    (?P<description>.*?)\s+
    (?:\[\*\*\]\s+)?
    \[Classification:\s*(?P<classification>.*?)\]\s+
    \[Priority:\s*(?P<priority>[0-9]+)\]\s+
    \{(?P<protocol>\w+)\}\s+
    (?P<src_ip>[0-9.]+):(?P<src_port>[0-9]+)
    \s+->\s+
    (?P<dst_ip>[0-9.]+):(?P<dst_port>[0-9]+)
";

/// 완화된 fast.log 경보 라인 파서
pub struct RelaxedAlertParser {
    pattern: Regex,
}

impl RelaxedAlertParser {
    /// 정규식을 컴파일하여 새 파서를 생성합니다.
    pub fn new() -> Result<Self, PipelineError> {
        Ok(Self {
            pattern: Regex::new(RELAXED_PATTERN)?,
        })
    }
}

impl LineParser for RelaxedAlertParser {
    fn format_name(&self) -> &str {
        "fast-relaxed"
    }

    fn try_parse_line(&self, line: &str) -> Result<AlertRecord, ParseError> {
        let caps = self.pattern.captures(line).ok_or(ParseError::NoMatch)?;
        record_from_captures(&caps)
    }
}
