//! 표준 fast.log 경보 라인 파서
//!
//! Suricata/Snort가 기록하는 표준 한 줄 경보 형식을 파싱합니다.
//!
//! # 라인 형식
//! ```text
//! MM/DD/YYYY-HH:MM:SS.ffffff  [**] [gid:sid:rev] description [**] [Classification: c] [Priority: n] {PROTO} a.b.c.d:p -> e.f.g.h:q
//! ```
//!
//! # 사용 예시
//! ```ignore
//! use fastlog_pipeline::parser::StrictAlertParser;
//! use fastlog_core::pipeline::LineParser;
//!
//! let parser = StrictAlertParser::new()?;
//! let record = parser.parse_line(line).expect("standard line");
//! assert_eq!(record.rule_id, "1:2024897:3");
//! ```

use regex::Regex;

use fastlog_core::error::ParseError;
use fastlog_core::pipeline::LineParser;
use fastlog_core::types::AlertRecord;

use super::fields::record_from_captures;
use crate::error::PipelineError;

/// 표준 문법 정규식
///
/// - 타임스탬프 바로 뒤에 `[**]` 마커가 와야 합니다.
/// - description과 classification은 최소 매칭이므로 내부의 `[...]`를 허용합니다.
/// - IPv4는 점으로 구분된 1~3자리 숫자 4개로 제한합니다.
/// - 줄 앞뒤의 추가 텍스트는 허용합니다 (앵커 없음).
pub(crate) const STRICT_PATTERN: &str = r"(?x)
    (?P<timestamp>[0-9]{2}/[0-9]{2}/[0-9]{4}-[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]+)
    \s+\[\*\*\]\s+
    \[(?P<rule_id>[0-9]+:[0-9]+:[0-9]+)\]\s+
    (?P<description>.*?)\s+
    \[\*\*\]\s+
    \[Classification:\s*(?P<classification>.*?)\]\s+
    \[Priority:\s*(?P<priority>[0-9]+)\]\s+
    \{(?P<protocol>\w+)\}\s+
    (?P<src_ip>[0-9]{1,3}(?:\.[0-9]{1,3}){3}):(?P<src_port>[0-9]+)
    \s+->\s+
    (?P<dst_ip>[0-9]{1,3}(?:\.[0-9]{1,3}){3}):(?P<dst_port>[0-9]+)
";

/// 표준 fast.log 경보 라인 파서
///
/// core의 [`LineParser`] trait을 구현합니다.
pub struct StrictAlertParser {
    pattern: Regex,
}

impl StrictAlertParser {
    /// 정규식을 컴파일하여 새 파서를 생성합니다.
    pub fn new() -> Result<Self, PipelineError> {
        Ok(Self {
            pattern: Regex::new(STRICT_PATTERN)?,
        })
    }
}

impl LineParser for StrictAlertParser {
    fn format_name(&self) -> &str {
        "fast"
    }

    fn try_parse_line(&self, line: &str) -> Result<AlertRecord, ParseError> {
        let caps = self.pattern.captures(line).ok_or(ParseError::NoMatch)?;
        record_from_captures(&caps)
    }
}
