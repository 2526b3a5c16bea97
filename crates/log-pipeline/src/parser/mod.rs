//! 경보 라인 파싱 모듈 -- 표준/완화 문법별 파서
//!
//! [`AlertParser`]는 등록된 문법을 순서대로 시도하여 첫 번째로 성공한 결과를 사용합니다.
//! 각 파서는 core의 [`LineParser`](fastlog_core::pipeline::LineParser) trait을 구현합니다.
//!
//! # 지원 문법
//! - 표준 fast.log ([`StrictAlertParser`])
//! - 추가 메타데이터가 끼어 있는 변형 ([`RelaxedAlertParser`])
//!
//! # 사용 예시
//! ```ignore
//! use fastlog_pipeline::parser::AlertParser;
//! use fastlog_core::pipeline::LineParser;
//!
//! let parser = AlertParser::with_defaults()?;
//! if let Some(record) = parser.parse_line(line) {
//!     println!("{record}");
//! }
//! ```

mod fields;
pub mod relaxed;
pub mod strict;

pub use relaxed::RelaxedAlertParser;
pub use strict::StrictAlertParser;

use fastlog_core::error::ParseError;
use fastlog_core::pipeline::LineParser;
use fastlog_core::types::AlertRecord;

use crate::error::PipelineError;

/// 파싱 결과와 매칭된 문법 이름
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// 파싱된 레코드
    pub record: AlertRecord,
    /// 매칭에 성공한 파서의 `format_name`
    pub format: &'a str,
}

/// 경보 파서 라우터 -- 등록된 문법을 순서대로 시도합니다.
///
/// 모든 파서가 실패하면 가장 구체적인 실패 사유를 반환합니다.
/// 숫자 변환 실패(`Coercion`)가 단순 불일치(`NoMatch`)보다 우선합니다.
pub struct AlertParser {
    /// 등록된 파서 목록 (순서대로 시도)
    parsers: Vec<Box<dyn LineParser>>,
}

impl AlertParser {
    /// 파서가 등록되지 않은 빈 라우터를 생성합니다.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// 기본 파서 세트 (표준 -> 완화 순서)로 라우터를 생성합니다.
    pub fn with_defaults() -> Result<Self, PipelineError> {
        Ok(Self::new()
            .register(Box::new(StrictAlertParser::new()?))
            .register(Box::new(RelaxedAlertParser::new()?)))
    }

    /// 파서를 등록합니다. 등록 순서대로 시도됩니다.
    pub fn register(mut self, parser: Box<dyn LineParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    /// 한 줄을 파싱하고 어느 문법이 매칭되었는지 함께 반환합니다.
    pub fn parse_detailed(&self, line: &str) -> Result<ParsedLine<'_>, ParseError> {
        let mut failure = ParseError::NoMatch;

        for parser in &self.parsers {
            match parser.try_parse_line(line) {
                Ok(record) => {
                    return Ok(ParsedLine {
                        record,
                        format: parser.format_name(),
                    });
                }
                Err(e @ ParseError::Coercion { .. }) => failure = e,
                Err(_) => {}
            }
        }

        Err(failure)
    }

    /// 특정 형식 이름의 파서로 직접 파싱합니다.
    pub fn parse_with(&self, format_name: &str, line: &str) -> Result<AlertRecord, ParseError> {
        self.parsers
            .iter()
            .find(|p| p.format_name() == format_name)
            .ok_or_else(|| ParseError::UnsupportedFormat(format_name.to_owned()))?
            .try_parse_line(line)
    }

    /// 등록된 파서 형식 이름 목록을 반환합니다.
    pub fn registered_formats(&self) -> Vec<&str> {
        self.parsers.iter().map(|p| p.format_name()).collect()
    }
}

impl Default for AlertParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for AlertParser {
    fn format_name(&self) -> &str {
        "fast-any"
    }

    fn try_parse_line(&self, line: &str) -> Result<AlertRecord, ParseError> {
        self.parse_detailed(line).map(|parsed| parsed.record)
    }
}
