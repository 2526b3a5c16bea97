//! 입력 읽기와 라인 수집
//!
//! 로그 파일을 읽어 디코딩하고, 각 라인을 파싱/필터링하여 [`IngestReport`]를 만듭니다.
//!
//! # 라인 처리 순서
//! 1. `\n`, `\r\n`, 단독 `\r` 모두 줄바꿈으로 취급하며 라인 번호는 1부터 시작합니다.
//! 2. 앞뒤 공백을 제거하고 빈 줄은 건너뜁니다.
//! 3. `max_line_length` 바이트를 넘는 줄은 파싱 실패로 집계합니다.
//! 4. 파싱 실패 줄은 debug 로그(앞 100자)만 남기고 계속 진행합니다.
//! 5. 필터에 걸러진 줄은 별도로 집계합니다.
//! 6. `limit`에 도달하면 즉시 중단합니다.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use fastlog_core::types::AlertRecord;

use crate::error::PipelineError;
use crate::filter::RecordFilter;
use crate::parser::AlertParser;

/// 파싱 실패 로그에 남길 라인 미리보기 길이 (문자 수)
const PREVIEW_CHARS: usize = 100;

/// 기본 최대 라인 길이 (바이트)
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// 입력 텍스트 인코딩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEncoding {
    /// 엄격한 UTF-8 (잘못된 바이트 시 에러)
    #[default]
    Utf8,
    /// UTF-8, 잘못된 바이트는 U+FFFD로 대체
    Utf8Lossy,
    /// ISO-8859-1, 바이트를 그대로 코드 포인트로 매핑
    Latin1,
}

impl InputEncoding {
    /// 인코딩 표준 이름
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Lossy => "utf-8-lossy",
            Self::Latin1 => "latin-1",
        }
    }

    /// 바이트를 문자열로 디코딩합니다.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, PipelineError> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|e| PipelineError::Decode {
                encoding: self.as_str().to_owned(),
                offset: e.utf8_error().valid_up_to(),
            }),
            Self::Utf8Lossy => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl FromStr for InputEncoding {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-8-lossy" | "utf8-lossy" => Ok(Self::Utf8Lossy),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(PipelineError::UnsupportedEncoding(s.to_owned())),
        }
    }
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 입력 파일 전체를 읽어 디코딩합니다.
///
/// 파일 없음/권한 부족은 각각 전용 에러로 변환됩니다.
pub async fn read_input(path: &Path, encoding: InputEncoding) -> Result<String, PipelineError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PipelineError::from_io(e, path))?;
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        encoding = %encoding,
        "read input file"
    );
    encoding.decode(bytes)
}

/// 수집 결과 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "critical")]
pub enum IngestOutcome {
    /// 레코드 없음 (빈 파일, 전부 파싱 실패, 전부 필터링)
    Empty,
    /// 우선순위 1 레코드 존재
    Critical(usize),
    /// 레코드가 있고 우선순위 1 레코드는 없음
    Clean,
}

/// 수집 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// 파싱되고 필터를 통과한 레코드 (입력 순서 유지)
    pub records: Vec<AlertRecord>,
    /// 검사한 라인 수 (limit으로 중단되면 그 지점까지)
    pub total_lines: usize,
    /// 빈 줄 수
    pub blank_lines: usize,
    /// 파싱 실패 줄 수
    pub unparsed_lines: usize,
    /// 파싱은 되었으나 필터에 걸러진 줄 수
    pub filtered_out: usize,
    /// limit 도달로 조기 중단했는지 여부
    pub limit_reached: bool,
}

impl IngestReport {
    /// 우선순위 1 레코드 수
    pub fn critical_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_critical()).count()
    }

    /// 결과 분류를 계산합니다.
    pub fn outcome(&self) -> IngestOutcome {
        if self.records.is_empty() {
            return IngestOutcome::Empty;
        }
        match self.critical_count() {
            0 => IngestOutcome::Clean,
            n => IngestOutcome::Critical(n),
        }
    }
}

/// 라인 수집기
///
/// 파서, 필터, 제한값을 묶어 입력 텍스트 전체를 처리합니다.
pub struct Ingestor {
    parser: AlertParser,
    filter: RecordFilter,
    /// 0이면 제한 없음
    limit: usize,
    max_line_length: usize,
}

impl Ingestor {
    /// 주어진 파서로 수집기를 생성합니다.
    pub fn new(parser: AlertParser) -> Self {
        Self {
            parser,
            filter: RecordFilter::new(),
            limit: 0,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }

    /// 기본 파서 세트로 수집기를 생성합니다.
    pub fn with_default_parser() -> Result<Self, PipelineError> {
        Ok(Self::new(AlertParser::with_defaults()?))
    }

    /// 필터를 설정합니다.
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// 수집할 최대 레코드 수를 설정합니다. 0이면 제한 없음.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// 최대 라인 길이(바이트)를 설정합니다.
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// 현재 필터
    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// 디코딩된 텍스트 전체를 처리합니다.
    pub fn ingest(&self, text: &str) -> IngestReport {
        let mut report = IngestReport::default();
        let text = normalize_newlines(text);

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            report.total_lines += 1;

            let line = raw.trim();
            if line.is_empty() {
                report.blank_lines += 1;
                continue;
            }

            if line.len() > self.max_line_length {
                report.unparsed_lines += 1;
                tracing::debug!(
                    line = line_no,
                    length = line.len(),
                    max = self.max_line_length,
                    "line exceeds maximum length"
                );
                continue;
            }

            let parsed = match self.parser.parse_detailed(line) {
                Ok(parsed) => parsed,
                Err(reason) => {
                    report.unparsed_lines += 1;
                    tracing::debug!(
                        line = line_no,
                        %reason,
                        preview = %preview(line),
                        "could not parse line"
                    );
                    continue;
                }
            };

            if parsed.format != "fast" {
                tracing::trace!(line = line_no, format = parsed.format, "matched fallback grammar");
            }

            if !self.filter.matches(&parsed.record) {
                report.filtered_out += 1;
                continue;
            }

            report.records.push(parsed.record);

            if self.limit > 0 && report.records.len() >= self.limit {
                report.limit_reached = true;
                tracing::info!(limit = self.limit, line = line_no, "record limit reached");
                break;
            }
        }

        tracing::debug!(
            total = report.total_lines,
            parsed = report.records.len(),
            unparsed = report.unparsed_lines,
            filtered = report.filtered_out,
            "ingestion finished"
        );

        report
    }

    /// 파일을 읽어 처리합니다.
    pub async fn ingest_file(
        &self,
        path: &Path,
        encoding: InputEncoding,
    ) -> Result<IngestReport, PipelineError> {
        let text = read_input(path, encoding).await?;
        Ok(self.ingest(&text))
    }
}

/// 단독 `\r`와 `\r\n`을 `\n`으로 바꿉니다. `\r`이 없으면 복사하지 않습니다.
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn preview(line: &str) -> String {
    line.chars().take(PREVIEW_CHARS).collect()
}
