//! 레코드 내보내기 (CSV / JSON)
//!
//! - CSV: 헤더 행은 항상 [`RECORD_FIELDS`] 순서 그대로 기록합니다.
//! - JSON: 2칸 들여쓰기 배열, 숫자 필드는 정수, 비 ASCII 문자는 그대로 유지합니다.
//!
//! 직렬화는 메모리 버퍼에서 끝낸 뒤 한 번에 파일로 기록하므로,
//! 직렬화 실패 시 부분 파일이 남지 않습니다.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use fastlog_core::types::{AlertRecord, RECORD_FIELDS};

use crate::error::PipelineError;

/// 내보내기 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// 표 형식 (헤더 + 레코드별 한 행)
    #[default]
    Csv,
    /// 객체 배열
    Json,
}

impl ExportFormat {
    /// 형식 이름
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(PipelineError::UnsupportedExportFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 내보내기 결과 요약
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// 출력 파일 경로
    pub path: String,
    /// 사용한 형식
    pub format: ExportFormat,
    /// 기록한 레코드 수
    pub records: usize,
    /// 기록한 바이트 수
    pub bytes: usize,
}

/// 레코드를 CSV로 기록합니다.
pub fn write_csv<W: Write>(records: &[AlertRecord], writer: W) -> Result<(), PipelineError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(RECORD_FIELDS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 레코드를 JSON 배열로 기록합니다.
pub fn write_json<W: Write>(records: &[AlertRecord], mut writer: W) -> Result<(), PipelineError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// 지정한 형식으로 직렬화한 바이트를 반환합니다.
pub fn render(records: &[AlertRecord], format: ExportFormat) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Csv => write_csv(records, &mut buf)?,
        ExportFormat::Json => write_json(records, &mut buf)?,
    }
    Ok(buf)
}

/// 레코드를 파일로 내보냅니다.
///
/// 기존 파일은 덮어씁니다.
pub async fn export_records(
    records: &[AlertRecord],
    path: &Path,
    format: ExportFormat,
) -> Result<ExportSummary, PipelineError> {
    let buf = render(records, format)?;
    tokio::fs::write(path, &buf)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => PipelineError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => PipelineError::Export {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

    tracing::info!(
        path = %path.display(),
        format = %format,
        records = records.len(),
        "exported records"
    );

    Ok(ExportSummary {
        path: path.display().to_string(),
        format,
        records: records.len(),
        bytes: buf.len(),
    })
}
