#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`parser`]: 표준/완화 문법 파서 및 순차 시도 라우터
//! - [`classify`]: description/classification 위협 키워드 판정
//! - [`filter`]: 키워드/우선순위 레코드 필터
//! - [`ingest`]: 입력 읽기, 디코딩, 라인 수집 루프
//! - [`stats`]: 우선순위/프로토콜/IP별 통계, 악성코드 계열 요약
//! - [`export`]: CSV/JSON 내보내기
//! - [`error`]: 도메인 에러 타입

pub mod classify;
pub mod error;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod parser;
pub mod stats;

// --- 주요 타입 re-export ---

// 에러
pub use error::PipelineError;

// 파서
pub use parser::{AlertParser, ParsedLine, RelaxedAlertParser, StrictAlertParser};

// 수집
pub use filter::RecordFilter;
pub use ingest::{IngestOutcome, IngestReport, Ingestor, InputEncoding, read_input};

// 집계 / 내보내기
pub use classify::{ThreatFlag, threat_flag};
pub use export::{ExportFormat, ExportSummary, export_records};
pub use stats::{AlertStats, FamilySighting, IpCount};
