//! 파이프라인 에러 타입
//!
//! [`PipelineError`]는 입력 읽기, 디코딩, 내보내기 등 실행 전체를 중단시키는
//! 에러를 표현합니다. 한 줄의 파싱 실패는 에러가 아니며 여기에 포함되지 않습니다.
//! CLI는 이 에러를 종료 코드가 정해진 자체 에러 타입으로 직접 변환합니다.

/// 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// 입력 파일 없음
    #[error("input file not found: {path}")]
    InputNotFound {
        /// 입력 파일 경로
        path: String,
    },

    /// 권한 부족 (읽기 또는 쓰기)
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// 대상 파일 경로
        path: String,
    },

    /// 입력 디코딩 실패
    #[error("failed to decode input as {encoding} at byte offset {offset}")]
    Decode {
        /// 사용한 인코딩 이름
        encoding: String,
        /// 첫 번째 잘못된 바이트의 오프셋
        offset: usize,
    },

    /// 지원하지 않는 인코딩
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// 지원하지 않는 내보내기 형식
    #[error("unsupported export format: {0}")]
    UnsupportedExportFormat(String),

    /// 내보내기 실패
    #[error("export error: {path}: {reason}")]
    Export {
        /// 출력 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// CSV 직렬화 에러
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON 직렬화 에러
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// 파일 I/O 에러를 경로 정보가 있는 에러로 변환합니다.
    pub(crate) fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::InputNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io(err),
        }
    }
}
