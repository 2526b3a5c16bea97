//! 에러 타입 — 도메인별 에러 정의

/// fastlog 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum FastlogError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파싱 에러
///
/// 한 줄의 파싱 실패는 사용자에게 치명적이지 않습니다.
/// 이 타입은 진단(로그, 퍼징, 라우터의 `parse_with`) 경로에서만 사용됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 지원하지 않는 형식
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// 어떤 문법에도 매칭되지 않음
    #[error("line did not match any alert grammar")]
    NoMatch,

    /// 문법은 매칭되었지만 숫자 필드 변환 실패
    #[error("field '{field}' is not a valid integer: '{value}'")]
    Coercion { field: &'static str, value: String },
}
