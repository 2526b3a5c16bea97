//! 설정 관리 — fastlog.toml 파싱 및 런타임 설정
//!
//! [`FastlogConfig`]는 모든 설정 섹션을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`FASTLOG_INPUT_ENCODING=latin-1` 형식)
//! 3. 설정 파일 (`fastlog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), fastlog_core::error::FastlogError> {
//! use fastlog_core::config::FastlogConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = FastlogConfig::load("fastlog.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = FastlogConfig::parse("[input]\npath = \"/var/log/suricata/fast.log\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, FastlogError};

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "fastlog.toml";

/// 지원하는 입력 인코딩 이름 (대소문자 무시)
pub const SUPPORTED_ENCODINGS: [&str; 7] = [
    "utf-8",
    "utf8",
    "utf-8-lossy",
    "utf8-lossy",
    "latin-1",
    "latin1",
    "iso-8859-1",
];

/// 지원하는 내보내기 형식 이름 (대소문자 무시)
pub const SUPPORTED_EXPORT_FORMATS: [&str; 2] = ["csv", "json"];

/// fastlog 통합 설정
///
/// `fastlog.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FastlogConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 입력 설정
    #[serde(default)]
    pub input: InputConfig,
    /// 내보내기 설정
    #[serde(default)]
    pub export: ExportConfig,
    /// 화면 출력 설정
    #[serde(default)]
    pub display: DisplayConfig,
}

impl FastlogConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FastlogError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 있으면 로드하고, 없으면 기본값에서 시작합니다.
    ///
    /// `explicit`가 `true`이면 (사용자가 경로를 직접 지정한 경우)
    /// 파일이 없을 때 `ConfigError::FileNotFound`를 반환합니다.
    pub async fn load_or_default(
        path: impl AsRef<Path>,
        explicit: bool,
    ) -> Result<Self, FastlogError> {
        let path = path.as_ref();
        let exists = tokio::fs::try_exists(path).await.unwrap_or(false);

        if exists || explicit {
            return Self::load(path).await;
        }

        debug!(path = %path.display(), "config file not found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드, 검증 없음).
    ///
    /// 검증은 오버라이드가 적용된 뒤 [`FastlogConfig::load`]에서 한 번 수행됩니다.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, FastlogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FastlogError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                FastlogError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, FastlogError> {
        toml::from_str(toml_str).map_err(|e| {
            FastlogError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `FASTLOG_{SECTION}_{FIELD}`
    /// 예: `FASTLOG_EXPORT_FORMAT=json`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "FASTLOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "FASTLOG_GENERAL_LOG_FORMAT");

        // Input
        override_string(&mut self.input.path, "FASTLOG_INPUT_PATH");
        override_string(&mut self.input.encoding, "FASTLOG_INPUT_ENCODING");
        override_usize(
            &mut self.input.max_line_length,
            "FASTLOG_INPUT_MAX_LINE_LENGTH",
        );

        // Export
        override_bool(&mut self.export.enabled, "FASTLOG_EXPORT_ENABLED");
        override_string(&mut self.export.path, "FASTLOG_EXPORT_PATH");
        override_string(&mut self.export.format, "FASTLOG_EXPORT_FORMAT");

        // Display
        override_bool(&mut self.display.color, "FASTLOG_DISPLAY_COLOR");
        override_usize(&mut self.display.page_size, "FASTLOG_DISPLAY_PAGE_SIZE");
        override_usize(&mut self.display.top_n, "FASTLOG_DISPLAY_TOP_N");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), FastlogError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        let encoding = self.input.encoding.to_lowercase();
        if !SUPPORTED_ENCODINGS.contains(&encoding.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "input.encoding".to_owned(),
                reason: format!("must be one of: {}", SUPPORTED_ENCODINGS.join(", ")),
            }
            .into());
        }

        if self.input.max_line_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "input.max_line_length".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        let export_format = self.export.format.to_lowercase();
        if !SUPPORTED_EXPORT_FORMATS.contains(&export_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "export.format".to_owned(),
                reason: format!("must be one of: {}", SUPPORTED_EXPORT_FORMATS.join(", ")),
            }
            .into());
        }

        if self.export.enabled && self.export.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.path".to_owned(),
                reason: "path must not be empty when export is enabled".to_owned(),
            }
            .into());
        }

        if self.display.top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "display.top_n".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 입력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// 입력 fast.log 경로
    pub path: String,
    /// 입력 인코딩 (utf-8, utf-8-lossy, latin-1)
    pub encoding: String,
    /// 최대 라인 길이 (바이트), 초과 라인은 파싱하지 않음
    pub max_line_length: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "fast.log".to_owned(),
            encoding: "utf-8".to_owned(),
            max_line_length: 64 * 1024, // 64KB
        }
    }
}

/// 내보내기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 내보내기 활성화 여부
    pub enabled: bool,
    /// 출력 파일 경로
    pub path: String,
    /// 출력 형식 (csv, json)
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "suricata_logs.csv".to_owned(),
            format: "csv".to_owned(),
        }
    }
}

/// 화면 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 컬러 출력 여부
    pub color: bool,
    /// 상세 출력에서 페이지당 레코드 수 (0이면 페이징 없음)
    pub page_size: usize,
    /// 상위 출발지/목적지 표에 표시할 항목 수
    pub top_n: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            page_size: 5,
            top_n: 5,
        }
    }
}

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = FastlogConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.input.path, "fast.log");
        assert_eq!(config.input.encoding, "utf-8");
        assert!(config.export.enabled);
        assert_eq!(config.export.path, "suricata_logs.csv");
        assert_eq!(config.export.format, "csv");
        assert!(config.display.color);
        assert_eq!(config.display.page_size, 5);
        assert_eq!(config.display.top_n, 5);
    }

    #[test]
    fn default_config_passes_validation() {
        let config = FastlogConfig::default();
        config.validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = FastlogConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.input.max_line_length, 65536);
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[input]
path = "/var/log/suricata/fast.log"

[export]
format = "json"
"#;
        let config = FastlogConfig::parse(toml).unwrap();
        assert_eq!(config.input.path, "/var/log/suricata/fast.log");
        // encoding은 기본값 유지
        assert_eq!(config.input.encoding, "utf-8");
        assert_eq!(config.export.format, "json");
        assert!(config.export.enabled);
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let result = FastlogConfig::parse("invalid = [[[toml");
        assert!(matches!(
            result.unwrap_err(),
            FastlogError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = FastlogConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = FastlogConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_unknown_encoding() {
        let mut config = FastlogConfig::default();
        config.input.encoding = "ebcdic".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("input.encoding"));
    }

    #[test]
    fn validate_accepts_encoding_in_any_case() {
        let mut config = FastlogConfig::default();
        config.input.encoding = "ISO-8859-1".to_owned();
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_unknown_export_format() {
        let mut config = FastlogConfig::default();
        config.export.format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("export.format"));
    }

    #[test]
    fn validate_rejects_empty_export_path_when_enabled() {
        let mut config = FastlogConfig::default();
        config.export.path = "  ".to_owned();
        assert!(config.validate().is_err());

        config.export.enabled = false;
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut config = FastlogConfig::default();
        config.input.max_line_length = 0;
        assert!(config.validate().is_err());

        let mut config = FastlogConfig::default();
        config.display.top_n = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_FASTLOG_STR", "overridden") };
        override_string(&mut val, "TEST_FASTLOG_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_FASTLOG_STR") };
    }

    #[test]
    #[serial]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = true;
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_FASTLOG_BOOL_BAD", "not-a-bool") };
        override_bool(&mut val, "TEST_FASTLOG_BOOL_BAD");
        assert!(val); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_FASTLOG_BOOL_BAD") };
    }

    #[test]
    #[serial]
    fn env_override_usize_valid() {
        let mut val = 5;
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_FASTLOG_USIZE", "12") };
        override_usize(&mut val, "TEST_FASTLOG_USIZE");
        assert_eq!(val, 12);
        unsafe { std::env::remove_var("TEST_FASTLOG_USIZE") };
    }

    #[test]
    #[serial]
    fn apply_env_overrides_reads_section_keys() {
        let mut config = FastlogConfig::default();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("FASTLOG_EXPORT_FORMAT", "json") };
        unsafe { std::env::set_var("FASTLOG_DISPLAY_COLOR", "false") };
        config.apply_env_overrides();
        unsafe { std::env::remove_var("FASTLOG_EXPORT_FORMAT") };
        unsafe { std::env::remove_var("FASTLOG_DISPLAY_COLOR") };

        assert_eq!(config.export.format, "json");
        assert!(!config.display.color);
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = FastlogConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = FastlogConfig::parse(&toml_str).unwrap();
        assert_eq!(config.input.path, parsed.input.path);
        assert_eq!(config.export.format, parsed.export.format);
        assert_eq!(config.display.page_size, parsed.display.page_size);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let result = FastlogConfig::from_file("/nonexistent/fastlog.toml").await;
        assert!(matches!(
            result.unwrap_err(),
            FastlogError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn load_or_default_falls_back_when_implicit() {
        let config = FastlogConfig::load_or_default("/nonexistent/fastlog.toml", false)
            .await
            .unwrap();
        assert_eq!(config.input.path, "fast.log");
    }

    #[tokio::test]
    async fn load_or_default_errors_when_explicit() {
        let result = FastlogConfig::load_or_default("/nonexistent/fastlog.toml", true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[serial]
    async fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fastlog.toml");
        tokio::fs::write(&path, "[display]\npage_size = 0\n")
            .await
            .unwrap();

        let config = FastlogConfig::load(&path).await.unwrap();
        assert_eq!(config.display.page_size, 0);
    }

    #[tokio::test]
    #[serial]
    async fn env_override_applies_before_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fastlog.toml");
        tokio::fs::write(&path, "[input]\nencoding = \"ebcdic\"\n")
            .await
            .unwrap();

        assert!(FastlogConfig::load(&path).await.is_err());

        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("FASTLOG_INPUT_ENCODING", "latin-1") };
        let result = FastlogConfig::load(&path).await;
        unsafe { std::env::remove_var("FASTLOG_INPUT_ENCODING") };

        assert_eq!(result.unwrap().input.encoding, "latin-1");
    }

    #[tokio::test]
    async fn from_file_does_not_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fastlog.toml");
        tokio::fs::write(&path, "[display]\ntop_n = 0\n").await.unwrap();

        let config = FastlogConfig::from_file(&path).await.unwrap();
        assert_eq!(config.display.top_n, 0);
        assert!(config.validate().is_err());
    }
}
