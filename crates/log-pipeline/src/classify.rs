//! 위협 키워드 분류
//!
//! 통계와 상세 출력에서 사용하는 키워드 기반 판정을 제공합니다.
//! 모든 비교는 소문자로 변환한 뒤 부분 문자열 매칭으로 수행합니다.

use serde::Serialize;

use fastlog_core::types::AlertRecord;

/// description에서 찾는 위협 키워드
pub const DESCRIPTION_THREAT_KEYWORDS: &[&str] = &[
    "loki",
    "trojan",
    "malware",
    "keylogger",
    "exfiltration",
    "c&c",
    "command",
    "control",
];

/// 위협 이벤트로 집계할 classification 키워드
pub const THREAT_CLASSIFICATION_KEYWORDS: &[&str] = &[
    "trojan",
    "malware",
    "exploit",
    "attack",
    "virus",
    "worm",
    "ransomware",
];

/// description 키워드 경고 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatFlag {
    /// 위협 키워드 + 우선순위 1
    CriticalThreat,
    /// 위협 키워드 (우선순위 1 아님)
    Malicious,
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// description에 위협 키워드가 포함되어 있는지 확인합니다.
pub fn is_threat_description(description: &str) -> bool {
    contains_any(description, DESCRIPTION_THREAT_KEYWORDS)
}

/// classification이 위협 이벤트에 해당하는지 확인합니다.
pub fn is_threat_classification(classification: &str) -> bool {
    contains_any(classification, THREAT_CLASSIFICATION_KEYWORDS)
}

/// 레코드의 description 키워드 경고 수준을 판정합니다.
pub fn threat_flag(record: &AlertRecord) -> Option<ThreatFlag> {
    if !is_threat_description(&record.description) {
        return None;
    }
    if record.is_critical() {
        Some(ThreatFlag::CriticalThreat)
    } else {
        Some(ThreatFlag::Malicious)
    }
}
