//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 파서가 생성하는 [`AlertRecord`]와 표시 계층에서 사용하는
//! 등급([`PriorityTier`], [`ClassificationTier`])을 정의합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// 내보내기 시 사용되는 필드 순서
///
/// CSV 헤더와 JSON 객체 키가 이 순서를 따릅니다.
pub const RECORD_FIELDS: [&str; 10] = [
    "timestamp",
    "rule_id",
    "description",
    "classification",
    "priority",
    "protocol",
    "src_ip",
    "src_port",
    "dst_ip",
    "dst_port",
];

/// 경보 레코드
///
/// fast.log 한 줄에서 10개 필드를 모두 추출했을 때만 생성됩니다.
/// 일부 필드만 추출된 레코드는 존재하지 않습니다.
///
/// 필드 선언 순서가 곧 직렬화 순서이므로 [`RECORD_FIELDS`]와 일치해야 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertRecord {
    /// 원본 타임스탬프 텍스트 (`MM/DD/YYYY-HH:MM:SS.ffffff`)
    pub timestamp: String,
    /// 룰 ID 텍스트 (`gid:sid:rev`)
    pub rule_id: String,
    /// 룰 설명
    pub description: String,
    /// 분류 라벨
    pub classification: String,
    /// 우선순위 (1이 가장 심각, 범위 검증 없음)
    pub priority: u64,
    /// 프로토콜 토큰 (TCP, UDP, ICMP 등)
    pub protocol: String,
    /// 출발지 IPv4 (텍스트, 옥텟 범위 검증 없음)
    pub src_ip: String,
    /// 출발지 포트
    pub src_port: u64,
    /// 목적지 IPv4
    pub dst_ip: String,
    /// 목적지 포트
    pub dst_port: u64,
}

impl AlertRecord {
    /// 우선순위 등급
    pub fn priority_tier(&self) -> PriorityTier {
        PriorityTier::from_priority(self.priority)
    }

    /// 분류 키워드 등급
    pub fn classification_tier(&self) -> ClassificationTier {
        ClassificationTier::from_classification(&self.classification)
    }

    /// 룰 ID를 구성 요소로 분해합니다.
    pub fn parsed_rule_id(&self) -> Result<RuleId, ParseError> {
        self.rule_id.parse()
    }

    /// 우선순위 1(치명적) 레코드 여부
    pub fn is_critical(&self) -> bool {
        self.priority_tier() == PriorityTier::Critical
    }
}

impl fmt::Display for AlertRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {} {{{}}} {}:{} -> {}:{}",
            self.priority,
            self.rule_id,
            self.description,
            self.protocol,
            self.src_ip,
            self.src_port,
            self.dst_ip,
            self.dst_port,
        )
    }
}

/// 룰 식별자 (`gid:sid:rev`)
///
/// generator ID, signature ID, revision으로 구성됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId {
    /// generator ID
    pub gid: u32,
    /// signature ID
    pub sid: u32,
    /// revision
    pub rev: u32,
}

impl FromStr for RuleId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let mut next = |field: &'static str| -> Result<u32, ParseError> {
            let part = parts.next().unwrap_or_default();
            part.parse().map_err(|_| ParseError::Coercion {
                field,
                value: part.to_owned(),
            })
        };

        let rule_id = Self {
            gid: next("gid")?,
            sid: next("sid")?,
            rev: next("rev")?,
        };

        if parts.next().is_some() {
            return Err(ParseError::Coercion {
                field: "rule_id",
                value: s.to_owned(),
            });
        }

        Ok(rule_id)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.gid, self.sid, self.rev)
    }
}

/// 우선순위 등급
///
/// 1 → Critical, 2 → High, 3 → Informational, 그 외 → Neutral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    /// 치명적 (priority 1)
    Critical,
    /// 높음 (priority 2)
    High,
    /// 정보성 (priority 3)
    Informational,
    /// 그 외 모든 값
    Neutral,
}

impl PriorityTier {
    /// 우선순위 값을 등급으로 변환합니다.
    pub fn from_priority(priority: u64) -> Self {
        match priority {
            1 => Self::Critical,
            2 => Self::High,
            3 => Self::Informational,
            _ => Self::Neutral,
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::High => write!(f, "High"),
            Self::Informational => write!(f, "Informational"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// 분류 키워드 등급
///
/// 분류 텍스트를 소문자로 변환한 뒤 아래 순서로 부분 문자열을 검사합니다.
/// - `trojan`, `malware`, `command and control` → Malware
/// - `exploit` → High
/// - `attack` → Elevated
/// - `scan` → Scan
/// - 해당 없음 → Neutral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationTier {
    /// 트로이목마, 악성코드, C&C
    Malware,
    /// 익스플로잇
    High,
    /// 공격 시도
    Elevated,
    /// 스캔
    Scan,
    /// 해당 없음
    Neutral,
}

impl ClassificationTier {
    const MALWARE_KEYWORDS: [&'static str; 3] = ["trojan", "malware", "command and control"];

    /// 분류 텍스트에서 등급을 결정합니다 (대소문자 무시).
    pub fn from_classification(classification: &str) -> Self {
        let lower = classification.to_lowercase();

        if Self::MALWARE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            Self::Malware
        } else if lower.contains("exploit") {
            Self::High
        } else if lower.contains("attack") {
            Self::Elevated
        } else if lower.contains("scan") {
            Self::Scan
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for ClassificationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malware => write!(f, "Malware"),
            Self::High => write!(f, "High"),
            Self::Elevated => write!(f, "Elevated"),
            Self::Scan => write!(f, "Scan"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}
