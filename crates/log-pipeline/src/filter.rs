//! 레코드 필터
//!
//! 파싱된 레코드를 키워드와 우선순위로 걸러냅니다.
//! 두 조건이 모두 설정되면 둘 다 만족해야 통과합니다.

use serde::Serialize;

use fastlog_core::types::AlertRecord;

/// 레코드 필터
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordFilter {
    /// 사용자가 입력한 그대로의 키워드 (표시용)
    keyword: Option<String>,
    /// 비교용 소문자 키워드
    #[serde(skip)]
    needle: Option<String>,
    /// 정확히 일치해야 하는 우선순위
    priority: Option<u64>,
}

impl RecordFilter {
    /// 조건이 없는 필터를 생성합니다. 모든 레코드가 통과합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// description 키워드 조건을 설정합니다. 빈 문자열은 무시합니다.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        if keyword.is_empty() {
            self.keyword = None;
            self.needle = None;
        } else {
            self.needle = Some(keyword.to_lowercase());
            self.keyword = Some(keyword);
        }
        self
    }

    /// 우선순위 조건을 설정합니다.
    pub fn with_priority(mut self, priority: u64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// 설정된 키워드 (입력한 대소문자 그대로)
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// 설정된 우선순위
    pub fn priority(&self) -> Option<u64> {
        self.priority
    }

    /// 조건이 하나라도 설정되어 있는지 확인합니다.
    pub fn is_active(&self) -> bool {
        self.keyword.is_some() || self.priority.is_some()
    }

    /// 레코드가 모든 조건을 만족하는지 확인합니다.
    pub fn matches(&self, record: &AlertRecord) -> bool {
        if let Some(priority) = self.priority
            && record.priority != priority
        {
            return false;
        }
        match &self.needle {
            Some(needle) => record.description.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(description: &str, priority: u64) -> AlertRecord {
        AlertRecord {
            timestamp: "08/14/2024-10:22:01.123456".to_owned(),
            rule_id: "1:1:1".to_owned(),
            description: description.to_owned(),
            classification: "A Network Trojan was detected".to_owned(),
            priority,
            protocol: "TCP".to_owned(),
            src_ip: "10.0.0.1".to_owned(),
            src_port: 1,
            dst_ip: "10.0.0.2".to_owned(),
            dst_port: 2,
        }
    }

    #[test]
    fn empty_filter_passes_everything() {
        let filter = RecordFilter::new();
        assert!(!filter.is_active());
        assert!(filter.matches(&record("anything", 3)));
    }

    #[test]
    fn keyword_matches_description_case_insensitively() {
        let filter = RecordFilter::new().with_keyword("LOKI");
        assert!(filter.matches(&record("ET MALWARE LokiBot Checkin", 1)));
        assert!(!filter.matches(&record("ET POLICY curl", 1)));
    }

    #[test]
    fn keyword_keeps_original_case_for_display() {
        let filter = RecordFilter::new().with_keyword("LokiBot");
        assert_eq!(filter.keyword(), Some("LokiBot"));
        assert!(filter.matches(&record("et malware lokibot checkin", 1)));

        let value = serde_json::to_value(&filter).unwrap();
        assert_eq!(value["keyword"], "LokiBot");
        assert!(value.get("needle").is_none());
    }

    #[test]
    fn keyword_ignores_classification() {
        let filter = RecordFilter::new().with_keyword("trojan");
        assert!(!filter.matches(&record("ET POLICY curl", 1)));
    }

    #[test]
    fn empty_keyword_is_ignored() {
        let filter = RecordFilter::new().with_keyword("");
        assert!(!filter.is_active());
    }

    #[test]
    fn both_conditions_must_hold() {
        let filter = RecordFilter::new().with_keyword("loki").with_priority(1);
        assert!(filter.matches(&record("LokiBot", 1)));
        assert!(!filter.matches(&record("LokiBot", 2)));
        assert!(!filter.matches(&record("Emotet", 1)));
    }
}
