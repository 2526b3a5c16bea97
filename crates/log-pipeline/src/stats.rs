//! 경보 통계 집계

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use fastlog_core::types::AlertRecord;

use crate::classify::is_threat_classification;

/// 기본 상위 항목 수
pub const DEFAULT_TOP_N: usize = 5;

/// IP별 등장 횟수
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpCount {
    /// IP 주소 (텍스트 그대로)
    pub ip: String,
    /// 등장 횟수
    pub count: usize,
}

/// 레코드 집합에 대한 통계
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertStats {
    /// 전체 레코드 수
    pub total: usize,
    /// 우선순위별 레코드 수 (오름차순)
    pub by_priority: BTreeMap<u64, usize>,
    /// 프로토콜별 레코드 수 (알파벳순)
    pub by_protocol: BTreeMap<String, usize>,
    /// 출발지 IP 상위 목록
    pub top_sources: Vec<IpCount>,
    /// 목적지 IP 상위 목록
    pub top_destinations: Vec<IpCount>,
    /// 우선순위 1 레코드 수
    pub critical: usize,
    /// classification이 위협 키워드를 포함하는 레코드 수
    pub threat_events: usize,
}

impl AlertStats {
    /// 레코드 목록에서 통계를 계산합니다.
    pub fn from_records(records: &[AlertRecord], top_n: usize) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            *stats.by_priority.entry(record.priority).or_default() += 1;
            *stats.by_protocol.entry(record.protocol.clone()).or_default() += 1;
            if record.is_critical() {
                stats.critical += 1;
            }
            if is_threat_classification(&record.classification) {
                stats.threat_events += 1;
            }
        }

        stats.top_sources = top_counts(records.iter().map(|r| r.src_ip.as_str()), top_n);
        stats.top_destinations = top_counts(records.iter().map(|r| r.dst_ip.as_str()), top_n);
        stats
    }
}

/// 특정 악성코드 계열 이벤트 요약
///
/// description에 계열 이름이 포함된 첫 이벤트의 출발지와 C&C 서버(목적지),
/// 그리고 전체 이벤트 수를 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilySighting {
    /// 계열 이름 (소문자)
    pub family: String,
    /// 첫 이벤트의 출발지 IP
    pub src_ip: String,
    /// 첫 이벤트의 목적지 IP (C&C 서버)
    pub dst_ip: String,
    /// description에 계열 이름이 포함된 이벤트 수
    pub count: usize,
}

impl FamilySighting {
    /// description에 `family`가 포함된 레코드를 찾습니다 (대소문자 무시).
    ///
    /// 일치하는 레코드가 없으면 `None`을 반환합니다.
    pub fn find(records: &[AlertRecord], family: &str) -> Option<Self> {
        let family = family.to_lowercase();
        let mut hits = records
            .iter()
            .filter(|r| r.description.to_lowercase().contains(&family));

        let first = hits.next()?;
        let count = 1 + hits.count();
        Some(Self {
            family,
            src_ip: first.src_ip.clone(),
            dst_ip: first.dst_ip.clone(),
            count,
        })
    }
}

/// 횟수 내림차순, 동률이면 처음 등장한 순서로 상위 `n`개를 반환합니다.
fn top_counts<'a>(values: impl Iterator<Item = &'a str>, n: usize) -> Vec<IpCount> {
    // (첫 등장 순서, 횟수)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, value) in values.enumerate() {
        counts.entry(value).or_insert((order, 0)).1 += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|(_, (a_order, a_count)), (_, (b_order, b_count))| {
        b_count.cmp(a_count).then(a_order.cmp(b_order))
    });

    ranked
        .into_iter()
        .take(n)
        .map(|(ip, (_, count))| IpCount {
            ip: ip.to_owned(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(priority: u64, protocol: &str, src: &str, dst: &str, class: &str) -> AlertRecord {
        described("desc", priority, protocol, src, dst, class)
    }

    fn described(
        description: &str,
        priority: u64,
        protocol: &str,
        src: &str,
        dst: &str,
        class: &str,
    ) -> AlertRecord {
        AlertRecord {
            timestamp: "08/14/2024-10:22:01.123456".to_owned(),
            rule_id: "1:1:1".to_owned(),
            description: description.to_owned(),
            classification: class.to_owned(),
            priority,
            protocol: protocol.to_owned(),
            src_ip: src.to_owned(),
            src_port: 1,
            dst_ip: dst.to_owned(),
            dst_port: 2,
        }
    }

    #[test]
    fn empty_records_give_zero_stats() {
        let stats = AlertStats::from_records(&[], DEFAULT_TOP_N);
        assert_eq!(stats, AlertStats::default());
    }

    #[test]
    fn groups_by_priority_and_protocol() {
        let records = vec![
            record(3, "UDP", "a", "x", "Misc"),
            record(1, "TCP", "a", "x", "A Network Trojan was detected"),
            record(1, "TCP", "b", "y", "Web Application Attack"),
        ];
        let stats = AlertStats::from_records(&records, DEFAULT_TOP_N);

        assert_eq!(stats.total, 3);
        assert_eq!(
            stats.by_priority.into_iter().collect::<Vec<_>>(),
            vec![(1, 2), (3, 1)]
        );
        assert_eq!(stats.by_protocol["TCP"], 2);
        assert_eq!(stats.by_protocol["UDP"], 1);
        assert_eq!(stats.critical, 2);
        assert_eq!(stats.threat_events, 2);
    }

    #[test]
    fn top_sources_break_ties_by_first_seen() {
        let records = vec![
            record(2, "TCP", "10.0.0.3", "x", "c"),
            record(2, "TCP", "10.0.0.1", "x", "c"),
            record(2, "TCP", "10.0.0.2", "x", "c"),
            record(2, "TCP", "10.0.0.2", "x", "c"),
            record(2, "TCP", "10.0.0.1", "x", "c"),
        ];
        let stats = AlertStats::from_records(&records, 2);

        let ips: Vec<_> = stats.top_sources.iter().map(|c| c.ip.as_str()).collect();
        assert_eq!(ips, vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(stats.top_sources[0].count, 2);
        assert_eq!(stats.top_destinations.len(), 1);
        assert_eq!(stats.top_destinations[0].count, 5);
    }

    #[test]
    fn top_n_zero_yields_no_entries() {
        let records = vec![record(2, "TCP", "a", "b", "c")];
        let stats = AlertStats::from_records(&records, 0);
        assert!(stats.top_sources.is_empty());
    }

    #[test]
    fn family_sighting_reports_first_event_and_count() {
        let records = vec![
            described("ET POLICY curl", 3, "TCP", "10.0.0.9", "1.1.1.1", "c"),
            described("ET MALWARE LokiBot CnC Checkin", 1, "TCP", "10.0.0.5", "185.22.1.4", "c"),
            described("ET MALWARE LOKIBOT Request", 1, "TCP", "10.0.0.6", "185.22.1.9", "c"),
        ];

        let sighting = FamilySighting::find(&records, "LokiBot").expect("lokibot events");
        assert_eq!(sighting.family, "lokibot");
        assert_eq!(sighting.src_ip, "10.0.0.5");
        assert_eq!(sighting.dst_ip, "185.22.1.4");
        assert_eq!(sighting.count, 2);
    }

    #[test]
    fn family_sighting_absent_without_matches() {
        let records = vec![record(2, "TCP", "a", "b", "c")];
        assert!(FamilySighting::find(&records, "lokibot").is_none());
    }
}
