//! 통합 테스트 -- 파일 읽기부터 내보내기까지 전체 흐름 검증

use fastlog_core::pipeline::LineParser;
use fastlog_core::types::{PriorityTier, RECORD_FIELDS};
use fastlog_pipeline::{
    AlertParser, AlertStats, ExportFormat, IngestOutcome, Ingestor, InputEncoding, PipelineError,
    RecordFilter, export_records,
};
use proptest::prelude::*;

const LOKIBOT: &str = "08/14/2024-10:22:01.123456 [**] [1:2021641:10] ET MALWARE LokiBot CnC Checkin [**] [Classification: A Network Trojan was detected] [Priority: 1] {TCP} 10.0.0.5:49512 -> 185.22.1.4:80";
const POLICY: &str = "08/14/2024-10:23:00.000001  [**] [1:2013028:4] ET POLICY curl User-Agent Outbound [**] [Classification: Attempted Information Leak] [Priority: 2] {TCP} 192.168.1.11:50000 -> 198.51.100.7:443";
const DNS: &str = "08/14/2024-10:24:10.500000 sensor-02 [**] [1:2027863:2] ET INFO Observed DNS Query to .cloud TLD [**] [Classification: Misc activity] [Priority: 3] {UDP} 10.0.0.5:53000 -> 8.8.8.8:53";
const TRUNCATED: &str = "08/14/2024-10:22:01.123456  [**] [1:2024897:3] ET MALWARE LokiBot Checkin [**] [Classification: A Network Trojan was detected] [Priority: 1] {TCP} 192.168.1.10:49152";

fn ingestor() -> Ingestor {
    Ingestor::with_default_parser().expect("patterns should compile")
}

fn write_log(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("should write log file");
    path
}

/// 파일 → 수집 → 통계 → CSV 내보내기 → 다시 읽기
#[tokio::test]
async fn test_file_to_csv_round_trip() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let content = format!("{LOKIBOT}\n{TRUNCATED}\n\n{POLICY}\n{DNS}\n");
    let input = write_log(&dir, "fast.log", content.as_bytes());

    let report = ingestor()
        .ingest_file(&input, InputEncoding::Utf8)
        .await
        .expect("should ingest");

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.unparsed_lines, 1);
    assert_eq!(report.blank_lines, 1);
    assert_eq!(report.outcome(), IngestOutcome::Critical(1));

    let stats = AlertStats::from_records(&report.records, 5);
    assert_eq!(stats.critical, 1);
    assert_eq!(stats.threat_events, 1);
    assert_eq!(stats.top_sources[0].ip, "10.0.0.5");
    assert_eq!(stats.top_sources[0].count, 2);

    let output = dir.path().join("suricata_logs.csv");
    let summary = export_records(&report.records, &output, ExportFormat::Csv)
        .await
        .expect("should export");
    assert_eq!(summary.records, 3);

    let mut rdr = csv::Reader::from_path(&output).expect("should open csv");
    let headers: Vec<String> = rdr
        .headers()
        .expect("should have headers")
        .iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(headers, RECORD_FIELDS);

    let read_back: Vec<fastlog_core::AlertRecord> = rdr
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("rows should deserialize");
    assert_eq!(read_back, report.records);
}

/// LokiBot 경보 라인 필드 값 검증
#[test]
fn test_lokibot_scenario() {
    let parser = AlertParser::with_defaults().expect("patterns should compile");
    let record = parser.parse_line(LOKIBOT).expect("should match");

    assert_eq!(record.timestamp, "08/14/2024-10:22:01.123456");
    assert_eq!(record.rule_id, "1:2021641:10");
    assert_eq!(record.description, "ET MALWARE LokiBot CnC Checkin");
    assert_eq!(record.classification, "A Network Trojan was detected");
    assert_eq!(record.priority, 1);
    assert_eq!(record.protocol, "TCP");
    assert_eq!(record.src_ip, "10.0.0.5");
    assert_eq!(record.src_port, 49512);
    assert_eq!(record.dst_ip, "185.22.1.4");
    assert_eq!(record.dst_port, 80);
    assert_eq!(record.priority_tier(), PriorityTier::Critical);
}

/// 전부 파싱 불가한 파일은 빈 결과, 없는 파일은 에러
#[tokio::test]
async fn test_unparsable_file_differs_from_missing_file() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = write_log(&dir, "junk.log", b"hello\nworld\n");

    let report = ingestor()
        .ingest_file(&input, InputEncoding::Utf8)
        .await
        .expect("unparsable lines are not an error");
    assert!(report.records.is_empty());
    assert_eq!(report.unparsed_lines, 2);
    assert_eq!(report.outcome(), IngestOutcome::Empty);

    let missing = dir.path().join("nope.log");
    let err = ingestor()
        .ingest_file(&missing, InputEncoding::Utf8)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InputNotFound { .. }));
}

/// 잘못된 UTF-8: 엄격 모드는 실패, 완화 모드는 계속 진행
#[tokio::test]
async fn test_invalid_utf8_handling() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let mut content = LOKIBOT.as_bytes().to_vec();
    content.extend_from_slice(b"\n\xff\xfe broken\n");
    let input = write_log(&dir, "fast.log", &content);

    let err = ingestor()
        .ingest_file(&input, InputEncoding::Utf8)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Decode { .. }));

    let report = ingestor()
        .ingest_file(&input, InputEncoding::Utf8Lossy)
        .await
        .expect("lossy decoding should succeed");
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.unparsed_lines, 1);

    let report = ingestor()
        .ingest_file(&input, InputEncoding::Latin1)
        .await
        .expect("latin-1 decoding should succeed");
    assert_eq!(report.records.len(), 1);
}

/// 필터에 모두 걸러지면 빈 결과
#[test]
fn test_all_filtered_is_empty() {
    let text = format!("{LOKIBOT}\n{POLICY}\n");
    let report = ingestor()
        .with_filter(RecordFilter::new().with_keyword("emotet"))
        .ingest(&text);
    assert_eq!(report.filtered_out, 2);
    assert_eq!(report.outcome(), IngestOutcome::Empty);
}

/// JSON 내보내기 결과는 레코드 배열
#[tokio::test]
async fn test_json_export_shape() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let report = ingestor().ingest(&format!("{LOKIBOT}\n{DNS}\n"));

    let output = dir.path().join("alerts.json");
    export_records(&report.records, &output, ExportFormat::Json)
        .await
        .expect("should export");

    let text = std::fs::read_to_string(&output).expect("should read json");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["dst_port"], 53);
    assert_eq!(items[1]["protocol"], "UDP");
}

proptest! {
    /// 임의 입력에 패닉하지 않음
    #[test]
    fn prop_parser_never_panics(line in ".{0,300}") {
        let parser = AlertParser::with_defaults().unwrap();
        let _ = parser.parse_line(&line);
    }

    /// 같은 입력은 항상 같은 결과
    #[test]
    fn prop_parsing_is_idempotent(
        desc in "[A-Za-z][A-Za-z0-9 \\[\\]]{0,40}[A-Za-z0-9]",
        priority in 0u64..10,
        src_port in any::<u16>(),
        dst_port in any::<u16>(),
    ) {
        let line = format!(
            "01/01/2024-00:00:00.000001  [**] [1:100:1] {desc} [**] [Classification: Misc] [Priority: {priority}] {{TCP}} 10.0.0.1:{src_port} -> 10.0.0.2:{dst_port}"
        );
        let parser = AlertParser::with_defaults().unwrap();
        let first = parser.parse_line(&line);
        let second = parser.parse_line(&line);
        prop_assert_eq!(&first, &second);

        let record = first.unwrap();
        prop_assert_eq!(record.description, desc);
        prop_assert_eq!(record.priority, priority);
        prop_assert_eq!(record.src_port, u64::from(src_port));
        prop_assert_eq!(record.dst_port, u64::from(dst_port));
    }

    /// 목적지 포트 이전에서 잘린 라인은 레코드를 만들지 않음
    #[test]
    fn prop_truncated_lines_do_not_match(cut in 0usize..60) {
        // 끝의 ":80"을 제거한 지점부터 앞으로 자름
        let end = LOKIBOT.len() - 3 - cut;
        let parser = AlertParser::with_defaults().unwrap();
        prop_assert!(parser.parse_line(&LOKIBOT[..end]).is_none());
    }
}
