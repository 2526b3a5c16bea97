#![no_main]

use arbitrary::Arbitrary;
use fastlog_pipeline::{Ingestor, InputEncoding, RecordFilter};
use libfuzzer_sys::fuzz_target;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    bytes: Vec<u8>,
    keyword: Option<String>,
    priority: Option<u8>,
    limit: u8,
    max_line_length: u16,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(text) = InputEncoding::Latin1.decode(input.bytes) else {
        return;
    };

    let mut filter = RecordFilter::new();
    if let Some(keyword) = input.keyword {
        filter = filter.with_keyword(keyword);
    }
    if let Some(priority) = input.priority {
        filter = filter.with_priority(u64::from(priority));
    }

    let Ok(ingestor) = Ingestor::with_default_parser() else {
        return;
    };
    let ingestor = ingestor
        .with_filter(filter)
        .with_limit(usize::from(input.limit))
        .with_max_line_length(usize::from(input.max_line_length).max(1));

    let report = ingestor.ingest(&text);

    if input.limit > 0 {
        assert!(report.records.len() <= usize::from(input.limit));
    }
    assert!(report.records.iter().all(|r| ingestor.filter().matches(r)));
    assert!(report.critical_count() <= report.records.len());
});
