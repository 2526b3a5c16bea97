#![no_main]

use fastlog_core::types::AlertRecord;
use fastlog_pipeline::export::render;
use fastlog_pipeline::{ExportFormat, Ingestor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(ingestor) = Ingestor::with_default_parser() else {
        return;
    };
    let text = String::from_utf8_lossy(data);
    let report = ingestor.ingest(&text);
    if report.records.is_empty() {
        return;
    }

    let Ok(bytes) = render(&report.records, ExportFormat::Csv) else {
        return;
    };

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let decoded: Vec<AlertRecord> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("exported CSV should read back");
    assert_eq!(decoded, report.records);
});
