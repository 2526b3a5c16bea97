#![no_main]

use fastlog_core::pipeline::LineParser;
use fastlog_pipeline::AlertParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(parser) = AlertParser::with_defaults() else {
        return;
    };
    let line = String::from_utf8_lossy(data);

    if let Ok(parsed) = parser.parse_detailed(&line) {
        // 매칭된 레코드는 항상 gid:sid:rev 형식의 규칙 ID를 가짐
        assert!(parsed.record.parsed_rule_id().is_ok());
        assert!(parser.parse_line(&line).is_some());
    }
});
