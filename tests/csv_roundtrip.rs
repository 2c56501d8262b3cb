//! CSV round-trip property: splitting on CRLF and commas recovers the cells

mod common;

use common::make_report;
use pagebench::models::{AuditSpec, ReportTable, TargetSource};
use proptest::prelude::*;

const METRIC_IDS: [&str; 2] = ["first-contentful-paint", "speed-index"];

fn label() -> impl Strategy<Value = String> {
    // Cell values are assumed to carry no embedded commas or CRLF
    proptest::string::string_regex("[A-Za-z0-9 _.-]{1,16}").unwrap()
}

fn source_row() -> impl Strategy<Value = (String, String, f64, Option<f64>, Option<f64>)> {
    (
        label(),
        label(),
        0.0f64..=1.0,
        proptest::option::of(0.01f64..100_000.0),
        proptest::option::of(0.01f64..100_000.0),
    )
}

proptest! {
    #[test]
    fn csv_round_trip(rows in proptest::collection::vec(source_row(), 1..8)) {
        let audits = vec![
            AuditSpec::new(METRIC_IDS[0], "FCP"),
            AuditSpec::new(METRIC_IDS[1], "SPI"),
        ];

        let mut table = ReportTable::new(&audits);
        for (name, tag, score, fcp, spi) in &rows {
            let source = TargetSource::new(name.clone(), tag.clone(), "https://example.com".to_string());
            let report = make_report(*score, &[(METRIC_IDS[0], *fcp), (METRIC_IDS[1], *spi)]);
            table.push_source_row(&source, &report, &audits);
        }

        let csv = table.to_csv();
        let parsed: Vec<Vec<&str>> = csv
            .split("\r\n")
            .map(|row| row.split(',').collect())
            .collect();

        prop_assert_eq!(parsed.len(), 1 + rows.len());
        for (parsed_row, row) in parsed.iter().zip(table.rows()) {
            let expected: Vec<&str> = row.iter().map(String::as_str).collect();
            prop_assert_eq!(parsed_row, &expected);
        }
    }
}
