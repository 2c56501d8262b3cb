//! Integration tests for the report pipeline

mod common;

use common::{make_report, ScriptedRunner};
use pagebench::error::AppError;
use pagebench::models::{AuditSettings, AuditSpec, TargetSource};
use pagebench::output::ConsoleReporter;
use pagebench::pipeline::{FailurePolicy, ReportPipeline};

fn reporter() -> ConsoleReporter {
    ConsoleReporter::new(false, false)
}

fn sources(n: usize) -> Vec<TargetSource> {
    (0..n)
        .map(|i| {
            TargetSource::new(
                format!("Source {}", i),
                format!("tag{}", i),
                format!("https://example.com/{}", i),
            )
        })
        .collect()
}

fn two_audits() -> Vec<AuditSpec> {
    vec![
        AuditSpec::new("first-contentful-paint", "FCP"),
        AuditSpec::new("speed-index", "SPI"),
    ]
}

#[tokio::test]
async fn table_has_header_plus_one_row_per_source_in_order() {
    let runner = ScriptedRunner::new(vec![
        Ok(make_report(0.9, &[("first-contentful-paint", Some(800.0)), ("speed-index", Some(1500.0))])),
        Ok(make_report(0.8, &[("first-contentful-paint", Some(900.0)), ("speed-index", Some(1600.0))])),
        Ok(make_report(0.7, &[("first-contentful-paint", Some(950.0)), ("speed-index", Some(1700.0))])),
    ]);

    let pipeline =
        ReportPipeline::new(sources(3), two_audits(), AuditSettings::desktop_fast()).unwrap();
    let table = pipeline.run(&runner, &reporter()).await.unwrap();

    assert_eq!(table.rows().len(), 1 + 3);
    for (i, row) in table.rows().iter().skip(1).enumerate() {
        assert_eq!(row[0], format!("Source {}", i));
        assert_eq!(row[1], format!("tag{}", i));
    }
}

#[tokio::test]
async fn runs_are_sequential_in_source_list_order() {
    let runner = ScriptedRunner::new(vec![
        Ok(make_report(0.9, &[])),
        Ok(make_report(0.8, &[])),
        Ok(make_report(0.7, &[])),
    ]);

    let pipeline = ReportPipeline::new(
        sources(3),
        vec![AuditSpec::new("speed-index", "SPI")],
        AuditSettings::desktop_fast(),
    )
    .unwrap();
    pipeline.run(&runner, &reporter()).await.unwrap();

    let urls: Vec<String> = runner.calls().into_iter().map(|(url, _)| url).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/0",
            "https://example.com/1",
            "https://example.com/2"
        ]
    );
}

#[tokio::test]
async fn missing_metric_becomes_sentinel_and_present_metric_two_decimals() {
    // Source 1 has both metrics, source 2 is missing one.
    let runner = ScriptedRunner::new(vec![
        Ok(make_report(0.95, &[("first-contentful-paint", Some(812.345)), ("speed-index", Some(1500.5))])),
        Ok(make_report(0.85, &[("first-contentful-paint", Some(900.0)), ("speed-index", None)])),
    ]);

    let pipeline =
        ReportPipeline::new(sources(2), two_audits(), AuditSettings::desktop_fast()).unwrap();
    let table = pipeline.run(&runner, &reporter()).await.unwrap();

    assert_eq!(table.rows().len(), 3);
    assert_eq!(table.rows()[1][3], "812.35");
    assert_eq!(table.rows()[1][4], "1500.50");
    assert_eq!(table.rows()[2][4], "-1");
}

#[tokio::test]
async fn header_follows_audit_spec_order() {
    let runner = ScriptedRunner::new(vec![Ok(make_report(0.9, &[]))]);
    let pipeline =
        ReportPipeline::new(sources(1), two_audits(), AuditSettings::desktop_fast()).unwrap();
    let table = pipeline.run(&runner, &reporter()).await.unwrap();

    assert_eq!(table.rows()[0], vec!["Name", "Tag", "Score", "FCP", "SPI"]);
}

#[tokio::test]
async fn abort_policy_abandons_remaining_sources() {
    let runner = ScriptedRunner::new(vec![
        Ok(make_report(0.9, &[])),
        Err(AppError::audit("navigation failed")),
        Ok(make_report(0.7, &[])),
    ]);

    let pipeline = ReportPipeline::new(
        sources(3),
        vec![AuditSpec::new("speed-index", "SPI")],
        AuditSettings::desktop_fast(),
    )
    .unwrap()
    .with_failure_policy(FailurePolicy::Abort);

    let err = pipeline.run(&runner, &reporter()).await.unwrap_err();
    assert_eq!(err.category(), "AUDIT");
    // The third source was never attempted
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn continue_policy_emits_surviving_rows_in_order() {
    let runner = ScriptedRunner::new(vec![
        Ok(make_report(0.9, &[])),
        Err(AppError::audit("navigation failed")),
        Ok(make_report(0.7, &[])),
    ]);

    let pipeline = ReportPipeline::new(
        sources(3),
        vec![AuditSpec::new("speed-index", "SPI")],
        AuditSettings::desktop_fast(),
    )
    .unwrap()
    .with_failure_policy(FailurePolicy::Continue);

    let table = pipeline.run(&runner, &reporter()).await.unwrap();

    assert_eq!(table.data_row_count(), 2);
    assert_eq!(table.rows()[1][0], "Source 0");
    assert_eq!(table.rows()[2][0], "Source 2");
    // All three sources were still attempted
    assert_eq!(runner.calls().len(), 3);
}

#[tokio::test]
async fn csv_round_trip_preserves_cells() {
    let runner = ScriptedRunner::new(vec![
        Ok(make_report(0.91, &[("first-contentful-paint", Some(812.34)), ("speed-index", None)])),
        Ok(make_report(0.82, &[("first-contentful-paint", Some(900.01)), ("speed-index", Some(2000.0))])),
    ]);

    let pipeline =
        ReportPipeline::new(sources(2), two_audits(), AuditSettings::desktop_fast()).unwrap();
    let table = pipeline.run(&runner, &reporter()).await.unwrap();
    let csv = table.to_csv();

    let parsed: Vec<Vec<&str>> = csv.split("\r\n").map(|row| row.split(',').collect()).collect();
    assert_eq!(parsed.len(), table.rows().len());
    for (parsed_row, row) in parsed.iter().zip(table.rows()) {
        let expected: Vec<&str> = row.iter().map(String::as_str).collect();
        assert_eq!(parsed_row, &expected);
    }
}

#[tokio::test]
async fn score_is_not_rounded() {
    let runner = ScriptedRunner::new(vec![Ok(make_report(0.876543, &[]))]);
    let pipeline = ReportPipeline::new(
        sources(1),
        vec![AuditSpec::new("speed-index", "SPI")],
        AuditSettings::desktop_fast(),
    )
    .unwrap();

    let table = pipeline.run(&runner, &reporter()).await.unwrap();
    assert_eq!(table.rows()[1][2], "0.876543");
}
