//! Integration tests that render complete fixture runs end-to-end.

use bdd_report::{
    ExecutionStatus, FeatureResult, HtmlReportFormatter, HtmlReportOptions, IgnoredScenarios,
    ReportOutcome, ScenarioResult, StepResult, YamlReportFormatter, YamlReportOptions,
    features_from_json,
};

fn fixtures_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", path.display(), e))
}

fn checkout_run() -> Vec<FeatureResult> {
    features_from_json(&read_fixture("checkout_run.json")).expect("fixture should deserialize")
}

#[test]
fn fixture_deserializes() {
    let features = checkout_run();
    assert_eq!(features.len(), 2);

    let checkout = &features[0];
    assert_eq!(checkout.name.plain(), "Checkout");
    assert_eq!(checkout.scenarios.len(), 2);

    let card = &checkout.scenarios[0];
    assert_eq!(card.name.plain(), "pays by card");
    assert!(card.is_happy_path());
    assert_eq!(card.status, ExecutionStatus::Passed);
    assert_eq!(card.all_steps().len(), 4, "sub-steps count too");
}

#[test]
fn html_report_end_to_end() {
    let features = checkout_run();
    let html = bdd_report::to_html_report(&features, HtmlReportOptions::default())
        .expect("render should succeed")
        .expect("run is not gated");

    // Document shell with embedded assets.
    assert!(html.starts_with("<!DOCTYPE HTML>"));
    assert!(html.contains("<style>"));
    assert!(html.contains("function initialize()"));
    assert!(html.contains("data:image/svg+xml;base64,"));

    // Execution summary reflects the run.
    assert!(html.contains("overall-status failed"));
    assert!(html.contains("2026-03-01 (UTC)"));
    assert!(html.contains("Failed scenarios:"));
    assert!(html.contains("Ignored scenarios:"));

    // Feature details: decorated names, categories, labels, durations.
    assert!(html.contains("pays by <span class=\"inline-param notapplicable\">card</span>"));
    assert!(html.contains("data-categories=\"_0_ _1_\""));
    assert!(html.contains(">Happy Path</span>"));
    assert!(html.contains("(2s 350ms)"));

    // The failing scenario keeps its details and escapes its name.
    assert!(html.contains("rejects an expired card [edge]: declined"));
    assert!(html.contains("expected status Declined but found Charged"));

    // Parameters: verified table and tree with an expected-vs-actual cell.
    assert!(html.contains("class=\"param column key\""));
    assert!(html.contains("<td class=\"param type\">=</td>"));
    assert!(html.contains("Charged<hr/><span class=\"expected\">Declined</span>"));

    // Step comment surfaces in the details block.
    assert!(html.contains("// Step 2: card authorised on second attempt"));
}

#[test]
fn html_report_scenarios_sorted_by_name() {
    let features = checkout_run();
    let html = bdd_report::to_html_report(&features, HtmlReportOptions::default())
        .expect("render should succeed")
        .expect("run is not gated");

    // "pays by card" < "rejects an expired card" alphabetically.
    let pays = html.find("pays by <span").expect("first scenario");
    let rejects = html.find("rejects an expired card").expect("second scenario");
    assert!(pays < rejects);
}

#[test]
fn yaml_report_end_to_end() {
    let features = checkout_run();
    let yaml = bdd_report::to_yaml_report(&features, YamlReportOptions::default())
        .expect("run is not gated");

    assert!(yaml.starts_with("Title: Feature details\nFeatures:\n"));
    assert!(yaml.contains("  - Feature: Checkout\n"));
    assert!(yaml.contains("    Description: \"Buying things with a basket\"\n"));
    // Brackets and ": " are sanitised in names.
    assert!(yaml.contains("      - Scenario: rejects an expired card <edge> = declined\n"));
    assert!(yaml.contains("        IsHappyPath: true\n"));
    // Sub-steps carry the group prefix and extra indentation.
    assert!(yaml.contains("          WHEN the customer pays (STEP 2)\n"));
    assert!(yaml.contains("            charges the card (STEP 2.1)\n"));
    // Happy path scenario renders after the failing one within Checkout.
    let rejects = yaml.find("rejects an expired card").expect("failing scenario");
    let pays = yaml.find("pays by card").expect("happy scenario");
    assert!(rejects < pays);
    // Document is trimmed.
    assert!(!yaml.ends_with('\n'));
}

#[test]
fn both_formatters_gate_identically() {
    let features = checkout_run(); // contains one failed scenario

    let html = HtmlReportFormatter::new(HtmlReportOptions {
        only_on_fully_successful: true,
        ..HtmlReportOptions::default()
    });
    let mut out: Vec<u8> = Vec::new();
    assert_eq!(
        html.format(&features, &mut out).expect("no error"),
        ReportOutcome::Skipped
    );
    assert!(out.is_empty());

    let yaml = YamlReportFormatter::new(YamlReportOptions {
        only_on_fully_successful: true,
        ..YamlReportOptions::default()
    });
    let mut out: Vec<u8> = Vec::new();
    assert_eq!(
        yaml.format(&features, &mut out).expect("no error"),
        ReportOutcome::Skipped
    );
    assert!(out.is_empty());
}

#[test]
fn full_run_gate_uses_ignored_counter() {
    let features = checkout_run(); // 3 scenarios executed

    // Two more scenarios were ignored mid-run and never reached the results.
    let ignored = IgnoredScenarios::new();
    ignored.increment();
    ignored.increment();

    let skipped = YamlReportFormatter::new(YamlReportOptions {
        expected_test_total: Some(5),
        ..YamlReportOptions::default()
    });
    assert_eq!(
        skipped.format(&features, &mut Vec::<u8>::new()).expect("no error"),
        ReportOutcome::Skipped,
        "3 of 5 without the counter is a partial run"
    );

    let complete = YamlReportFormatter::new(YamlReportOptions {
        expected_test_total: Some(5),
        ignored_scenario_count: ignored.count(),
        ..YamlReportOptions::default()
    });
    assert_eq!(
        complete.format(&features, &mut Vec::<u8>::new()).expect("no error"),
        ReportOutcome::Written
    );
}

#[test]
fn specifications_profile_renders_anonymous_document() {
    // A fully successful run of known size.
    let features = vec![FeatureResult {
        name: "Search".into(),
        scenarios: vec![ScenarioResult {
            name: "finds an item".into(),
            status: ExecutionStatus::Passed,
            steps: vec![StepResult {
                name: "GIVEN an index".into(),
                number: 1,
                status: ExecutionStatus::Passed,
                ..StepResult::default()
            }],
            ..ScenarioResult::default()
        }],
        ..FeatureResult::default()
    }];

    let html = bdd_report::to_html_report(&features, HtmlReportOptions::specifications(1))
        .expect("render should succeed")
        .expect("complete successful run passes both gates");

    assert!(html.contains(">Specifications</h1>") || html.contains("Specifications"));
    assert!(!html.contains("Test execution summary"));
    assert!(!html.contains("Feature summary"));
    assert!(!html.contains("class=\"duration\""));
    assert!(!html.contains("class=\"smallLink shareable\""));
}

#[test]
fn empty_run_still_renders_a_complete_document() {
    let html = bdd_report::to_html_report(&[], HtmlReportOptions::default())
        .expect("render should succeed")
        .expect("no gates configured");
    assert!(html.starts_with("<!DOCTYPE HTML>"));
    assert!(html.ends_with("</html>"));
    assert!(html.contains("overall-status passed"));
}

#[test]
fn custom_branding_round_trip() {
    let features = checkout_run();
    let options = HtmlReportOptions::default()
        .with_custom_css(".scenario { border-width: 2px }")
        .with_custom_logo("image/png", vec![0x89, 0x50, 0x4e, 0x47])
        .expect("valid logo")
        .with_custom_favicon("image/png", vec![0x89, 0x50, 0x4e, 0x47])
        .expect("valid favicon");

    let html = bdd_report::to_html_report(&features, options)
        .expect("render should succeed")
        .expect("not gated");

    assert!(html.contains(".scenario { border-width: 2px }"));
    assert!(html.contains("--logo-ico: url('data:image/png;base64,iVBORw=='"));
    assert!(html.contains("rel=\"icon\" type=\"image/png\""));
}
