//! `bdd-report` — renderer for BDD test-execution results.
//!
//! Takes a tree of feature results (features contain scenarios, scenarios
//! contain steps and sub-steps, steps carry structured parameter results)
//! and renders it as a self-contained interactive HTML report or a flat
//! YAML summary. Reports can be gated to fire only on complete or fully
//! successful runs.
//!
//! # Quick start
//!
//! ```
//! use bdd_report::{ExecutionStatus, FeatureResult, HtmlReportOptions, ScenarioResult};
//!
//! let features = vec![FeatureResult {
//!     name: "Checkout".into(),
//!     scenarios: vec![ScenarioResult {
//!         name: "pays by card".into(),
//!         status: ExecutionStatus::Passed,
//!         ..ScenarioResult::default()
//!     }],
//!     ..FeatureResult::default()
//! }];
//!
//! let html = bdd_report::to_html_report(&features, HtmlReportOptions::default())
//!     .unwrap()
//!     .expect("report not gated");
//! assert!(html.contains("Checkout"));
//! ```

pub mod error;
pub mod html;
pub mod render_html;
pub mod render_yaml;
pub mod types;

pub use error::ReportError;
pub use render_html::{
    CategoryIndex, EmbeddedImage, HtmlReportFormatter, HtmlReportOptions, ReportAssets,
    ReportOutcome,
};
pub use render_yaml::{YamlReportFormatter, YamlReportOptions, to_yaml_document};
pub use types::*;

/// Render feature results as a self-contained HTML document.
///
/// Returns `Ok(None)` when the configured gates decided the run is not
/// reportable yet.
pub fn to_html_report(
    features: &[FeatureResult],
    options: HtmlReportOptions,
) -> Result<Option<String>, ReportError> {
    HtmlReportFormatter::new(options).format_to_string(features)
}

/// Render feature results as a flat YAML summary.
///
/// Returns `None` when the configured gates decided the run is not
/// reportable yet.
pub fn to_yaml_report(features: &[FeatureResult], options: YamlReportOptions) -> Option<String> {
    let formatter = YamlReportFormatter::new(options);
    let mut buf = Vec::new();
    match formatter.format(features, &mut buf) {
        Ok(ReportOutcome::Written) => Some(String::from_utf8_lossy(&buf).into_owned()),
        _ => None,
    }
}
