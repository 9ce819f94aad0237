//! Flat YAML summary renderer.
//!
//! Produces a deliberately simple, diff-friendly text document listing every
//! feature, scenario and step definition. This is hand-built line assembly
//! rather than YAML serialization: step definition lines are free-form text
//! kept parseable by sanitising the few characters that would break the
//! format (see [`sanitise_for_yaml`]).

use std::io;
use std::io::Write as _;

use crate::error::ReportError;
use crate::render_html::ReportOutcome;
use crate::types::{
    FeatureResult, RunGate, ScenarioOrdering, StepResult, run_is_reportable,
};

/// Options for the YAML summary. Gating matches the HTML formatter.
#[derive(Debug, Clone)]
pub struct YamlReportOptions {
    pub title: String,
    pub only_on_fully_successful: bool,
    pub expected_test_total: Option<usize>,
    pub ignored_scenario_count: usize,
    pub scenario_ordering: ScenarioOrdering,
}

impl Default for YamlReportOptions {
    fn default() -> Self {
        YamlReportOptions {
            title: "Feature details".to_string(),
            only_on_fully_successful: false,
            expected_test_total: None,
            ignored_scenario_count: 0,
            scenario_ordering: ScenarioOrdering::HappyPathLast,
        }
    }
}

impl YamlReportOptions {
    fn gate(&self) -> RunGate {
        RunGate {
            only_on_fully_successful: self.only_on_fully_successful,
            expected_test_total: self.expected_test_total,
            ignored_scenario_count: self.ignored_scenario_count,
        }
    }
}

/// Formats feature results as a flat YAML document.
#[derive(Debug, Clone, Default)]
pub struct YamlReportFormatter {
    options: YamlReportOptions,
}

impl YamlReportFormatter {
    pub fn new(options: YamlReportOptions) -> Self {
        YamlReportFormatter { options }
    }

    /// Render the summary for `features` into `out`, or skip silently when
    /// the run does not pass the configured gates.
    pub fn format(
        &self,
        features: &[FeatureResult],
        out: &mut dyn io::Write,
    ) -> Result<ReportOutcome, ReportError> {
        if !run_is_reportable(features, &self.options.gate()) {
            return Ok(ReportOutcome::Skipped);
        }
        out.write_all(to_yaml_document(features, &self.options).as_bytes())?;
        tracing::debug!(features = features.len(), "yaml report written");
        Ok(ReportOutcome::Written)
    }
}

/// Build the whole document as a string. Not gated; callers wanting gating
/// go through [`YamlReportFormatter::format`].
pub fn to_yaml_document(features: &[FeatureResult], options: &YamlReportOptions) -> String {
    let mut yml = String::new();
    yml.push_str(&format!("Title: {}\n", options.title));
    yml.push_str("Features:\n");

    for feature in features {
        yml.push_str(&format!(
            "  - Feature: {}\n",
            sanitise_for_yaml(&feature.name.plain())
        ));

        if let Some(description) = &feature.description {
            yml.push_str(&format!("    Description: \"{description}\"\n"));
        }

        yml.push_str("    Scenarios:\n");

        for scenario in options.scenario_ordering.apply(&feature.scenarios) {
            yml.push_str(&format!(
                "      - Scenario: {}\n",
                sanitise_for_yaml(&scenario.name.plain())
            ));
            yml.push_str(&format!(
                "        IsHappyPath: {}\n",
                scenario.is_happy_path()
            ));
            yml.push_str("        Definition:\n");
            write_steps(&scenario.steps, &mut yml, "        ");
            yml.push_str("\n\n");
        }
    }

    yml.trim_end().to_string()
}

fn write_steps(steps: &[StepResult], yml: &mut String, indent: &str) {
    let indent = format!("{indent}  ");
    for step in steps {
        yml.push_str(&format!(
            "{indent}{} (STEP {}{})\n",
            sanitise_for_yaml(&step.name.plain()),
            step.group_prefix,
            step.number
        ));
        if !step.sub_steps.is_empty() {
            write_steps(&step.sub_steps, yml, &indent);
        }
    }
}

/// Keep a free-form name parseable inside the flat format: square brackets
/// become angle brackets and `": "` becomes `" = "`.
pub fn sanitise_for_yaml(value: &str) -> String {
    value.replace('[', "<").replace(']', ">").replace(": ", " = ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExecutionStatus, HAPPY_PATH_LABEL, ScenarioResult};
    use pretty_assertions::assert_eq;

    fn step(name: &str, prefix: &str, number: usize, sub_steps: Vec<StepResult>) -> StepResult {
        StepResult {
            name: name.into(),
            group_prefix: prefix.into(),
            number,
            status: ExecutionStatus::Passed,
            sub_steps,
            ..StepResult::default()
        }
    }

    fn scenario(name: &str, steps: Vec<StepResult>) -> ScenarioResult {
        ScenarioResult {
            name: name.into(),
            status: ExecutionStatus::Passed,
            steps,
            ..ScenarioResult::default()
        }
    }

    #[test]
    fn sanitises_brackets_and_colons() {
        assert_eq!(sanitise_for_yaml("Validate [x]: y"), "Validate <x> = y");
        assert_eq!(sanitise_for_yaml("plain"), "plain");
    }

    #[test]
    fn document_structure() {
        let features = vec![FeatureResult {
            name: "Transfers".into(),
            description: Some("Moving money around".into()),
            scenarios: vec![scenario(
                "sends a payment",
                vec![
                    step("GIVEN an account", "", 1, Vec::new()),
                    step(
                        "WHEN a transfer is made",
                        "",
                        2,
                        vec![step("validates the balance", "2.", 1, Vec::new())],
                    ),
                ],
            )],
            ..FeatureResult::default()
        }];

        let yaml = to_yaml_document(&features, &YamlReportOptions::default());
        let expected = "\
Title: Feature details
Features:
  - Feature: Transfers
    Description: \"Moving money around\"
    Scenarios:
      - Scenario: sends a payment
        IsHappyPath: false
        Definition:
          GIVEN an account (STEP 1)
          WHEN a transfer is made (STEP 2)
            validates the balance (STEP 2.1)";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn happy_path_scenarios_sort_last_and_flag_true() {
        let mut happy = scenario("appears first alphabetically", Vec::new());
        happy.labels.push(HAPPY_PATH_LABEL.to_string());
        let features = vec![FeatureResult {
            name: "F".into(),
            scenarios: vec![happy, scenario("zz goes before happy", Vec::new())],
            ..FeatureResult::default()
        }];

        let yaml = to_yaml_document(&features, &YamlReportOptions::default());
        let zz = yaml.find("zz goes before happy").expect("zz present");
        let happy = yaml.find("appears first alphabetically").expect("happy present");
        assert!(zz < happy, "happy path scenarios render after the rest");
        assert!(yaml.contains("IsHappyPath: true"));
    }

    #[test]
    fn gating_skips_output() {
        let features = vec![FeatureResult {
            name: "F".into(),
            scenarios: vec![ScenarioResult {
                name: "s".into(),
                status: ExecutionStatus::Failed,
                ..ScenarioResult::default()
            }],
            ..FeatureResult::default()
        }];
        let formatter = YamlReportFormatter::new(YamlReportOptions {
            only_on_fully_successful: true,
            ..YamlReportOptions::default()
        });
        let mut out = Vec::new();
        let outcome = formatter.format(&features, &mut out).expect("format failed");
        assert_eq!(outcome, ReportOutcome::Skipped);
        assert!(out.is_empty());
    }
}
