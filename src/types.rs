//! Test-result data model.
//!
//! The renderers consume this graph read-only: features own scenarios, which
//! own ordered steps, which may own sub-steps and structured parameter
//! results. Instances usually come from a test-framework adapter or from
//! serialized run output; everything here derives serde for that reason.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label marking a scenario as the primary expected-success case.
pub const HAPPY_PATH_LABEL: &str = "Happy Path";

/// Execution status of a scenario or step, ordered by severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ExecutionStatus {
    #[default]
    NotRun,
    Passed,
    Bypassed,
    Ignored,
    Failed,
}

impl ExecutionStatus {
    pub const ALL: [ExecutionStatus; 5] = [
        ExecutionStatus::NotRun,
        ExecutionStatus::Passed,
        ExecutionStatus::Bypassed,
        ExecutionStatus::Ignored,
        ExecutionStatus::Failed,
    ];

    /// CSS class token and filter value for this status.
    pub fn css_class(self) -> &'static str {
        match self {
            ExecutionStatus::NotRun => "notrun",
            ExecutionStatus::Passed => "passed",
            ExecutionStatus::Bypassed => "bypassed",
            ExecutionStatus::Ignored => "ignored",
            ExecutionStatus::Failed => "failed",
        }
    }

    /// Human-readable name, as shown in filter labels and summaries.
    pub fn display(self) -> &'static str {
        match self {
            ExecutionStatus::NotRun => "Not Run",
            ExecutionStatus::Passed => "Passed",
            ExecutionStatus::Bypassed => "Bypassed",
            ExecutionStatus::Ignored => "Ignored",
            ExecutionStatus::Failed => "Failed",
        }
    }
}

/// Verification outcome of a single compared value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    #[default]
    NotApplicable,
    Success,
    Failure,
}

impl VerificationStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            VerificationStatus::NotApplicable => "notapplicable",
            VerificationStatus::Success => "success",
            VerificationStatus::Failure => "failure",
        }
    }
}

/// When a scenario or step actually ran, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionTime {
    pub start: DateTime<Utc>,
    pub duration: Duration,
}

impl ExecutionTime {
    pub fn new(start: DateTime<Utc>, duration: Duration) -> Self {
        ExecutionTime { start, duration }
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + chrono::Duration::from_std(self.duration).unwrap_or_else(|_| chrono::Duration::zero())
    }
}

/// A name with inline parameter placeholders (`{0}`, `{1}`, …) plus the
/// already-evaluated parameter values to substitute into them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedName {
    pub format: String,
    #[serde(default)]
    pub parameters: Vec<NameParameter>,
}

/// One inline parameter of a [`FormattedName`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameParameter {
    pub formatted_value: String,
    #[serde(default)]
    pub evaluated: bool,
    #[serde(default)]
    pub verification_status: VerificationStatus,
}

impl FormattedName {
    pub fn new(format: impl Into<String>, parameters: Vec<NameParameter>) -> Self {
        FormattedName {
            format: format.into(),
            parameters,
        }
    }

    /// Substitute each placeholder with a rendering chosen by the caller.
    ///
    /// `literal` maps the plain-text segments between placeholders,
    /// `param` maps each referenced parameter. Placeholders referencing a
    /// missing parameter, and brace runs that are not `{N}`, pass through as
    /// literal text.
    pub fn format_with(
        &self,
        literal: impl Fn(&str) -> String,
        param: impl Fn(&NameParameter) -> String,
    ) -> String {
        let mut result = String::with_capacity(self.format.len());
        let mut rest = self.format.as_str();
        loop {
            let Some(open) = rest.find('{') else {
                result.push_str(&literal(rest));
                break;
            };
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                result.push_str(&literal(rest));
                break;
            };
            let index = &rest[open + 1..close];
            match index.parse::<usize>().ok().and_then(|i| self.parameters.get(i)) {
                Some(p) => {
                    result.push_str(&literal(&rest[..open]));
                    result.push_str(&param(p));
                }
                None => result.push_str(&literal(&rest[..=close])),
            }
            rest = &rest[close + 1..];
        }
        result
    }

    /// Plain-text rendering with raw parameter values substituted.
    pub fn plain(&self) -> String {
        self.format_with(str::to_string, |p| p.formatted_value.clone())
    }
}

impl From<&str> for FormattedName {
    fn from(format: &str) -> Self {
        FormattedName::new(format, Vec::new())
    }
}

impl From<String> for FormattedName {
    fn from(format: String) -> Self {
        FormattedName::new(format, Vec::new())
    }
}

/// Top level of the result graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureResult {
    pub name: FormattedName,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: FormattedName,
    /// Stable identity within the run, used to attach diagrams.
    #[serde(default)]
    pub runtime_id: String,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default)]
    pub status_details: Option<String>,
    #[serde(default)]
    pub execution_time: Option<ExecutionTime>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub steps: Vec<StepResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub name: FormattedName,
    #[serde(default)]
    pub runtime_id: String,
    /// Numbering prefix inherited from the parent step, e.g. `"2."` for the
    /// sub-steps of step 2. Empty for top-level steps.
    #[serde(default)]
    pub group_prefix: String,
    /// One-based position within the owning group.
    #[serde(default)]
    pub number: usize,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default)]
    pub execution_time: Option<ExecutionTime>,
    #[serde(default)]
    pub parameters: Vec<ParameterResult>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
    #[serde(default)]
    pub sub_steps: Vec<StepResult>,
}

/// A structured step parameter captured for comparison display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterResult {
    pub name: String,
    pub details: ParameterDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterDetails {
    Tabular(TabularParameterDetails),
    Tree(TreeParameterDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularParameterDetails {
    #[serde(default)]
    pub verification_status: VerificationStatus,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    #[serde(default)]
    pub is_key: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableRowType {
    #[default]
    Normal,
    /// Present in the actual data but not expected.
    Surplus,
    /// Expected but absent from the actual data.
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub row_type: TableRowType,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    pub values: Vec<ValueResult>,
}

/// An actual value with its verification outcome and, on failure, the
/// expected value it was compared against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueResult {
    pub value: String,
    #[serde(default)]
    pub expectation: Option<String>,
    #[serde(default)]
    pub verification_status: VerificationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeParameterDetails {
    pub root: TreeNode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub value: ValueResult,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

/// A file produced by a step and saved next to the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub file_path: String,
    pub relative_path: String,
}

impl FileAttachment {
    /// Link target with forward slashes regardless of platform separators.
    pub fn link(&self) -> String {
        self.relative_path.replace('\\', "/")
    }

    /// File extension without the leading dot, for display.
    pub fn extension(&self) -> &str {
        self.file_path.rsplit('.').next().unwrap_or("")
    }
}

/// An externally generated diagram image plus its textual source, attached
/// to the scenario whose runtime id it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramAsCode {
    pub scenario_runtime_id: String,
    pub img_src: String,
    pub code_behind: String,
}

/// Load a feature-result collection from its JSON representation, as
/// emitted by test-runner adapters.
pub fn features_from_json(json: &str) -> Result<Vec<FeatureResult>, crate::error::ReportError> {
    Ok(serde_json::from_str(json)?)
}

impl FeatureResult {
    pub fn count_scenarios_with_status(&self, status: ExecutionStatus) -> usize {
        self.scenarios.iter().filter(|s| s.status == status).count()
    }

    /// Count every step in the feature, including sub-steps.
    pub fn count_steps(&self) -> usize {
        self.scenarios.iter().map(|s| s.all_steps().len()).sum()
    }

    pub fn count_steps_with_status(&self, status: ExecutionStatus) -> usize {
        self.scenarios
            .iter()
            .flat_map(ScenarioResult::all_steps)
            .filter(|s| s.status == status)
            .count()
    }
}

impl ScenarioResult {
    pub fn is_happy_path(&self) -> bool {
        self.labels.iter().any(|l| l == HAPPY_PATH_LABEL)
    }

    /// All steps of the scenario flattened depth-first, sub-steps included.
    pub fn all_steps(&self) -> Vec<&StepResult> {
        fn collect<'a>(steps: &'a [StepResult], into: &mut Vec<&'a StepResult>) {
            for step in steps {
                into.push(step);
                collect(&step.sub_steps, into);
            }
        }
        let mut all = Vec::new();
        collect(&self.steps, &mut all);
        all
    }
}

impl StepResult {
    pub fn has_sub_steps(&self) -> bool {
        !self.sub_steps.is_empty()
    }
}

// -----------------------------------------------------------------------
// Run-level aggregation
// -----------------------------------------------------------------------

pub fn count_scenarios(features: &[FeatureResult]) -> usize {
    features.iter().map(|f| f.scenarios.len()).sum()
}

pub fn count_scenarios_with_status(features: &[FeatureResult], status: ExecutionStatus) -> usize {
    features
        .iter()
        .map(|f| f.count_scenarios_with_status(status))
        .sum()
}

pub fn count_steps(features: &[FeatureResult]) -> usize {
    features.iter().map(FeatureResult::count_steps).sum()
}

pub fn count_steps_with_status(features: &[FeatureResult], status: ExecutionStatus) -> usize {
    features
        .iter()
        .map(|f| f.count_steps_with_status(status))
        .sum()
}

/// Overall run status for display: the maximum-severity scenario status,
/// collapsed to `Passed` for anything below `Failed`. An empty run counts
/// as `Passed`.
pub fn overall_status(features: &[FeatureResult]) -> ExecutionStatus {
    let max = features
        .iter()
        .flat_map(|f| f.scenarios.iter())
        .map(|s| s.status)
        .max()
        .unwrap_or(ExecutionStatus::NotRun);
    if max == ExecutionStatus::Failed {
        ExecutionStatus::Failed
    } else {
        ExecutionStatus::Passed
    }
}

/// Wall-clock and aggregate timing over a set of executed scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSummary {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Wall-clock span from earliest start to latest end.
    pub duration: Duration,
    /// Sum of the individual scenario durations.
    pub aggregated: Duration,
    /// Mean scenario duration.
    pub average: Duration,
}

impl TimeSummary {
    fn of(times: impl Iterator<Item = ExecutionTime>) -> TimeSummary {
        let times: Vec<ExecutionTime> = times.collect();
        if times.is_empty() {
            return TimeSummary {
                start: DateTime::UNIX_EPOCH,
                end: DateTime::UNIX_EPOCH,
                duration: Duration::ZERO,
                aggregated: Duration::ZERO,
                average: Duration::ZERO,
            };
        }
        let start = times.iter().map(|t| t.start).min().unwrap_or(DateTime::UNIX_EPOCH);
        let end = times.iter().map(ExecutionTime::end).max().unwrap_or(DateTime::UNIX_EPOCH);
        let aggregated = times.iter().map(|t| t.duration).sum::<Duration>();
        TimeSummary {
            start,
            end,
            duration: (end - start).to_std().unwrap_or(Duration::ZERO),
            aggregated,
            average: aggregated / times.len() as u32,
        }
    }
}

/// Timing summary across every scenario of the run.
pub fn time_summary(features: &[FeatureResult]) -> TimeSummary {
    scenarios_time_summary(features.iter().flat_map(|f| f.scenarios.iter()))
}

/// Timing summary over an explicit scenario set, e.g. one feature's.
pub fn scenarios_time_summary<'a>(
    scenarios: impl IntoIterator<Item = &'a ScenarioResult>,
) -> TimeSummary {
    TimeSummary::of(scenarios.into_iter().filter_map(|s| s.execution_time))
}

/// Format a duration with its two most significant units, e.g. `1m 02s`,
/// `2s 350ms`, `350ms`.
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    let (days, rem) = (ms / 86_400_000, ms % 86_400_000);
    let (hours, rem) = (rem / 3_600_000, rem % 3_600_000);
    let (minutes, rem) = (rem / 60_000, rem % 60_000);
    let (seconds, millis) = (rem / 1_000, rem % 1_000);

    if days > 0 {
        format!("{days}d {hours:02}h")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else if seconds > 0 {
        format!("{seconds}s {millis:03}ms")
    } else {
        format!("{millis}ms")
    }
}

/// Raw sortable value backing a formatted duration.
pub fn duration_millis(duration: Duration) -> u128 {
    duration.as_millis()
}

// -----------------------------------------------------------------------
// Ordering policy
// -----------------------------------------------------------------------

/// How scenarios are ordered within a feature when rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioOrdering {
    /// Alphabetical by formatted name.
    #[default]
    ByName,
    /// Happy-path scenarios after the rest, alphabetical within each group.
    HappyPathLast,
}

impl ScenarioOrdering {
    pub fn apply<'a>(self, scenarios: &'a [ScenarioResult]) -> Vec<&'a ScenarioResult> {
        let mut ordered: Vec<&ScenarioResult> = scenarios.iter().collect();
        match self {
            ScenarioOrdering::ByName => ordered.sort_by_key(|s| s.name.plain()),
            ScenarioOrdering::HappyPathLast => {
                ordered.sort_by_key(|s| (s.is_happy_path(), s.name.plain()));
            }
        }
        ordered
    }
}

// -----------------------------------------------------------------------
// Report gating
// -----------------------------------------------------------------------

/// Conditions under which a report is produced at all. Both gates are
/// independent; failing either is a deliberate no-output outcome, not an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunGate {
    /// Skip the report when any scenario failed.
    pub only_on_fully_successful: bool,
    /// Skip the report unless executed scenarios (plus the ignored count)
    /// match this externally discovered total.
    pub expected_test_total: Option<usize>,
    /// Scenarios ignored at runtime and therefore absent from the results;
    /// see [`IgnoredScenarios`].
    pub ignored_scenario_count: usize,
}

/// Decide whether the run qualifies for a report under `gate`.
pub fn run_is_reportable(features: &[FeatureResult], gate: &RunGate) -> bool {
    if gate.only_on_fully_successful
        && count_scenarios_with_status(features, ExecutionStatus::Failed) > 0
    {
        tracing::debug!("report skipped: run contains failed scenarios");
        return false;
    }
    if let Some(expected) = gate.expected_test_total {
        let executed = count_scenarios(features) + gate.ignored_scenario_count;
        if executed != expected {
            tracing::debug!(executed, expected, "report skipped: partial test run");
            return false;
        }
    }
    true
}

/// Counter for scenarios ignored mid-execution, which test frameworks tend
/// to omit from the result set they hand to formatters. The test-run context
/// owns one and increments it from wherever scenarios get ignored; its value
/// feeds the full-run gate.
#[derive(Debug, Default)]
pub struct IgnoredScenarios(AtomicUsize);

impl IgnoredScenarios {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn scenario(name: &str, status: ExecutionStatus) -> ScenarioResult {
        ScenarioResult {
            name: name.into(),
            status,
            ..ScenarioResult::default()
        }
    }

    fn run(statuses: &[ExecutionStatus]) -> Vec<FeatureResult> {
        vec![FeatureResult {
            name: "F".into(),
            scenarios: statuses
                .iter()
                .map(|s| scenario("s", *s))
                .collect(),
            ..FeatureResult::default()
        }]
    }

    #[test]
    fn status_severity_order() {
        assert!(ExecutionStatus::Failed > ExecutionStatus::Ignored);
        assert!(ExecutionStatus::Ignored > ExecutionStatus::Bypassed);
        assert!(ExecutionStatus::Bypassed > ExecutionStatus::Passed);
        assert!(ExecutionStatus::Passed > ExecutionStatus::NotRun);
    }

    #[test]
    fn overall_status_collapses_below_failed() {
        use ExecutionStatus::*;
        assert_eq!(overall_status(&run(&[Passed, Bypassed, Ignored])), Passed);
        assert_eq!(overall_status(&run(&[Passed, Failed])), Failed);
        assert_eq!(overall_status(&run(&[])), Passed);
    }

    #[test]
    fn formatted_name_substitutes_placeholders() {
        let name = FormattedName::new(
            "adds {0} and {1}",
            vec![
                NameParameter {
                    formatted_value: "2".into(),
                    evaluated: true,
                    verification_status: VerificationStatus::NotApplicable,
                },
                NameParameter {
                    formatted_value: "3".into(),
                    evaluated: true,
                    verification_status: VerificationStatus::NotApplicable,
                },
            ],
        );
        assert_eq!(name.plain(), "adds 2 and 3");
    }

    #[test]
    fn formatted_name_leaves_odd_braces_alone() {
        let name = FormattedName::new("set {x} to {9}", Vec::new());
        assert_eq!(name.plain(), "set {x} to {9}");
    }

    #[test]
    fn steps_count_recursively() {
        let features = vec![FeatureResult {
            name: "F".into(),
            scenarios: vec![ScenarioResult {
                name: "S".into(),
                steps: vec![StepResult {
                    name: "outer".into(),
                    status: ExecutionStatus::Passed,
                    sub_steps: vec![
                        StepResult {
                            name: "inner".into(),
                            status: ExecutionStatus::Passed,
                            ..StepResult::default()
                        },
                        StepResult {
                            name: "inner2".into(),
                            status: ExecutionStatus::Failed,
                            ..StepResult::default()
                        },
                    ],
                    ..StepResult::default()
                }],
                ..ScenarioResult::default()
            }],
            ..FeatureResult::default()
        }];
        assert_eq!(count_steps(&features), 3);
        assert_eq!(count_steps_with_status(&features, ExecutionStatus::Passed), 2);
        assert_eq!(count_steps_with_status(&features, ExecutionStatus::Failed), 1);
    }

    #[test]
    fn time_summary_aggregates() {
        let t0 = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
        let mut features = run(&[ExecutionStatus::Passed, ExecutionStatus::Passed]);
        features[0].scenarios[0].execution_time =
            Some(ExecutionTime::new(t0, Duration::from_secs(2)));
        features[0].scenarios[1].execution_time = Some(ExecutionTime::new(
            t0 + chrono::Duration::seconds(5),
            Duration::from_secs(4),
        ));

        let summary = time_summary(&features);
        assert_eq!(summary.start, t0);
        assert_eq!(summary.end, t0 + chrono::Duration::seconds(9));
        assert_eq!(summary.duration, Duration::from_secs(9));
        assert_eq!(summary.aggregated, Duration::from_secs(6));
        assert_eq!(summary.average, Duration::from_secs(3));
    }

    #[test]
    fn pretty_durations() {
        assert_eq!(format_duration(Duration::ZERO), "0ms");
        assert_eq!(format_duration(Duration::from_millis(350)), "350ms");
        assert_eq!(format_duration(Duration::from_millis(2_350)), "2s 350ms");
        assert_eq!(format_duration(Duration::from_secs(62)), "1m 02s");
        assert_eq!(format_duration(Duration::from_secs(3_720)), "1h 02m");
    }

    #[test]
    fn happy_path_sorts_last() {
        let mut scenarios = vec![
            scenario("zulu", ExecutionStatus::Passed),
            scenario("alpha", ExecutionStatus::Passed),
            scenario("mike", ExecutionStatus::Passed),
        ];
        scenarios[2].labels.push(HAPPY_PATH_LABEL.to_string());

        let by_name: Vec<String> = ScenarioOrdering::ByName
            .apply(&scenarios)
            .iter()
            .map(|s| s.name.plain())
            .collect();
        assert_eq!(by_name, ["alpha", "mike", "zulu"]);

        let happy_last: Vec<String> = ScenarioOrdering::HappyPathLast
            .apply(&scenarios)
            .iter()
            .map(|s| s.name.plain())
            .collect();
        assert_eq!(happy_last, ["alpha", "zulu", "mike"]);
    }

    #[test]
    fn full_run_gate_counts_ignored() {
        let features = run(&[ExecutionStatus::Passed; 5]);
        let gate = RunGate {
            expected_test_total: Some(7),
            ..RunGate::default()
        };
        assert!(!run_is_reportable(&features, &gate));

        let gate = RunGate {
            expected_test_total: Some(7),
            ignored_scenario_count: 2,
            ..RunGate::default()
        };
        assert!(run_is_reportable(&features, &gate));
    }

    #[test]
    fn fully_successful_gate() {
        use ExecutionStatus::*;
        let gate = RunGate {
            only_on_fully_successful: true,
            ..RunGate::default()
        };
        assert!(run_is_reportable(&run(&[Passed, Ignored]), &gate));
        assert!(!run_is_reportable(&run(&[Passed, Failed]), &gate));
    }

    #[test]
    fn ignored_counter() {
        let counter = IgnoredScenarios::new();
        counter.increment();
        counter.increment();
        assert_eq!(counter.count(), 2);
    }
}
