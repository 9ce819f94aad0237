//! Interactive HTML report renderer.
//!
//! Maps the result graph onto the markup model in `crate::html` and streams
//! it out as a single self-contained HTML5 document: inline styles and
//! scripts, data-URI images, and the data attributes the embedded script
//! uses for filtering, searching and collapsing.
//!
//! The mapping is a deterministic pure function of the results plus
//! [`HtmlReportOptions`]; every option is read at exactly one point below.

use std::cell::Cell;
use std::io;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::ReportError;
use crate::html::{self, Element, HtmlNode, Tag, Text, escape_html, tag};
use crate::types::{
    DiagramAsCode, ExecutionStatus, ExecutionTime, FeatureResult, FormattedName, ParameterDetails,
    ParameterResult, RunGate, ScenarioOrdering, ScenarioResult, StepResult,
    TabularParameterDetails, TableRow, TableRowType, TreeNode, TreeParameterDetails,
    ValueResult, VerificationStatus, count_scenarios, count_scenarios_with_status, count_steps,
    count_steps_with_status, duration_millis, format_duration, run_is_reportable,
    scenarios_time_summary, time_summary,
};

const REPOSITORY_URL: &str = "https://github.com/bdd-report/bdd-report";

/// Whether a formatter produced a document or deliberately skipped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Written,
    Skipped,
}

/// An image embedded into the report as a data URI.
///
/// Constructing one validates the input; a blank MIME type or empty body is
/// a misuse reported immediately rather than at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    mime_type: String,
    bytes: Vec<u8>,
}

impl EmbeddedImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ReportError> {
        let mime_type = mime_type.into();
        if mime_type.trim().is_empty() {
            return Err(ReportError::InvalidImage {
                reason: "MIME type needs to be specified",
            });
        }
        if bytes.is_empty() {
            return Err(ReportError::InvalidImage {
                reason: "image body is empty",
            });
        }
        Ok(EmbeddedImage { mime_type, bytes })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }
}

/// The immutable resource bundle a report is written with: stylesheet,
/// script and logo compiled into the binary. Construct once, reuse across
/// reports; there is no hidden global.
#[derive(Debug, Clone)]
pub struct ReportAssets {
    styles: &'static str,
    scripts: &'static str,
    logo_svg: &'static str,
}

impl ReportAssets {
    /// The assets bundled with the crate.
    pub fn bundled() -> Self {
        ReportAssets {
            styles: include_str!("../assets/report.css"),
            scripts: include_str!("../assets/report.js"),
            logo_svg: include_str!("../assets/logo.svg"),
        }
    }

    fn logo_data_uri(&self) -> String {
        format!(
            "data:image/svg+xml;base64,{}",
            BASE64.encode(self.logo_svg.as_bytes())
        )
    }
}

impl Default for ReportAssets {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Everything that shapes what the HTML mapper emits.
#[derive(Debug, Clone)]
pub struct HtmlReportOptions {
    /// Heading of the feature-details section.
    pub title: String,
    pub include_execution_summary: bool,
    pub include_feature_summary: bool,
    /// `true`: element identifiers derive from document position and stay
    /// stable across regenerations of the same results, and shareable
    /// deep-links are emitted. `false`: a per-document counter issues
    /// synthetic ids (unique within the document only) and deep-links are
    /// suppressed.
    pub write_stable_ids: bool,
    pub include_durations: bool,
    pub show_status_filter_toggles: bool,
    pub show_happy_path_toggle: bool,
    pub show_diagrams_toggle: bool,
    /// Initial collapsed state for the feature/scenario/sub-step toggles.
    pub steps_collapsed_initially: bool,
    pub only_on_fully_successful: bool,
    /// Externally discovered total test count; when set, a partial run
    /// produces no report.
    pub expected_test_total: Option<usize>,
    /// Scenarios ignored at runtime and absent from the result set, counted
    /// toward the full-run gate. See [`crate::types::IgnoredScenarios`].
    pub ignored_scenario_count: usize,
    /// Extra CSS appended after the bundled stylesheet.
    pub custom_css: String,
    pub custom_logo: Option<EmbeddedImage>,
    pub custom_favicon: Option<EmbeddedImage>,
    pub example_diagrams: Vec<DiagramAsCode>,
    /// Heading shown above each diagram's source text.
    pub diagram_source_title: String,
    pub lazy_load_diagram_images: bool,
    /// Render matching scenarios with `Passed` status while keeping their
    /// real failure details visible.
    pub treat_as_passed: Option<fn(&ScenarioResult) -> bool>,
    pub scenario_ordering: ScenarioOrdering,
}

impl Default for HtmlReportOptions {
    fn default() -> Self {
        HtmlReportOptions {
            title: "Feature details".to_string(),
            include_execution_summary: true,
            include_feature_summary: true,
            write_stable_ids: true,
            include_durations: true,
            show_status_filter_toggles: true,
            show_happy_path_toggle: true,
            show_diagrams_toggle: true,
            steps_collapsed_initially: true,
            only_on_fully_successful: false,
            expected_test_total: None,
            ignored_scenario_count: 0,
            custom_css: String::new(),
            custom_logo: None,
            custom_favicon: None,
            example_diagrams: Vec::new(),
            diagram_source_title: "Diagram source".to_string(),
            lazy_load_diagram_images: true,
            treat_as_passed: None,
            scenario_ordering: ScenarioOrdering::ByName,
        }
    }
}

impl HtmlReportOptions {
    /// Profile for publishing living specifications: no summaries, no
    /// durations, anonymous identifiers, and a report only when the full
    /// run passed.
    pub fn specifications(expected_test_total: usize) -> Self {
        HtmlReportOptions {
            title: "Specifications".to_string(),
            include_execution_summary: false,
            include_feature_summary: false,
            write_stable_ids: false,
            include_durations: false,
            show_status_filter_toggles: false,
            only_on_fully_successful: true,
            expected_test_total: Some(expected_test_total),
            ..HtmlReportOptions::default()
        }
    }

    /// Append a CSS fragment to the report, overriding bundled styles.
    pub fn with_custom_css(mut self, css: &str) -> Self {
        self.custom_css.push('\n');
        self.custom_css.push_str(css);
        self
    }

    /// Replace the bundled logo. Fails fast on a blank MIME type or empty
    /// image body.
    pub fn with_custom_logo(
        mut self,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ReportError> {
        self.custom_logo = Some(EmbeddedImage::new(mime_type, bytes)?);
        Ok(self)
    }

    /// Replace the bundled favicon. Fails fast on a blank MIME type or
    /// empty image body.
    pub fn with_custom_favicon(
        mut self,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ReportError> {
        self.custom_favicon = Some(EmbeddedImage::new(mime_type, bytes)?);
        Ok(self)
    }

    fn gate(&self) -> RunGate {
        RunGate {
            only_on_fully_successful: self.only_on_fully_successful,
            expected_test_total: self.expected_test_total,
            ignored_scenario_count: self.ignored_scenario_count,
        }
    }
}

/// Formats feature results as a self-contained HTML document.
#[derive(Debug, Clone, Default)]
pub struct HtmlReportFormatter {
    options: HtmlReportOptions,
    assets: ReportAssets,
}

impl HtmlReportFormatter {
    pub fn new(options: HtmlReportOptions) -> Self {
        HtmlReportFormatter {
            options,
            assets: ReportAssets::bundled(),
        }
    }

    /// Use a caller-owned asset bundle instead of the compiled-in one.
    pub fn with_assets(mut self, assets: ReportAssets) -> Self {
        self.assets = assets;
        self
    }

    /// Render the report for `features` into `out`.
    ///
    /// Returns [`ReportOutcome::Skipped`] without touching `out` when the
    /// run does not pass the configured gates.
    pub fn format(
        &self,
        features: &[FeatureResult],
        out: &mut dyn io::Write,
    ) -> Result<ReportOutcome, ReportError> {
        if !run_is_reportable(features, &self.options.gate()) {
            return Ok(ReportOutcome::Skipped);
        }
        let writer = ReportWriter {
            features,
            options: &self.options,
            assets: &self.assets,
            categories: CategoryIndex::from_features(features),
            id_seq: Cell::new(0),
        };
        writer.write_document(out)?;
        tracing::debug!(features = features.len(), "html report written");
        Ok(ReportOutcome::Written)
    }

    /// Render into an owned string; `None` when the run was gated away.
    pub fn format_to_string(
        &self,
        features: &[FeatureResult],
    ) -> Result<Option<String>, ReportError> {
        let mut buf = Vec::new();
        match self.format(features, &mut buf)? {
            ReportOutcome::Written => Ok(Some(String::from_utf8_lossy(&buf).into_owned())),
            ReportOutcome::Skipped => Ok(None),
        }
    }
}

/// Category name to short filter token, in first-seen order across the run.
///
/// Tokens keep per-scenario `data-categories` attributes compact; the index
/// lives for one report generation.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    names: Vec<String>,
}

impl CategoryIndex {
    pub fn from_features(features: &[FeatureResult]) -> Self {
        let mut names: Vec<String> = Vec::new();
        for category in features
            .iter()
            .flat_map(|f| f.scenarios.iter())
            .flat_map(|s| s.categories.iter())
        {
            if !names.iter().any(|n| n == category) {
                names.push(category.clone());
            }
        }
        CategoryIndex { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The short token for `category`, e.g. `_0_` for the first one seen.
    pub fn token(&self, category: &str) -> Option<String> {
        self.names
            .iter()
            .position(|n| n == category)
            .map(|i| format!("_{i}_"))
    }

    /// Category names sorted for presentation in the filter panel.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.names.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}

struct ReportWriter<'a> {
    features: &'a [FeatureResult],
    options: &'a HtmlReportOptions,
    assets: &'a ReportAssets,
    categories: CategoryIndex,
    id_seq: Cell<usize>,
}

impl ReportWriter<'_> {
    fn write_document(&self, out: &mut dyn io::Write) -> io::Result<()> {
        HtmlNode::from(Text::new("<!DOCTYPE HTML>")).write(out)?;
        let document: HtmlNode = tag(Tag::Html)
            .attr("lang", "en")
            .child(self.head())
            .child(self.body())
            .into();
        document.write(out)
    }

    fn head(&self) -> Element {
        tag(Tag::Head)
            .child(tag(Tag::Meta).attr("charset", "UTF-8"))
            .child(
                tag(Tag::Meta)
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            )
            .child(self.favicon())
            .child(tag(Tag::Title).text("Summary"))
            .child(tag(Tag::Style).raw_text(self.embedded_css_images()))
            .child(tag(Tag::Style).raw_text(self.assets.styles))
            .child(
                tag(Tag::Style)
                    .skip_empty()
                    .child(Text::new(self.options.custom_css.clone()).skip_if_empty()),
            )
            .child(tag(Tag::Script).raw_text(self.assets.scripts))
    }

    fn body(&self) -> Element {
        let mut body = tag(Tag::Body);
        if self.options.include_execution_summary {
            body = body.child(self.execution_summary());
        }
        if self.options.include_feature_summary {
            body = body.child(self.feature_summary());
        }
        body.child(self.feature_details())
            .child(
                tag(Tag::Div).class("footer").text("Generated with ").child(
                    tag(Tag::A)
                        .href(REPOSITORY_URL)
                        .text(format!("bdd-report v{}", env!("CARGO_PKG_VERSION"))),
                ),
            )
            .child(tag(Tag::Script).raw_text("initialize();"))
    }

    fn favicon(&self) -> Element {
        let (mime, href) = match &self.options.custom_favicon {
            Some(image) => (image.mime_type().to_string(), image.data_uri()),
            None => ("image/svg+xml".to_string(), self.assets.logo_data_uri()),
        };
        tag(Tag::Link)
            .attr("rel", "icon")
            .attr("type", mime)
            .attr("href", href)
    }

    /// CSS variables carrying the logo so the stylesheet can place it.
    fn embedded_css_images(&self) -> String {
        let uri = match &self.options.custom_logo {
            Some(image) => image.data_uri(),
            None => self.assets.logo_data_uri(),
        };
        format!("html {{\n--logo-ico: url('{uri}');\n}}")
    }

    /// Position-derived id in stable mode, counter-issued otherwise.
    fn element_id(&self, stable: impl FnOnce() -> String) -> String {
        if self.options.write_stable_ids {
            stable()
        } else {
            let next = self.id_seq.get() + 1;
            self.id_seq.set(next);
            format!("e{next}")
        }
    }

    fn name_html(&self, name: &FormattedName) -> String {
        name.format_with(escape_html, |p| {
            let status = if p.evaluated {
                p.verification_status.css_class()
            } else {
                "unknown"
            };
            HtmlNode::from(
                tag(Tag::Span)
                    .class(format!("inline-param {status}"))
                    .text(p.formatted_value.clone()),
            )
            .to_html_string()
        })
    }

    // -- Execution summary ----------------------------------------------

    fn execution_summary(&self) -> Element {
        let times = time_summary(self.features);
        let bypassed = count_scenarios_with_status(self.features, ExecutionStatus::Bypassed);
        let failed = count_scenarios_with_status(self.features, ExecutionStatus::Failed);
        let ignored = count_scenarios_with_status(self.features, ExecutionStatus::Ignored);

        tag(Tag::Section)
            .class("execution-summary")
            .child(tag(Tag::H1).text("Test execution summary"))
            .child(
                tag(Tag::Div)
                    .class("content")
                    .child(
                        tag(Tag::Table)
                            .child(self.kv_header_row("Execution"))
                            .child(self.overall_status_row())
                            .child(self.kv_row(
                                "Start date:",
                                times.start.format("%Y-%m-%d (UTC)").to_string(),
                            ))
                            .child(
                                self.kv_row("Start time:", times.start.format("%H:%M:%S").to_string()),
                            )
                            .child(self.kv_row("End time:", times.end.format("%H:%M:%S").to_string()))
                            .child(self.kv_row("Duration:", format_duration(times.duration))),
                    )
                    .child(
                        tag(Tag::Table)
                            .child(self.kv_header_row("Content"))
                            .child(self.kv_row("Features:", self.features.len().to_string()))
                            .child(
                                self.kv_row("Scenarios:", count_scenarios(self.features).to_string()),
                            )
                            .child(self.kv_row(
                                "Passed scenarios:",
                                count_scenarios_with_status(self.features, ExecutionStatus::Passed)
                                    .to_string(),
                            ))
                            .child(self.kv_alert_row(
                                "Bypassed scenarios:",
                                bypassed,
                                "bypassedAlert",
                                "bypassedDetails",
                            ))
                            .child(self.kv_alert_row(
                                "Failed scenarios:",
                                failed,
                                "failedAlert",
                                "failedDetails",
                            ))
                            .child(self.kv_alert_row(
                                "Ignored scenarios:",
                                ignored,
                                "ignoredAlert",
                                "ignoredDetails",
                            )),
                    ),
            )
    }

    fn overall_status_row(&self) -> Element {
        let status = crate::types::overall_status(self.features);
        tag(Tag::Tr)
            .child(tag(Tag::Th).text("Overall status:"))
            .child(
                tag(Tag::Td)
                    .class(format!("overall-status {}", status.css_class()))
                    .text(status.display()),
            )
    }

    fn kv_row(&self, key: &str, value: String) -> Element {
        tag(Tag::Tr)
            .child(tag(Tag::Th).text(key))
            .child(tag(Tag::Td).text(value))
    }

    fn kv_header_row(&self, key: &str) -> Element {
        tag(Tag::Tr).child(
            tag(Tag::Th)
                .class("subHeader")
                .attr("colspan", "2")
                .text(key),
        )
    }

    /// Count row with an alert class and a details link; omitted when zero.
    fn kv_alert_row(
        &self,
        key: &str,
        value: usize,
        alert_class: &str,
        details_id: &str,
    ) -> HtmlNode {
        if value == 0 {
            return html::nothing();
        }
        tag(Tag::Tr)
            .child(tag(Tag::Th).text(key))
            .child(
                tag(Tag::Td)
                    .child(
                        tag(Tag::Span)
                            .class(alert_class.to_string())
                            .text(value.to_string()),
                    )
                    .child(
                        tag(Tag::A)
                            .id(details_id)
                            .href("#")
                            .text("(see details)")
                            .space_before(),
                    ),
            )
            .into()
    }

    // -- Feature summary ------------------------------------------------

    fn feature_summary(&self) -> Element {
        tag(Tag::Section)
            .class("features-summary")
            .child(tag(Tag::H1).text("Feature summary"))
            .child(
                tag(Tag::Div).class("content").child(
                    tag(Tag::Table)
                        .id("featuresSummary")
                        .class("features")
                        .child(self.summary_table_headers())
                        .child(
                            tag(Tag::Tbody).children(
                                self.features
                                    .iter()
                                    .enumerate()
                                    .map(|(i, f)| self.feature_summary_row(f, i + 1)),
                            ),
                        )
                        .child(self.summary_footer()),
                ),
            )
    }

    /// Header row. Duration columns sort by the hidden raw-millisecond
    /// column that follows each formatted one.
    fn summary_table_headers(&self) -> Element {
        let headers: [(&str, &str, usize, bool); 18] = [
            ("Feature", "sortable", 0, false),
            ("Scenarios", "sortable", 1, true),
            ("Passed", "sortable minor", 2, true),
            ("Bypassed", "sortable minor", 3, true),
            ("Failed", "sortable minor", 4, true),
            ("Ignored", "sortable minor", 5, true),
            ("Steps", "sortable", 6, true),
            ("Passed", "sortable minor", 7, true),
            ("Bypassed", "sortable minor", 8, true),
            ("Failed", "sortable minor", 9, true),
            ("Ignored", "sortable minor", 10, true),
            ("Not Run", "sortable minor", 11, true),
            ("Duration", "sortable", 13, true),
            ("", "hidden", 0, false),
            ("Aggregated", "sortable minor", 15, true),
            ("", "hidden", 0, false),
            ("Average", "sortable minor", 17, true),
            ("", "hidden", 0, false),
        ];
        tag(Tag::Thead).child(tag(Tag::Tr).children(headers.map(
            |(text, classes, column, numeric)| {
                let th = tag(Tag::Th).class(classes).text(text);
                if classes == "hidden" {
                    th
                } else {
                    th.on_click(format!("sortTable('featuresSummary',{column},{numeric},this)"))
                }
            },
        )))
    }

    fn feature_summary_row(&self, feature: &FeatureResult, index: usize) -> Element {
        let times = scenarios_time_summary(&feature.scenarios);
        let row = tag(Tag::Tr)
            .child(
                tag(Tag::Td)
                    .child(
                        tag(Tag::A)
                            .href(format!("#feature{index}"))
                            .raw_text(self.name_html(&feature.name)),
                    )
                    .child(
                        tag(Tag::Span)
                            .skip_empty()
                            .children(feature.labels.iter().map(|l| self.label_span(l))),
                    ),
            )
            .child(tag(Tag::Td).text(feature.scenarios.len().to_string()))
            .child(tag(Tag::Td).text(
                feature
                    .count_scenarios_with_status(ExecutionStatus::Passed)
                    .to_string(),
            ))
            .child(self.numeric_cell(
                "bypassedAlert",
                feature.count_scenarios_with_status(ExecutionStatus::Bypassed),
            ))
            .child(self.numeric_cell(
                "failedAlert",
                feature.count_scenarios_with_status(ExecutionStatus::Failed),
            ))
            .child(self.numeric_cell(
                "ignoredAlert",
                feature.count_scenarios_with_status(ExecutionStatus::Ignored),
            ))
            .child(tag(Tag::Td).text(feature.count_steps().to_string()))
            .child(tag(Tag::Td).text(
                feature
                    .count_steps_with_status(ExecutionStatus::Passed)
                    .to_string(),
            ))
            .child(self.numeric_cell(
                "bypassedAlert",
                feature.count_steps_with_status(ExecutionStatus::Bypassed),
            ))
            .child(self.numeric_cell(
                "failedAlert",
                feature.count_steps_with_status(ExecutionStatus::Failed),
            ))
            .child(self.numeric_cell(
                "ignoredAlert",
                feature.count_steps_with_status(ExecutionStatus::Ignored),
            ))
            .child(tag(Tag::Td).text(
                feature
                    .count_steps_with_status(ExecutionStatus::NotRun)
                    .to_string(),
            ));

        row.children(self.duration_cells(&times))
    }

    fn summary_footer(&self) -> Element {
        let times = time_summary(self.features);
        let row = tag(Tag::Tr)
            .child(tag(Tag::Td).text("Totals"))
            .child(tag(Tag::Td).text(count_scenarios(self.features).to_string()))
            .child(tag(Tag::Td).text(
                count_scenarios_with_status(self.features, ExecutionStatus::Passed).to_string(),
            ))
            .child(self.numeric_cell(
                "bypassedAlert",
                count_scenarios_with_status(self.features, ExecutionStatus::Bypassed),
            ))
            .child(self.numeric_cell(
                "failedAlert",
                count_scenarios_with_status(self.features, ExecutionStatus::Failed),
            ))
            .child(self.numeric_cell(
                "ignoredAlert",
                count_scenarios_with_status(self.features, ExecutionStatus::Ignored),
            ))
            .child(tag(Tag::Td).text(count_steps(self.features).to_string()))
            .child(tag(Tag::Td).text(
                count_steps_with_status(self.features, ExecutionStatus::Passed).to_string(),
            ))
            .child(self.numeric_cell(
                "bypassedAlert",
                count_steps_with_status(self.features, ExecutionStatus::Bypassed),
            ))
            .child(self.numeric_cell(
                "failedAlert",
                count_steps_with_status(self.features, ExecutionStatus::Failed),
            ))
            .child(self.numeric_cell(
                "ignoredAlert",
                count_steps_with_status(self.features, ExecutionStatus::Ignored),
            ))
            .child(tag(Tag::Td).text(
                count_steps_with_status(self.features, ExecutionStatus::NotRun).to_string(),
            ));

        tag(Tag::Tfoot).child(row.children(self.duration_cells(&times)))
    }

    /// Formatted duration cell plus its hidden raw value, for each of
    /// duration, aggregated and average.
    fn duration_cells(&self, times: &crate::types::TimeSummary) -> Vec<Element> {
        [times.duration, times.aggregated, times.average]
            .iter()
            .flat_map(|d| {
                [
                    tag(Tag::Td).text(format_duration(*d)),
                    tag(Tag::Td)
                        .class("hidden")
                        .text(duration_millis(*d).to_string()),
                ]
            })
            .collect()
    }

    fn numeric_cell(&self, alert_class: &str, value: usize) -> Element {
        let cell = tag(Tag::Td).text(value.to_string());
        if value != 0 {
            cell.class(alert_class.to_string())
        } else {
            cell
        }
    }

    // -- Feature details ------------------------------------------------

    fn feature_details(&self) -> Element {
        let mut section = tag(Tag::Section).class("features").child(
            tag(Tag::H1)
                .id("featureDetails")
                .text(self.options.title.clone())
                .child(self.small_link("featureDetails")),
        );
        section = section.child(
            tag(Tag::Div)
                .class("optionsPanel")
                .child(self.toggle_nodes())
                .child(self.status_filter_nodes())
                .child(self.category_filter_nodes())
                .child(self.free_text_filter())
                .child(
                    tag(Tag::A)
                        .class("shareable")
                        .href("")
                        .id("optionsLink")
                        .raw_text("filtered link")
                        .space_before(),
                ),
        );
        for (i, feature) in self.features.iter().enumerate() {
            section = section.child(self.feature_article(feature, i + 1));
        }
        section
    }

    fn toggle_nodes(&self) -> Element {
        let expanded = !self.options.steps_collapsed_initially;
        tag(Tag::Div)
            .class("options")
            .child(tag(Tag::Span).text("Toggle:"))
            .child(
                tag(Tag::Span)
                    .child(self.option_node(
                        "toggleFeatures",
                        html::checkbox()
                            .checked(expanded)
                            .space_before()
                            .on_click("checkAll('toggleF',toggleFeatures.checked)"),
                        "Features",
                        false,
                    ))
                    .child(self.option_node(
                        "toggleScenarios",
                        html::checkbox()
                            .checked(expanded)
                            .space_before()
                            .on_click("checkAll('toggleS',toggleScenarios.checked)"),
                        "Scenarios",
                        false,
                    ))
                    .child(self.option_node(
                        "toggleSubSteps",
                        html::checkbox()
                            .checked(expanded)
                            .space_before()
                            .on_click("checkAll('toggleSS',toggleSubSteps.checked)"),
                        "Sub Steps",
                        false,
                    ))
                    .child(self.option_node(
                        "toggleExampleDiagrams",
                        html::checkbox()
                            .checked(true)
                            .space_before()
                            .on_click("toggleDiagrams(this.checked)"),
                        "Diagrams",
                        !self.options.show_diagrams_toggle,
                    ))
                    .child(self.option_node(
                        "toggleHappyPath",
                        html::checkbox()
                            .space_before()
                            .on_click("toggleHappyPathsOnly(this.checked)"),
                        "Happy Paths Only",
                        !self.options.show_happy_path_toggle,
                    )),
            )
    }

    fn status_filter_nodes(&self) -> Element {
        let classes = if self.options.show_status_filter_toggles {
            "options"
        } else {
            "options hide"
        };
        let order = [
            ExecutionStatus::Passed,
            ExecutionStatus::Bypassed,
            ExecutionStatus::Failed,
            ExecutionStatus::Ignored,
            ExecutionStatus::NotRun,
        ];
        tag(Tag::Div)
            .class(classes)
            .child(tag(Tag::Span).text("Filter:"))
            .child(tag(Tag::Span).children(order.map(|status| {
                let id = format!("show{}", status.display().replace(' ', ""));
                self.option_node(
                    &id,
                    html::checkbox()
                        .name_attr("statusFilter")
                        .attr("data-filter-value", status.css_class())
                        .checked(true)
                        .on_click("applyFilter()")
                        .space_before(),
                    status.display(),
                    false,
                )
            })))
    }

    fn category_filter_nodes(&self) -> HtmlNode {
        if self.categories.is_empty() {
            return html::nothing();
        }
        let mut entries = vec![self.category_filter_node("all", "-all-", true)];
        for name in self.categories.sorted_names() {
            let token = self.categories.token(name).unwrap_or_default();
            entries.push(self.category_filter_node(&token, name, false));
        }
        entries.push(self.category_filter_node("without", "-without category-", false));

        tag(Tag::Div)
            .class("options")
            .child(tag(Tag::Span).text("Categories:"))
            .child(tag(Tag::Span).children(entries))
            .into()
    }

    fn category_filter_node(&self, filter_value: &str, name: &str, selected: bool) -> Element {
        self.option_node(
            &format!("category{filter_value}radio"),
            html::radio()
                .name_attr("categoryFilter")
                .attr("data-filter-value", filter_value)
                .attr("data-filter-name", url_encode(name))
                .on_click("applyFilter()")
                .checked(selected)
                .space_before(),
            name,
            false,
        )
    }

    fn free_text_filter(&self) -> Element {
        tag(Tag::Div)
            .class("options filterFreeTextPanel")
            .child(tag(Tag::Span).text("Filter:"))
            .child(
                tag(Tag::Span).child(
                    tag(Tag::Input)
                        .id("searchbar")
                        .attr("type", "text")
                        .attr("onkeyup", "search_scenarios()"),
                ),
            )
    }

    fn option_node(&self, element_id: &str, element: Element, label: &str, hide: bool) -> Element {
        let classes = if hide { "option hide" } else { "option" };
        tag(Tag::Span).class(classes).child(
            tag(Tag::Label)
                .for_id(element_id)
                .child(element.id(element_id))
                .child(self.checkbox_marker(false))
                .text(label),
        )
    }

    /// The styled stand-in span the stylesheet renders instead of the
    /// native checkbox square.
    fn checkbox_marker(&self, empty: bool) -> Element {
        tag(Tag::Span).class(if empty { "chbox empty" } else { "chbox" })
    }

    fn feature_article(&self, feature: &FeatureResult, index: usize) -> Element {
        let toggle_id = self.element_id(|| format!("toggle{index}"));
        let feature_id = self.element_id(|| format!("feature{index}"));

        tag(Tag::Article)
            .class(self.feature_classes(feature))
            .child(
                tag(Tag::H2)
                    .id(feature_id.clone())
                    .class("title header")
                    .child(
                        tag(Tag::Label)
                            .class("controls")
                            .child(
                                html::checkbox()
                                    .id(toggle_id)
                                    .class("toggle toggleF")
                                    .checked(!self.options.steps_collapsed_initially),
                            )
                            .child(self.checkbox_marker(false)),
                    )
                    .child(
                        tag(Tag::Span)
                            .class("content")
                            .raw_text(self.name_html(&feature.name))
                            .child(
                                tag(Tag::Span)
                                    .skip_empty()
                                    .children(feature.labels.iter().map(|l| self.label_span(l))),
                            )
                            .child(self.small_link(&feature_id)),
                    ),
            )
            .child(
                tag(Tag::Div).class("description").child(
                    Text::new(feature.description.clone().unwrap_or_default())
                        .escaped()
                        .skip_if_empty(),
                ),
            )
            .child(
                tag(Tag::Div).class("scenarios").children(
                    self.options
                        .scenario_ordering
                        .apply(&feature.scenarios)
                        .iter()
                        .enumerate()
                        .map(|(i, s)| self.scenario(s, index, i)),
                ),
            )
    }

    /// `feature` plus a status class for every status present among the
    /// feature's scenarios; an empty feature counts as not run.
    fn feature_classes(&self, feature: &FeatureResult) -> String {
        let mut classes = String::from("feature");
        for status in ExecutionStatus::ALL {
            if feature.count_scenarios_with_status(status) > 0 {
                classes.push(' ');
                classes.push_str(status.css_class());
            }
        }
        if feature.scenarios.is_empty() {
            classes.push(' ');
            classes.push_str(ExecutionStatus::NotRun.css_class());
        }
        classes
    }

    fn scenario(
        &self,
        scenario: &ScenarioResult,
        feature_index: usize,
        scenario_index: usize,
    ) -> Element {
        let treat_as_passed = self
            .options
            .treat_as_passed
            .map(|decide| decide(scenario))
            .unwrap_or(false);
        let displayed_status = if treat_as_passed {
            ExecutionStatus::Passed
        } else {
            scenario.status
        };

        let toggle_id = self.element_id(|| format!("toggle{feature_index}_{scenario_index}"));
        let scenario_id =
            self.element_id(|| format!("scenario{feature_index}_{}", scenario_index + 1));

        let content = tag(Tag::Div)
            .class("content")
            .child(
                tag(Tag::Div)
                    .class("categories")
                    .skip_empty()
                    .children(scenario.categories.iter().map(|c| self.category_span(c))),
            )
            .child(
                tag(Tag::Div).class("scenario-steps").children(
                    scenario.steps.iter().map(|s| {
                        self.step(s, treat_as_passed, &format!("{feature_index}_{scenario_index}"))
                    }),
                ),
            )
            .child(self.scenario_diagrams(scenario));

        let all_steps = scenario.all_steps();
        tag(Tag::Div)
            .class(format!("scenario {}", scenario.status.css_class()))
            .attr("data-categories", self.scenario_category_tokens(scenario))
            .child(
                tag(Tag::H3)
                    .id(scenario_id.clone())
                    .class("header title")
                    .child(
                        tag(Tag::Label)
                            .class("controls")
                            .child(
                                html::checkbox()
                                    .id(toggle_id)
                                    .class("toggle toggleS")
                                    .checked(!self.options.steps_collapsed_initially),
                            )
                            .child(self.checkbox_marker(false))
                            .child(self.status_span(displayed_status)),
                    )
                    .child(
                        tag(Tag::Span)
                            .raw_text(self.name_html(&scenario.name))
                            .child(
                                tag(Tag::Span)
                                    .skip_empty()
                                    .children(scenario.labels.iter().map(|l| self.label_span(l))),
                            )
                            .child(self.duration(scenario.execution_time))
                            .child(self.small_link(&scenario_id)),
                    ),
            )
            .child(content)
            .child(
                tag(Tag::Div)
                    .class("details")
                    .skip_empty()
                    .child(self.status_details(scenario.status_details.as_deref()))
                    .child(self.comments(&all_steps))
                    .child(self.attachments(&all_steps)),
            )
    }

    fn scenario_category_tokens(&self, scenario: &ScenarioResult) -> String {
        scenario
            .categories
            .iter()
            .filter_map(|c| self.categories.token(c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn scenario_diagrams(&self, scenario: &ScenarioResult) -> HtmlNode {
        let diagrams: Vec<&DiagramAsCode> = self
            .options
            .example_diagrams
            .iter()
            .filter(|d| d.scenario_runtime_id == scenario.runtime_id)
            .collect();
        if diagrams.is_empty() {
            return html::nothing();
        }

        let mut details = tag(Tag::Details)
            .class("example-diagrams")
            .bare_attr("open")
            .child(tag(Tag::Summary).class("h4").text("Example Diagram"));
        for diagram in diagrams {
            let mut img = tag(Tag::Img).attr("src", diagram.img_src.clone());
            if self.options.lazy_load_diagram_images {
                img = img.attr("loading", "lazy");
            }
            details = details.child(
                tag(Tag::Details)
                    .class("example")
                    .child(tag(Tag::Summary).class("example-image").child(img))
                    .child(
                        tag(Tag::Div)
                            .class("diagram-source")
                            .child(tag(Tag::H4).text(self.options.diagram_source_title.clone()))
                            .child(tag(Tag::Pre).text(diagram.code_behind.clone())),
                    ),
            );
        }
        details.into()
    }

    fn step(&self, step: &StepResult, treat_as_passed: bool, path: &str) -> Element {
        let displayed_status = if treat_as_passed {
            ExecutionStatus::Passed
        } else {
            step.status
        };
        let step_path = format!("{path}_{}", step.number);

        let mut controls = if step.has_sub_steps() {
            let toggle_id = self.element_id(|| format!("toggle{step_path}"));
            tag(Tag::Label).class("controls").child(
                html::checkbox()
                    .id(toggle_id)
                    .class("toggle toggleSS")
                    .checked(!self.options.steps_collapsed_initially),
            )
        } else {
            tag(Tag::Span).class("controls")
        };
        controls = controls
            .child(self.checkbox_marker(!step.has_sub_steps()))
            .child(self.status_span(displayed_status));

        let heading = format!(
            "{}{}. {}",
            escape_html(&step.group_prefix),
            step.number,
            self.name_html(&step.name)
        );

        tag(Tag::Div)
            .class("step")
            .child(
                tag(Tag::Div).class("header").child(controls).child(
                    tag(Tag::Span)
                        .child(Text::new(heading).trimmed())
                        .child(self.duration(step.execution_time)),
                ),
            )
            .child(
                tag(Tag::Div)
                    .class("step-parameters")
                    .skip_empty()
                    .children(step.parameters.iter().map(|p| self.step_parameter(p))),
            )
            .child(
                tag(Tag::Div).class("sub-steps").skip_empty().children(
                    step.sub_steps
                        .iter()
                        .map(|s| self.step(s, treat_as_passed, &step_path)),
                ),
            )
    }

    fn status_span(&self, status: ExecutionStatus) -> Element {
        let symbol = match status {
            ExecutionStatus::NotRun => "?",
            ExecutionStatus::Passed => "\u{2713}",
            ExecutionStatus::Bypassed => "~",
            ExecutionStatus::Ignored => "!",
            ExecutionStatus::Failed => "\u{2715}",
        };
        tag(Tag::Span)
            .class(format!("status {}", status.css_class()))
            .text(symbol)
            .space_after()
    }

    fn duration(&self, time: Option<ExecutionTime>) -> Element {
        let content = match time {
            Some(time) if self.options.include_durations => {
                format!("({})", format_duration(time.duration))
            }
            _ => String::new(),
        };
        tag(Tag::Span)
            .class("duration")
            .skip_empty()
            .child(Text::new(content).escaped().skip_if_empty())
            .space_before()
    }

    fn label_span(&self, label: &str) -> Element {
        tag(Tag::Span)
            .class("label")
            .skip_empty()
            .child(Text::new(label.trim()).escaped().skip_if_empty())
            .space_before()
    }

    fn category_span(&self, category: &str) -> Element {
        tag(Tag::Span)
            .class("category")
            .skip_empty()
            .child(Text::new(category.trim()).escaped().skip_if_empty())
            .space_before()
    }

    /// Shareable deep-link anchor; suppressed in synthetic-id mode where
    /// fragments would not survive regeneration.
    fn small_link(&self, target: &str) -> HtmlNode {
        if !self.options.write_stable_ids {
            return html::nothing();
        }
        tag(Tag::A)
            .class("smallLink shareable")
            .href(format!("#{target}"))
            .raw_text("link")
            .space_before()
            .into()
    }

    // -- Scenario details -----------------------------------------------

    fn details_section(&self, class: &str, heading: &str, nodes: Vec<HtmlNode>) -> HtmlNode {
        if nodes.iter().all(HtmlNode::is_empty) {
            return html::nothing();
        }
        tag(Tag::Div)
            .class(class.to_string())
            .child(tag(Tag::H3).text(heading))
            .children(nodes)
            .into()
    }

    fn status_details(&self, details: Option<&str>) -> HtmlNode {
        self.details_section(
            "status-details",
            "Details:",
            vec![
                tag(Tag::Code)
                    .skip_empty()
                    .child(
                        Text::new(details.unwrap_or_default())
                            .escaped()
                            .skip_if_empty(),
                    )
                    .into(),
            ],
        )
    }

    fn comments(&self, steps: &[&StepResult]) -> HtmlNode {
        let nodes: Vec<HtmlNode> = steps
            .iter()
            .flat_map(|step| {
                step.comments.iter().map(|comment| {
                    tag(Tag::Div)
                        .child(tag(Tag::Code).text(format!(
                            "// Step {}{}: {comment}",
                            step.group_prefix, step.number
                        )))
                        .into()
                })
            })
            .collect();
        self.details_section("comments", "Comments:", nodes)
    }

    fn attachments(&self, steps: &[&StepResult]) -> HtmlNode {
        let nodes: Vec<HtmlNode> = steps
            .iter()
            .flat_map(|step| {
                step.attachments.iter().map(|attachment| {
                    tag(Tag::Div)
                        .child(
                            tag(Tag::A)
                                .href(attachment.link())
                                .attr("target", "_blank")
                                .child(tag(Tag::Code).text(format!(
                                    "\u{1f517}Step {}{}: {} ({})",
                                    step.group_prefix,
                                    step.number,
                                    attachment.name,
                                    attachment.extension()
                                ))),
                        )
                        .into()
                })
            })
            .collect();
        self.details_section("attachments", "Attachments:", nodes)
    }

    // -- Parameters -----------------------------------------------------

    fn step_parameter(&self, parameter: &ParameterResult) -> HtmlNode {
        match &parameter.details {
            ParameterDetails::Tabular(table) => self.tabular_parameter(&parameter.name, table),
            ParameterDetails::Tree(tree) => self.tree_parameter(&parameter.name, tree),
        }
    }

    fn tabular_parameter(&self, name: &str, table: &TabularParameterDetails) -> HtmlNode {
        tag(Tag::Div)
            .class("param")
            .child(tag(Tag::Div).text(format!("{name}:")))
            .child(
                tag(Tag::Table)
                    .class("param table")
                    .children(self.parameter_table(table)),
            )
            .into()
    }

    fn parameter_table(&self, table: &TabularParameterDetails) -> Vec<HtmlNode> {
        let render_row_status = table.verification_status != VerificationStatus::NotApplicable;

        let mut columns: Vec<Element> = Vec::new();
        if render_row_status {
            columns.push(tag(Tag::Th).class("param column").text("#"));
        }
        columns.extend(table.columns.iter().map(|col| {
            tag(Tag::Th)
                .class(if col.is_key {
                    "param column key"
                } else {
                    "param column value"
                })
                .text(col.name.clone())
        }));

        vec![
            tag(Tag::Thead).child(tag(Tag::Tr).children(columns)).into(),
            tag(Tag::Tbody)
                .children(
                    table
                        .rows
                        .iter()
                        .map(|row| self.parameter_table_row(row, render_row_status)),
                )
                .into(),
        ]
    }

    fn parameter_table_row(&self, row: &TableRow, render_row_status: bool) -> Element {
        let mut cells: Vec<Element> = Vec::new();
        if render_row_status {
            cells.push(tag(Tag::Td).class("param type").text(row_type_marker(row)));
        }
        cells.extend(row.values.iter().map(|v| self.param_value(v, Tag::Td)));
        tag(Tag::Tr).children(cells)
    }

    fn param_value(&self, value: &ValueResult, cell_tag: Tag) -> Element {
        let cell = tag(cell_tag).class(format!(
            "param value {}",
            value.verification_status.css_class()
        ));
        match value.verification_status {
            VerificationStatus::NotApplicable | VerificationStatus::Success => {
                cell.text(value.value.clone())
            }
            VerificationStatus::Failure => cell
                .child(Text::new(value.value.clone()).escaped())
                .child(tag(Tag::Hr))
                .child(
                    tag(Tag::Span)
                        .class("expected")
                        .text(value.expectation.clone().unwrap_or_default()),
                ),
        }
    }

    fn tree_parameter(&self, name: &str, tree: &TreeParameterDetails) -> HtmlNode {
        tag(Tag::Div)
            .class("param")
            .child(tag(Tag::Div).text(format!("{name}:")))
            .child(
                tag(Tag::Div)
                    .class("param tree")
                    .child(self.tree_node(&tree.root)),
            )
            .into()
    }

    fn tree_node(&self, node: &TreeNode) -> Element {
        let kind = if node.children.is_empty() {
            "leaf"
        } else {
            "branch"
        };
        // Stable partition: leaves first, branches after.
        let (leaves, branches): (Vec<&TreeNode>, Vec<&TreeNode>) =
            node.children.iter().partition(|ch| ch.children.is_empty());

        tag(Tag::Div)
            .class(format!("tree node {kind}"))
            .child(
                tag(Tag::Div)
                    .class("detail")
                    .child(tag(Tag::Span).class("param node").text(node.name.clone()))
                    .child(self.param_value(&node.value, Tag::Div)),
            )
            .child(
                tag(Tag::Div)
                    .class("branches")
                    .skip_empty()
                    .children(leaves.into_iter().chain(branches).map(|ch| self.tree_node(ch))),
            )
    }
}

/// Row-type marker for a verified table: `+` surplus, `-` missing, `=`
/// verified equal, blank not applicable, `!` mismatch.
fn row_type_marker(row: &TableRow) -> &'static str {
    match (row.row_type, row.verification_status) {
        (TableRowType::Surplus, _) => "+",
        (TableRowType::Missing, _) => "-",
        (_, VerificationStatus::Success) => "=",
        (_, VerificationStatus::NotApplicable) => " ",
        (_, VerificationStatus::Failure) => "!",
    }
}

/// Percent-encode a string for the `data-filter-name` attribute.
fn url_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
