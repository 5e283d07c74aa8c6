// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Deserialize;
use std::{fmt, time::Duration};

/// The outcome of a step, hook, scenario, specification or suite.
///
/// Variants are ordered by severity, so the aggregate status of a container is the maximum over
/// its children.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Ran to completion without failures.
    #[default]
    Passed,

    /// Did not run.
    Skipped,

    /// Ran and failed.
    Failed,
}

impl Status {
    /// Returns the more severe of the two statuses.
    pub fn worst(self, other: Status) -> Status {
        self.max(other)
    }

    /// The value used for the `status` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Skipped => "skipped",
            Status::Failed => "failed",
        }
    }

    pub fn is_failed(self) -> bool {
        self == Status::Failed
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The root of a normalized execution result.
#[derive(Clone, Debug)]
pub struct SuiteResult {
    /// The overall status of the run.
    pub status: Status,

    /// The number of specifications that passed.
    pub specs_passed_count: usize,

    /// The number of specifications that failed.
    pub specs_failed_count: usize,

    /// The number of specifications that were skipped.
    pub specs_skipped_count: usize,

    /// The overall time taken by the run.
    pub execution_time: Duration,

    /// The name of the environment the run used.
    pub environment: String,

    /// Tags applied to the run.
    pub tags: Vec<String>,

    /// The hook run before any specification.
    pub before_suite: Option<StepResult>,

    /// The hook run after all specifications.
    pub after_suite: Option<StepResult>,

    /// The specifications in execution order.
    pub specifications: Vec<SpecificationResult>,
}

impl SuiteResult {
    /// Creates a new, empty `SuiteResult` for the given environment.
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            status: Status::Passed,
            specs_passed_count: 0,
            specs_failed_count: 0,
            specs_skipped_count: 0,
            execution_time: Duration::ZERO,
            environment: environment.into(),
            tags: vec![],
            before_suite: None,
            after_suite: None,
            specifications: vec![],
        }
    }

    /// Sets the time taken by the run.
    pub fn set_execution_time(&mut self, time: Duration) -> &mut Self {
        self.execution_time = time;
        self
    }

    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Combines `status` into the overall status using the worst-of rule.
    pub fn escalate_status(&mut self, status: Status) -> &mut Self {
        self.status = self.status.worst(status);
        self
    }

    /// Sets the before-suite hook and rolls its status up.
    pub fn set_before_suite(&mut self, hook: StepResult) -> &mut Self {
        self.escalate_status(hook.status);
        self.before_suite = Some(hook);
        self
    }

    /// Sets the after-suite hook and rolls its status up.
    pub fn set_after_suite(&mut self, hook: StepResult) -> &mut Self {
        self.escalate_status(hook.status);
        self.after_suite = Some(hook);
        self
    }

    /// Adds a specification and updates the counts and the overall status.
    ///
    /// When building a new result, use of this method is recommended over pushing to
    /// `self.specifications` directly.
    pub fn add_specification(&mut self, specification: SpecificationResult) -> &mut Self {
        match specification.status {
            Status::Passed => self.specs_passed_count += 1,
            Status::Failed => self.specs_failed_count += 1,
            Status::Skipped => self.specs_skipped_count += 1,
        }
        self.escalate_status(specification.status);
        self.specifications.push(specification);
        self
    }

    pub fn add_specifications(
        &mut self,
        specifications: impl IntoIterator<Item = SpecificationResult>,
    ) -> &mut Self {
        for specification in specifications {
            self.add_specification(specification);
        }
        self
    }
}

/// The result of a single specification file.
#[derive(Clone, Debug)]
pub struct SpecificationResult {
    /// The specification heading.
    pub name: String,

    /// The file the specification was read from.
    pub file_name: String,

    /// The aggregate status of the specification.
    pub status: Status,

    /// The time taken by the specification.
    pub execution_time: Duration,

    pub tags: Vec<String>,

    /// The hook run before the first scenario.
    pub before_spec: Option<StepResult>,

    /// The hook run after the last scenario.
    pub after_spec: Option<StepResult>,

    /// The scenarios in execution order.
    pub scenarios: Vec<ScenarioResult>,
}

impl SpecificationResult {
    /// Creates a new `SpecificationResult` with no scenarios.
    pub fn new(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            status: Status::Passed,
            execution_time: Duration::ZERO,
            tags: vec![],
            before_spec: None,
            after_spec: None,
            scenarios: vec![],
        }
    }

    pub fn set_execution_time(&mut self, time: Duration) -> &mut Self {
        self.execution_time = time;
        self
    }

    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Combines `status` into the aggregate status using the worst-of rule.
    pub fn escalate_status(&mut self, status: Status) -> &mut Self {
        self.status = self.status.worst(status);
        self
    }

    pub fn set_before_spec(&mut self, hook: StepResult) -> &mut Self {
        self.escalate_status(hook.status);
        self.before_spec = Some(hook);
        self
    }

    pub fn set_after_spec(&mut self, hook: StepResult) -> &mut Self {
        self.escalate_status(hook.status);
        self.after_spec = Some(hook);
        self
    }

    /// Adds a scenario and rolls its status up.
    pub fn add_scenario(&mut self, scenario: ScenarioResult) -> &mut Self {
        self.escalate_status(scenario.status);
        self.scenarios.push(scenario);
        self
    }

    pub fn add_scenarios(
        &mut self,
        scenarios: impl IntoIterator<Item = ScenarioResult>,
    ) -> &mut Self {
        for scenario in scenarios {
            self.add_scenario(scenario);
        }
        self
    }
}

/// The result of a single scenario.
#[derive(Clone, Debug)]
pub struct ScenarioResult {
    /// The scenario heading.
    pub name: String,

    /// The aggregate status of the scenario.
    pub status: Status,

    /// The time taken by the scenario.
    pub execution_time: Duration,

    pub tags: Vec<String>,

    /// The hook run before the first step.
    pub before_scenario: Option<StepResult>,

    /// The hook run after the last step.
    pub after_scenario: Option<StepResult>,

    /// The steps in execution order.
    pub steps: Vec<StepResult>,
}

impl ScenarioResult {
    /// Creates a new `ScenarioResult` with no steps.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Passed,
            execution_time: Duration::ZERO,
            tags: vec![],
            before_scenario: None,
            after_scenario: None,
            steps: vec![],
        }
    }

    pub fn set_execution_time(&mut self, time: Duration) -> &mut Self {
        self.execution_time = time;
        self
    }

    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Combines `status` into the aggregate status using the worst-of rule.
    pub fn escalate_status(&mut self, status: Status) -> &mut Self {
        self.status = self.status.worst(status);
        self
    }

    pub fn set_before_scenario(&mut self, hook: StepResult) -> &mut Self {
        self.escalate_status(hook.status);
        self.before_scenario = Some(hook);
        self
    }

    pub fn set_after_scenario(&mut self, hook: StepResult) -> &mut Self {
        self.escalate_status(hook.status);
        self.after_scenario = Some(hook);
        self
    }

    /// Adds a step and rolls its status up.
    pub fn add_step(&mut self, step: StepResult) -> &mut Self {
        self.escalate_status(step.status);
        self.steps.push(step);
        self
    }

    pub fn add_steps(&mut self, steps: impl IntoIterator<Item = StepResult>) -> &mut Self {
        for step in steps {
            self.add_step(step);
        }
        self
    }
}

/// Whether a [`StepResult`] is a step or one of the execution hooks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StepRole {
    Step,
    BeforeSuite,
    AfterSuite,
    BeforeSpec,
    AfterSpec,
    BeforeScenario,
    AfterScenario,
}

impl StepRole {
    /// The element name this role is serialized as.
    pub fn tag_name(self) -> &'static str {
        match self {
            StepRole::Step => "step",
            StepRole::BeforeSuite => "beforeSuite",
            StepRole::AfterSuite => "afterSuite",
            StepRole::BeforeSpec => "beforeSpec",
            StepRole::AfterSpec => "afterSpec",
            StepRole::BeforeScenario => "beforeScenario",
            StepRole::AfterScenario => "afterScenario",
        }
    }

    /// A human-readable description, e.g. "before scenario hook".
    pub fn description(self) -> &'static str {
        match self {
            StepRole::Step => "step",
            StepRole::BeforeSuite => "before suite hook",
            StepRole::AfterSuite => "after suite hook",
            StepRole::BeforeSpec => "before spec hook",
            StepRole::AfterSpec => "after spec hook",
            StepRole::BeforeScenario => "before scenario hook",
            StepRole::AfterScenario => "after scenario hook",
        }
    }

    pub fn is_hook(self) -> bool {
        self != StepRole::Step
    }
}

/// The result of a step or a hook.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Whether this is a step or a hook.
    pub role: StepRole,

    /// The step text. Empty for hooks.
    pub text: String,

    pub status: Status,

    pub execution_time: Duration,

    /// Details of the failure, if the step failed.
    ///
    /// Only serialized when `status` is [`Status::Failed`].
    pub failure: Option<Failure>,

    /// Messages written to the console while the step ran.
    pub console: Option<Output>,
}

impl StepResult {
    /// Creates a new `StepResult` with the given role and status.
    pub fn new(role: StepRole, status: Status) -> Self {
        Self {
            role,
            text: String::new(),
            status,
            execution_time: Duration::ZERO,
            failure: None,
            console: None,
        }
    }

    /// Creates a new step with the given text and status.
    pub fn step(text: impl Into<String>, status: Status) -> Self {
        let mut step = Self::new(StepRole::Step, status);
        step.text = text.into();
        step
    }

    /// Creates a new failed step or hook carrying `failure`.
    pub fn failed(role: StepRole, failure: Failure) -> Self {
        let mut step = Self::new(role, Status::Failed);
        step.failure = Some(failure);
        step
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn set_execution_time(&mut self, time: Duration) -> &mut Self {
        self.execution_time = time;
        self
    }

    /// Sets the failure details and marks the step as failed.
    pub fn set_failure(&mut self, failure: Failure) -> &mut Self {
        self.status = Status::Failed;
        self.failure = Some(failure);
        self
    }

    /// Sets the console output. Empty output is dropped.
    pub fn set_console(&mut self, console: impl AsRef<str>) -> &mut Self {
        let console = Output::new(console);
        self.console = (!console.as_str().is_empty()).then_some(console);
        self
    }
}

/// Error details captured for a failed step or hook.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Failure {
    /// The error message.
    pub message: String,

    /// The stack trace, possibly empty.
    pub stack_trace: String,

    /// A screenshot reference or text-encoded image, if one was captured.
    pub screenshot: Option<String>,
}

impl Failure {
    /// Creates a new `Failure` with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: String::new(),
            screenshot: None,
        }
    }

    pub fn set_stack_trace(&mut self, stack_trace: impl Into<String>) -> &mut Self {
        self.stack_trace = stack_trace.into();
        self
    }

    pub fn set_screenshot(&mut self, screenshot: impl Into<String>) -> &mut Self {
        self.screenshot = Some(screenshot.into());
        self
    }
}

/// Text written to the console while a step or hook ran.
///
/// # Encoding
///
/// XML 1.0 cannot carry most control characters, and console output is frequently colorized.
/// ANSI escape sequences and characters that are illegal in XML are removed on construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    output: Box<str>,
}

impl Output {
    /// Creates a new output, removing escape sequences and non-printable characters from it.
    pub fn new(output: impl AsRef<str>) -> Self {
        let output = strip_ansi_escapes::strip_str(output.as_ref());
        let output = remove_invalid_xml_chars(&output).into_boxed_str();
        Self { output }
    }

    /// Returns the output.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Converts the output into a string.
    pub fn into_string(self) -> String {
        self.output.into_string()
    }
}

impl AsRef<str> for Output {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Output> for String {
    fn from(output: Output) -> Self {
        output.into_string()
    }
}

pub(crate) fn remove_invalid_xml_chars(text: &str) -> String {
    text.replace(
        |c| matches!(c, '\x00'..='\x08' | '\x0b' | '\x0c' | '\x0e'..='\x1f'),
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Status::Passed, Status::Passed, Status::Passed ; "passed passed")]
    #[test_case(Status::Passed, Status::Skipped, Status::Skipped ; "skipped beats passed")]
    #[test_case(Status::Skipped, Status::Failed, Status::Failed ; "failed beats skipped")]
    #[test_case(Status::Failed, Status::Passed, Status::Failed ; "failed beats passed")]
    fn worst_status(a: Status, b: Status, expected: Status) {
        assert_eq!(a.worst(b), expected);
        assert_eq!(b.worst(a), expected);
    }

    #[test]
    fn add_specification_counts() {
        let mut suite = SuiteResult::new("default");

        let mut failed = SpecificationResult::new("failing", "specs/failing.spec");
        let mut scenario = ScenarioResult::new("breaks");
        scenario.add_step(StepResult::failed(StepRole::Step, Failure::new("boom")));
        failed.add_scenario(scenario);

        let mut skipped = SpecificationResult::new("skipped", "specs/skipped.spec");
        skipped.escalate_status(Status::Skipped);

        suite.add_specifications([
            SpecificationResult::new("passing", "specs/passing.spec"),
            failed,
            skipped,
        ]);

        assert_eq!(suite.specs_passed_count, 1);
        assert_eq!(suite.specs_failed_count, 1);
        assert_eq!(suite.specs_skipped_count, 1);
        assert_eq!(suite.status, Status::Failed);
    }

    #[test]
    fn hook_failure_rolls_up() {
        let mut scenario = ScenarioResult::new("hooked");
        scenario.add_step(StepResult::step("passes", Status::Passed));
        assert_eq!(scenario.status, Status::Passed);

        scenario.set_after_scenario(StepResult::failed(
            StepRole::AfterScenario,
            Failure::new("teardown failed"),
        ));
        assert_eq!(scenario.status, Status::Failed);
    }

    #[test]
    fn output_strips_escapes_and_control_chars() {
        let output = Output::new("\x1b[31mred\x1b[0m text\nand newline");
        assert_eq!(output.as_str(), "red text\nand newline");

        assert_eq!(
            remove_invalid_xml_chars("bell\x07 nul\x00 tab\t cr\r lf\n"),
            "bell nul tab\t cr\r lf\n"
        );
    }

    #[test]
    fn empty_console_is_dropped() {
        let mut step = StepResult::step("quiet", Status::Passed);
        step.set_console("");
        assert!(step.console.is_none());
        step.set_console("\x1b[0m");
        assert!(step.console.is_none());
        step.set_console("hello");
        assert_eq!(step.console.as_ref().map(Output::as_str), Some("hello"));
    }
}
