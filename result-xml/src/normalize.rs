// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn a raw execution result into a [`SuiteResult`].

use crate::{
    Failure, ScenarioResult, SpecificationResult, Status, StepResult, StepRole, SuiteResult,
    errors::{MalformedResultError, MalformedResultKind, ResultPath},
    raw::{RawScenarioResult, RawSpecResult, RawStepResult, RawSuiteResult},
};
use std::time::Duration;

/// The environment name used when the raw result doesn't carry one.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Validates a raw execution result and builds the normalized tree.
///
/// Statuses and counts are recomputed from the children; statuses declared by the raw record are
/// combined with the computed ones using the worst-of rule, and declared counts are ignored.
/// Container times that are absent or zero are resolved to the sum of their children's times.
///
/// Returns an error, and nothing else, on the first node that violates a structural invariant.
pub fn normalize(raw: &RawSuiteResult) -> Result<SuiteResult, MalformedResultError> {
    let path = ResultPath::suite();

    let environment = match raw.environment.as_deref() {
        Some(environment) if !environment.is_empty() => environment,
        _ => DEFAULT_ENVIRONMENT,
    };
    let mut suite = SuiteResult::new(environment);
    suite.set_tags(&raw.tags);

    let mut children_time = Duration::ZERO;

    if let Some(hook) = &raw.before_suite {
        let hook = normalize_step(hook, StepRole::BeforeSuite, &path.join("beforeSuite"))?;
        add_time(&mut children_time, hook.execution_time, &path)?;
        suite.set_before_suite(hook);
    }

    for (index, spec) in raw.spec_results.iter().enumerate() {
        let spec = normalize_spec(spec, &path.join_index("spec", index))?;
        add_time(&mut children_time, spec.execution_time, &path)?;
        suite.add_specification(spec);
    }

    if let Some(hook) = &raw.after_suite {
        let hook = normalize_step(hook, StepRole::AfterSuite, &path.join("afterSuite"))?;
        add_time(&mut children_time, hook.execution_time, &path)?;
        suite.set_after_suite(hook);
    }

    if let Some(status) = raw.status {
        suite.escalate_status(status);
    }
    suite.set_execution_time(resolve_time(raw.execution_time, children_time, &path)?);

    check_advisory_count("specsPassedCount", raw.specs_passed_count, suite.specs_passed_count);
    check_advisory_count("specsFailedCount", raw.specs_failed_count, suite.specs_failed_count);
    check_advisory_count(
        "specsSkippedCount",
        raw.specs_skipped_count,
        suite.specs_skipped_count,
    );

    Ok(suite)
}

fn normalize_spec(
    raw: &RawSpecResult,
    path: &ResultPath,
) -> Result<SpecificationResult, MalformedResultError> {
    if raw.name.trim().is_empty() {
        return Err(MalformedResultError::new(
            path.clone(),
            MalformedResultKind::EmptySpecName,
        ));
    }

    let mut spec = SpecificationResult::new(&raw.name, &raw.file_name);
    spec.set_tags(&raw.tags);

    let mut children_time = Duration::ZERO;

    if let Some(hook) = &raw.before_spec {
        let hook = normalize_step(hook, StepRole::BeforeSpec, &path.join("beforeSpec"))?;
        add_time(&mut children_time, hook.execution_time, path)?;
        spec.set_before_spec(hook);
    }

    for (index, scenario) in raw.scenarios.iter().enumerate() {
        let scenario = normalize_scenario(scenario, &path.join_index("scenario", index))?;
        add_time(&mut children_time, scenario.execution_time, path)?;
        spec.add_scenario(scenario);
    }

    if let Some(hook) = &raw.after_spec {
        let hook = normalize_step(hook, StepRole::AfterSpec, &path.join("afterSpec"))?;
        add_time(&mut children_time, hook.execution_time, path)?;
        spec.set_after_spec(hook);
    }

    if let Some(status) = raw.status {
        spec.escalate_status(status);
    }
    spec.set_execution_time(resolve_time(raw.execution_time, children_time, path)?);

    Ok(spec)
}

fn normalize_scenario(
    raw: &RawScenarioResult,
    path: &ResultPath,
) -> Result<ScenarioResult, MalformedResultError> {
    if raw.name.trim().is_empty() {
        return Err(MalformedResultError::new(
            path.clone(),
            MalformedResultKind::EmptyScenarioName,
        ));
    }

    let mut scenario = ScenarioResult::new(&raw.name);
    scenario.set_tags(&raw.tags);

    let mut children_time = Duration::ZERO;

    if let Some(hook) = &raw.before_scenario {
        let hook = normalize_step(hook, StepRole::BeforeScenario, &path.join("beforeScenario"))?;
        add_time(&mut children_time, hook.execution_time, path)?;
        scenario.set_before_scenario(hook);
    }

    for (index, step) in raw.steps.iter().enumerate() {
        let step = normalize_step(step, StepRole::Step, &path.join_index("step", index))?;
        add_time(&mut children_time, step.execution_time, path)?;
        scenario.add_step(step);
    }

    if let Some(hook) = &raw.after_scenario {
        let hook = normalize_step(hook, StepRole::AfterScenario, &path.join("afterScenario"))?;
        add_time(&mut children_time, hook.execution_time, path)?;
        scenario.set_after_scenario(hook);
    }

    if let Some(status) = raw.status {
        scenario.escalate_status(status);
    }
    scenario.set_execution_time(resolve_time(raw.execution_time, children_time, path)?);

    Ok(scenario)
}

fn normalize_step(
    raw: &RawStepResult,
    role: StepRole,
    path: &ResultPath,
) -> Result<StepResult, MalformedResultError> {
    let execution_time = millis_to_duration(raw.execution_time.unwrap_or(0), path)?;

    let mut status = raw.status.unwrap_or_default();
    if raw.failure.is_some() {
        status = status.worst(Status::Failed);
    }

    let mut step = StepResult::new(role, status);
    step.set_execution_time(execution_time);
    if !role.is_hook() {
        step.set_text(&raw.text);
    }

    if status.is_failed() {
        // A failed step always carries a failure with a message.
        let failure = match &raw.failure {
            Some(raw_failure) => {
                let message = if raw_failure.message.is_empty() {
                    format!("{} failed", role.description())
                } else {
                    raw_failure.message.clone()
                };
                let mut failure = Failure::new(message);
                failure.set_stack_trace(&raw_failure.stack_trace);
                if let Some(screenshot) = &raw_failure.screenshot {
                    failure.set_screenshot(screenshot);
                }
                failure
            }
            None => Failure::new(format!("{} failed", role.description())),
        };
        step.set_failure(failure);
    }

    if !raw.messages.is_empty() {
        step.set_console(raw.messages.join("\n"));
    }

    Ok(step)
}

fn resolve_time(
    declared: Option<i64>,
    children_time: Duration,
    path: &ResultPath,
) -> Result<Duration, MalformedResultError> {
    match declared {
        Some(millis) if millis != 0 => millis_to_duration(millis, path),
        _ => Ok(children_time),
    }
}

fn add_time(
    total: &mut Duration,
    time: Duration,
    path: &ResultPath,
) -> Result<(), MalformedResultError> {
    *total = total.checked_add(time).ok_or_else(|| {
        MalformedResultError::new(path.clone(), MalformedResultKind::ExecutionTimeOverflow)
    })?;
    Ok(())
}

fn millis_to_duration(millis: i64, path: &ResultPath) -> Result<Duration, MalformedResultError> {
    match u64::try_from(millis) {
        Ok(millis) => Ok(Duration::from_millis(millis)),
        Err(_) => Err(MalformedResultError::new(
            path.clone(),
            MalformedResultKind::NegativeExecutionTime { millis },
        )),
    }
}

fn check_advisory_count(field: &'static str, declared: Option<usize>, computed: usize) {
    if let Some(declared) = declared {
        if declared != computed {
            tracing::debug!(
                "ignoring declared {field} = {declared}, recomputed {computed} from specifications"
            );
        }
    }
}
