// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize a `SuiteResult`.

use crate::{
    Failure, Output, ScenarioResult, SpecificationResult, StepResult, SuiteResult,
    report::remove_invalid_xml_chars,
};
use chrono::{DateTime, FixedOffset};
use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event, attributes::Attribute},
    name::QName,
};
use std::{borrow::Cow, io, time::Duration};

static RESULT_TAG: &str = "result";
static SPECIFICATION_TAG: &str = "specification";
static SCENARIO_TAG: &str = "scenario";
static FAILURE_TAG: &str = "failure";
static MESSAGE_TAG: &str = "message";
static STACK_TRACE_TAG: &str = "stackTrace";
static SCREENSHOT_TAG: &str = "screenshot";
static CONSOLE_TAG: &str = "console";

/// The format of the `timestamp` attribute.
pub static TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TAG_SEPARATOR: &str = ", ";

pub(crate) fn serialize_suite(
    suite: &SuiteResult,
    timestamp: &DateTime<FixedOffset>,
    indent: usize,
    writer: impl io::Write,
) -> quick_xml::Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', indent);

    let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
    writer.write_event(Event::Decl(decl))?;

    serialize_suite_impl(suite, timestamp, &mut writer)?;

    // Add a trailing newline.
    writer.write_indent()
}

fn serialize_suite_impl(
    suite: &SuiteResult,
    timestamp: &DateTime<FixedOffset>,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let SuiteResult {
        status,
        specs_passed_count,
        specs_failed_count,
        specs_skipped_count,
        execution_time,
        environment,
        tags,
        before_suite,
        after_suite,
        specifications,
    } = suite;

    let mut result_tag = BytesStart::new(RESULT_TAG);
    result_tag.extend_attributes([
        attribute("status", status.as_str()),
        attribute("specsSkippedCount", &specs_skipped_count.to_string()),
        attribute("specsFailedCount", &specs_failed_count.to_string()),
        attribute("specsPassedCount", &specs_passed_count.to_string()),
        attribute("executionTime", &serialize_time(execution_time)),
        attribute("timestamp", &timestamp.format(TIMESTAMP_FORMAT).to_string()),
        attribute("environment", environment),
        attribute("tags", &serialize_tags(tags)),
    ]);

    if before_suite.is_none() && after_suite.is_none() && specifications.is_empty() {
        return writer.write_event(Event::Empty(result_tag));
    }
    writer.write_event(Event::Start(result_tag))?;

    if let Some(hook) = before_suite {
        serialize_step(hook, writer)?;
    }
    for specification in specifications {
        serialize_specification(specification, writer)?;
    }
    if let Some(hook) = after_suite {
        serialize_step(hook, writer)?;
    }

    serialize_end_tag(RESULT_TAG, writer)
}

fn serialize_specification(
    specification: &SpecificationResult,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let SpecificationResult {
        name,
        file_name,
        status,
        execution_time,
        tags,
        before_spec,
        after_spec,
        scenarios,
    } = specification;

    let mut specification_tag = BytesStart::new(SPECIFICATION_TAG);
    specification_tag.extend_attributes([
        attribute("name", name),
        attribute("status", status.as_str()),
        attribute("executionTime", &serialize_time(execution_time)),
        attribute("tags", &serialize_tags(tags)),
        attribute("fileName", file_name),
    ]);

    if before_spec.is_none() && after_spec.is_none() && scenarios.is_empty() {
        return writer.write_event(Event::Empty(specification_tag));
    }
    writer.write_event(Event::Start(specification_tag))?;

    if let Some(hook) = before_spec {
        serialize_step(hook, writer)?;
    }
    for scenario in scenarios {
        serialize_scenario(scenario, writer)?;
    }
    if let Some(hook) = after_spec {
        serialize_step(hook, writer)?;
    }

    serialize_end_tag(SPECIFICATION_TAG, writer)
}

fn serialize_scenario(
    scenario: &ScenarioResult,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let ScenarioResult {
        name,
        status,
        execution_time,
        tags,
        before_scenario,
        after_scenario,
        steps,
    } = scenario;

    let mut scenario_tag = BytesStart::new(SCENARIO_TAG);
    scenario_tag.extend_attributes([
        attribute("name", name),
        attribute("status", status.as_str()),
        attribute("executionTime", &serialize_time(execution_time)),
        attribute("tags", &serialize_tags(tags)),
    ]);

    if before_scenario.is_none() && after_scenario.is_none() && steps.is_empty() {
        return writer.write_event(Event::Empty(scenario_tag));
    }
    writer.write_event(Event::Start(scenario_tag))?;

    if let Some(hook) = before_scenario {
        serialize_step(hook, writer)?;
    }
    for step in steps {
        serialize_step(step, writer)?;
    }
    if let Some(hook) = after_scenario {
        serialize_step(hook, writer)?;
    }

    serialize_end_tag(SCENARIO_TAG, writer)
}

/// Serializes a step, or a hook under its own element name.
fn serialize_step(step: &StepResult, writer: &mut Writer<impl io::Write>) -> quick_xml::Result<()> {
    let StepResult {
        role,
        text,
        status,
        execution_time,
        failure,
        console,
    } = step;

    let tag_name = role.tag_name();
    let mut step_tag = BytesStart::new(tag_name);
    if !role.is_hook() {
        step_tag.push_attribute(attribute("text", text));
    }
    step_tag.extend_attributes([
        attribute("status", status.as_str()),
        attribute("executionTime", &serialize_time(execution_time)),
    ]);

    let failure = failure.as_ref().filter(|_| status.is_failed());
    let console = console.as_ref().filter(|console| !console.as_str().is_empty());

    if failure.is_none() && console.is_none() {
        return writer.write_event(Event::Empty(step_tag));
    }
    writer.write_event(Event::Start(step_tag))?;

    if let Some(failure) = failure {
        serialize_failure(failure, writer)?;
    }
    if let Some(console) = console {
        serialize_console(console, writer)?;
    }

    serialize_end_tag(tag_name, writer)
}

fn serialize_failure(
    failure: &Failure,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let Failure {
        message,
        stack_trace,
        screenshot,
    } = failure;

    serialize_empty_start_tag(FAILURE_TAG, writer)?;

    serialize_text_element(MESSAGE_TAG, message, writer)?;
    if !stack_trace.is_empty() {
        serialize_text_element(STACK_TRACE_TAG, stack_trace, writer)?;
    }
    if let Some(screenshot) = screenshot {
        serialize_text_element(SCREENSHOT_TAG, screenshot, writer)?;
    }

    serialize_end_tag(FAILURE_TAG, writer)
}

fn serialize_console(
    console: &Output,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    // Output is already free of escape sequences and illegal characters.
    serialize_empty_start_tag(CONSOLE_TAG, writer)?;
    writer.write_event(Event::Text(BytesText::new(console.as_str())))?;
    serialize_end_tag(CONSOLE_TAG, writer)
}

fn serialize_text_element(
    tag_name: &'static str,
    text: &str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let text = text_value(text);
    if text.is_empty() {
        return writer.write_event(Event::Empty(BytesStart::new(tag_name)));
    }

    serialize_empty_start_tag(tag_name, writer)?;
    writer.write_event(Event::Text(BytesText::new(&text)))?;
    serialize_end_tag(tag_name, writer)
}

fn serialize_empty_start_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag_name)))
}

fn serialize_end_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))
}

// Serialize time as seconds with 3 decimal points.
fn serialize_time(time: &Duration) -> String {
    format!("{:.3}", time.as_secs_f64())
}

fn serialize_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

/// Builds an attribute whose value survives attribute-value normalization.
///
/// Besides the five reserved characters, tabs and line breaks are written as character references,
/// since a parser would otherwise turn them into spaces.
fn attribute<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    let value = escape_attribute_value(&xml_value(value));
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(value.into_bytes()),
    }
}

fn escape_attribute_value(value: &str) -> String {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped.into_owned();
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
    out
}

// Escaping of the five reserved characters is done by quick-xml when the text event is created.
// This only drops what XML 1.0 cannot represent at all.
fn xml_value(value: &str) -> Cow<'_, str> {
    if value.chars().any(is_invalid_xml_char) {
        Cow::Owned(remove_invalid_xml_chars(value))
    } else {
        Cow::Borrowed(value)
    }
}

fn text_value(value: &str) -> Cow<'_, str> {
    if value.contains('\x1b') {
        Cow::Owned(Output::new(value).into_string())
    } else {
        xml_value(value)
    }
}

fn is_invalid_xml_char(c: char) -> bool {
    matches!(c, '\x00'..='\x08' | '\x0b' | '\x0c' | '\x0e'..='\x1f')
}
