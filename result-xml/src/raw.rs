// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The execution result record as supplied by the host.
//!
//! These types mirror the JSON document the host hands over. They are validated and rolled up by
//! [`normalize`](crate::normalize) before anything is rendered.

use crate::{Status, errors::InputParseError};
use serde::Deserialize;
use std::io;

/// A raw suite execution result.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSuiteResult {
    /// The specifications that were executed. This field is required, but may be empty.
    pub spec_results: Vec<RawSpecResult>,

    #[serde(default)]
    pub environment: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Milliseconds.
    #[serde(default)]
    pub execution_time: Option<i64>,

    /// Advisory: combined with the status computed from the children.
    #[serde(default)]
    pub status: Option<Status>,

    #[serde(default)]
    pub before_suite: Option<RawStepResult>,

    #[serde(default)]
    pub after_suite: Option<RawStepResult>,

    // Advisory counts, never trusted.
    #[serde(default)]
    pub specs_passed_count: Option<usize>,

    #[serde(default)]
    pub specs_failed_count: Option<usize>,

    #[serde(default)]
    pub specs_skipped_count: Option<usize>,
}

impl RawSuiteResult {
    /// Deserializes a raw result from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, InputParseError> {
        let mut deserializer = serde_json::Deserializer::from_str(input);
        serde_path_to_error::deserialize(&mut deserializer).map_err(InputParseError::new)
    }

    /// Deserializes a raw result from a reader producing JSON.
    pub fn from_json_reader(reader: impl io::Read) -> Result<Self, InputParseError> {
        let mut deserializer = serde_json::Deserializer::from_reader(reader);
        serde_path_to_error::deserialize(&mut deserializer).map_err(InputParseError::new)
    }
}

/// A raw specification result.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpecResult {
    /// The specification heading.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub file_name: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub execution_time: Option<i64>,

    #[serde(default)]
    pub status: Option<Status>,

    #[serde(default)]
    pub before_spec: Option<RawStepResult>,

    #[serde(default)]
    pub after_spec: Option<RawStepResult>,

    #[serde(default)]
    pub scenarios: Vec<RawScenarioResult>,
}

/// A raw scenario result.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScenarioResult {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub execution_time: Option<i64>,

    #[serde(default)]
    pub status: Option<Status>,

    #[serde(default)]
    pub before_scenario: Option<RawStepResult>,

    #[serde(default)]
    pub after_scenario: Option<RawStepResult>,

    #[serde(default)]
    pub steps: Vec<RawStepResult>,
}

/// A raw step or hook result. Hooks leave `text` empty.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStepResult {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub status: Option<Status>,

    #[serde(default)]
    pub execution_time: Option<i64>,

    #[serde(default)]
    pub failure: Option<RawFailure>,

    /// Console messages, in the order they were written.
    #[serde(default)]
    pub messages: Vec<String>,
}

/// Raw failure details.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFailure {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub stack_trace: String,

    #[serde(default)]
    pub screenshot: Option<String>,
}
