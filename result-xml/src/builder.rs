// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{SuiteResult, errors::BuildError, serialize::serialize_suite};
use chrono::{DateTime, FixedOffset, Local};
use std::io;

/// Renders a [`SuiteResult`] as an XML document.
///
/// The builder never fails on a well-formed `SuiteResult`: every optional part of the tree is
/// either emitted or left out. Errors are only returned if the underlying writer fails.
#[derive(Clone, Debug)]
pub struct XmlBuilder {
    timestamp: Option<DateTime<FixedOffset>>,
    indent: usize,
}

impl XmlBuilder {
    /// The default number of spaces per nesting level.
    pub const DEFAULT_INDENT: usize = 4;

    /// Creates a new builder that stamps documents with the local time at render time.
    pub fn new() -> Self {
        Self {
            timestamp: None,
            indent: Self::DEFAULT_INDENT,
        }
    }

    /// Uses a fixed timestamp instead of the local time at render time.
    pub fn set_timestamp(&mut self, timestamp: impl Into<DateTime<FixedOffset>>) -> &mut Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Sets the number of spaces per nesting level.
    pub fn set_indent(&mut self, indent: usize) -> &mut Self {
        self.indent = indent;
        self
    }

    /// Serialize `suite` to the given writer.
    pub fn serialize(&self, suite: &SuiteResult, writer: impl io::Write) -> Result<(), BuildError> {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Local::now().fixed_offset());
        serialize_suite(suite, &timestamp, self.indent, writer)?;
        Ok(())
    }

    /// Render `suite` to the bytes of a complete document.
    pub fn render(&self, suite: &SuiteResult) -> Result<Vec<u8>, BuildError> {
        let mut buf: Vec<u8> = vec![];
        self.serialize(suite, &mut buf)?;
        Ok(buf)
    }

    /// Render `suite` to a string.
    pub fn to_string(&self, suite: &SuiteResult) -> Result<String, BuildError> {
        let buf = self.render(suite)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl Default for XmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `suite` with a default [`XmlBuilder`], stamped with the current local time.
pub fn render(suite: &SuiteResult) -> Result<Vec<u8>, BuildError> {
    XmlBuilder::new().render(suite)
}
