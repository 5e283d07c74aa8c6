// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, TimeZone};
use std::fmt;

/// Format of timestamped report directory names.
///
/// Avoids `:` so the name is a valid path component on every platform.
pub static REPORT_DIR_FORMAT: &str = "%Y-%m-%d %H.%M.%S";

/// How the directory for a single report is named.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NameStrategy {
    /// Each run gets its own directory, named after the time of the run.
    Timestamped,
    /// Each run writes to the same location, replacing the previous report.
    Overwrite,
}

impl NameStrategy {
    /// Picks a strategy from the `overwrite_reports` setting.
    ///
    /// Only a case-insensitive `true` selects [`Self::Overwrite`].
    pub fn from_overwrite_setting(setting: Option<&str>) -> Self {
        match setting {
            Some(value) if value.trim().eq_ignore_ascii_case("true") => Self::Overwrite,
            _ => Self::Timestamped,
        }
    }

    /// Returns the directory name for a report generated at `now`.
    ///
    /// The name is empty for [`Self::Overwrite`].
    pub fn dir_name<Tz>(self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            Self::Timestamped => now.format(REPORT_DIR_FORMAT).to_string(),
            Self::Overwrite => String::new(),
        }
    }
}
