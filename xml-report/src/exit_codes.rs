// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `xml-report` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum XmlReportExitCode {}

impl XmlReportExitCode {
    /// The report was written.
    pub const OK: i32 = 0;

    /// A required setting, such as the project root, was missing or unusable.
    pub const CONFIGURATION_ERROR: i32 = 96;

    /// The execution result could not be read or parsed.
    pub const INPUT_READ_FAILED: i32 = 97;

    /// The execution result violated a structural invariant.
    pub const MALFORMED_RESULT: i32 = 98;

    /// Rendering the XML document failed.
    pub const BUILD_FAILED: i32 = 99;

    /// Creating the report directory or writing the result file failed.
    pub const WRITE_FAILED: i32 = 100;
}
