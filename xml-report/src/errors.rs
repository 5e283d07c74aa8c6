// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{exit_codes::XmlReportExitCode, output::StderrStyles};
use camino::{FromPathBufError, Utf8PathBuf};
use owo_colors::OwoColorize;
use result_xml::{BuildError, InputParseError, MalformedResultError};
use std::error::Error;
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected failure while generating a report.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("required configuration not set")]
    ConfigurationMissing { var_name: &'static str },
    #[error("could not determine the plugin directory")]
    PluginDirUnavailable {
        #[source]
        err: std::io::Error,
    },
    #[error("path is not valid UTF-8")]
    NonUtf8Path {
        #[source]
        err: FromPathBufError,
    },
    #[error("failed to read execution result")]
    InputReadError {
        input: String,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to parse execution result")]
    InputParseError {
        input: String,
        #[source]
        err: InputParseError,
    },
    #[error("malformed execution result")]
    MalformedResult {
        #[from]
        err: MalformedResultError,
    },
    #[error("report generation failed")]
    BuildFailed {
        #[from]
        err: BuildError,
    },
    #[error("failed to create report directory")]
    ReportDirCreateError {
        dir: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to write result file")]
    ResultFileWriteError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn configuration_missing(var_name: &'static str) -> Self {
        Self::ConfigurationMissing { var_name }
    }

    pub(crate) fn input_read_error(input: impl Into<String>, err: std::io::Error) -> Self {
        Self::InputReadError {
            input: input.into(),
            err,
        }
    }

    pub(crate) fn input_parse_error(input: impl Into<String>, err: InputParseError) -> Self {
        Self::InputParseError {
            input: input.into(),
            err,
        }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ConfigurationMissing { .. }
            | Self::PluginDirUnavailable { .. }
            | Self::NonUtf8Path { .. } => XmlReportExitCode::CONFIGURATION_ERROR,
            Self::InputReadError { .. } | Self::InputParseError { .. } => {
                XmlReportExitCode::INPUT_READ_FAILED
            }
            Self::MalformedResult { .. } => XmlReportExitCode::MALFORMED_RESULT,
            Self::BuildFailed { .. } => XmlReportExitCode::BUILD_FAILED,
            Self::ReportDirCreateError { .. } | Self::ResultFileWriteError { .. } => {
                XmlReportExitCode::WRITE_FAILED
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::ConfigurationMissing { var_name } => {
                tracing::error!(
                    "environment variable `{}` is not set",
                    var_name.style(styles.bold)
                );
                None
            }
            Self::PluginDirUnavailable { err } => {
                tracing::error!("error finding current working directory");
                Some(err as &dyn Error)
            }
            Self::NonUtf8Path { err } => {
                tracing::error!("a configured path is not valid UTF-8");
                Some(err as &dyn Error)
            }
            Self::InputReadError { input, err } => {
                tracing::error!(
                    "failed to read execution result from {}",
                    input.style(styles.bold)
                );
                Some(err as &dyn Error)
            }
            Self::InputParseError { input, err } => {
                tracing::error!(
                    "failed to parse execution result from {}",
                    input.style(styles.bold)
                );
                Some(err as &dyn Error)
            }
            Self::MalformedResult { err } => {
                tracing::error!("report generation failed: {}", err);
                None
            }
            Self::BuildFailed { err } => {
                tracing::error!("report generation failed");
                Some(err as &dyn Error)
            }
            Self::ReportDirCreateError { dir, err } => {
                tracing::error!(
                    "failed to create directory `{}`",
                    dir.style(styles.bold)
                );
                Some(err as &dyn Error)
            }
            Self::ResultFileWriteError { path, err } => {
                tracing::error!("failed to write `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: "xml_report::no_heading", "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use result_xml::{normalize, raw::RawSuiteResult};

    #[test]
    fn exit_codes_by_kind() {
        let missing = ExpectedError::configuration_missing("GAUGE_PROJECT_ROOT");
        assert_eq!(
            missing.process_exit_code(),
            XmlReportExitCode::CONFIGURATION_ERROR
        );

        let raw = RawSuiteResult::from_json_str(r#"{"specResults": [{"name": ""}]}"#).unwrap();
        let malformed: ExpectedError = normalize(&raw).unwrap_err().into();
        assert_eq!(
            malformed.process_exit_code(),
            XmlReportExitCode::MALFORMED_RESULT
        );

        let write = ExpectedError::ResultFileWriteError {
            path: "reports/xml-report/result.xml".into(),
            err: std::io::Error::other("disk full"),
        };
        assert_eq!(write.process_exit_code(), XmlReportExitCode::WRITE_FAILED);

        let parse_err = RawSuiteResult::from_json_str("{").unwrap_err();
        let parse = ExpectedError::input_parse_error("<stdin>", parse_err);
        assert_eq!(parse.process_exit_code(), XmlReportExitCode::INPUT_READ_FAILED);
        assert!(parse.source().is_some());
    }
}
