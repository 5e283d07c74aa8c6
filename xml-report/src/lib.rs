// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writes test-suite execution results as XML reports.
//!
//! `xml-report` reads an execution result as JSON, converts it with [`result_xml`] and writes the
//! document to `<reports-dir>/xml-report/<timestamp>/result.xml`. Settings are read from the
//! command line, falling back to the environment variables a test-runner host sets for its
//! plugins (`GAUGE_PROJECT_ROOT`, `gauge_reports_dir`, `overwrite_reports`).

#![warn(missing_docs)]

mod context;
mod dispatch;
mod errors;
mod exit_codes;
mod naming;
mod output;
mod store;

pub use context::{DEFAULT_REPORTS_DIR, REPORT_SUBDIR, ReportContext};
#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use exit_codes::XmlReportExitCode;
pub use naming::{NameStrategy, REPORT_DIR_FORMAT};
pub use output::{Color, LOG_ENV, OutputContext, StderrStyles};
pub use store::{RESULT_FILE_NAME, write_report};
