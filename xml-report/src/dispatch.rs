// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    context::ReportContext,
    errors::Result,
    exit_codes::XmlReportExitCode,
    output::{OutputContext, OutputOpts},
    store::write_report,
};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};
use clap::{Args, Parser, ValueEnum};
use result_xml::{XmlBuilder, normalize, raw::RawSuiteResult};
use std::io::Read;

/// Environment variable naming the root directory of the project under test.
pub const PROJECT_ROOT_ENV: &str = "GAUGE_PROJECT_ROOT";
/// Environment variable naming the reports directory.
pub const REPORTS_DIR_ENV: &str = "gauge_reports_dir";
/// Environment variable selecting overwrite mode.
pub const OVERWRITE_REPORTS_ENV: &str = "overwrite_reports";
/// Environment variable selecting the action to perform.
pub const ACTION_ENV: &str = "xml-report_action";

/// Writes a test-suite execution result as an XML report.
///
/// The execution result is read as JSON from `--input` (standard input by default) and the report
/// is written to `<reports-dir>/xml-report/<timestamp>/result.xml`.
#[derive(Debug, Parser)]
#[command(
    version,
    name = "xml-report",
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct XmlReportApp {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(flatten)]
    config_opts: ConfigOpts,

    /// Action to perform
    #[arg(long, value_enum, default_value_t, env = ACTION_ENV)]
    action: Action,

    /// Execution result to read, or `-` for standard input
    #[arg(long, value_name = "PATH", default_value = "-")]
    input: Utf8PathBuf,
}

impl XmlReportApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, _output: OutputContext) -> Result<i32> {
        match self.action {
            Action::Setup => {
                tracing::debug!("nothing to set up");
                return Ok(XmlReportExitCode::OK);
            }
            Action::Execution => {}
        }

        let context = ReportContext::new(&self.config_opts)?;
        tracing::debug!(
            "project root: {}, plugin dir: {}, reports dir: {}",
            context.project_root(),
            context.plugin_dir(),
            context.reports_dir(),
        );

        let raw = read_input(&self.input)?;
        let report_dir = generate_report(&context, &raw, Local::now())?;
        tracing::info!("successfully generated xml-report to => {report_dir}");

        Ok(XmlReportExitCode::OK)
    }
}

#[derive(Debug, Args)]
pub(crate) struct ConfigOpts {
    /// Root directory of the project under test
    #[arg(long, value_name = "DIR", env = PROJECT_ROOT_ENV)]
    pub(crate) project_root: Option<Utf8PathBuf>,

    /// Directory to write reports under [default: <project-root>/reports]
    ///
    /// Relative paths are resolved against the project root.
    #[arg(long, value_name = "DIR", env = REPORTS_DIR_ENV)]
    pub(crate) reports_dir: Option<Utf8PathBuf>,

    /// Replace the previous report instead of writing a timestamped directory ("true" to enable)
    #[arg(long, value_name = "BOOL", env = OVERWRITE_REPORTS_ENV)]
    pub(crate) overwrite_reports: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Generate a report from an execution result
    #[default]
    Execution,
    /// Prepare the plugin for use (nothing to do)
    Setup,
}

fn read_input(input: &Utf8Path) -> Result<RawSuiteResult> {
    let (name, contents) = if input.as_str() == "-" {
        let name = "<stdin>";
        let mut contents = String::new();
        std::io::stdin()
            .lock()
            .read_to_string(&mut contents)
            .map_err(|err| ExpectedError::input_read_error(name, err))?;
        (name.to_owned(), contents)
    } else {
        let contents = std::fs::read_to_string(input)
            .map_err(|err| ExpectedError::input_read_error(input.as_str(), err))?;
        (input.to_string(), contents)
    };

    RawSuiteResult::from_json_str(&contents)
        .map_err(|err| ExpectedError::input_parse_error(name, err))
}

/// Converts `raw` and writes it under `context`, returning the report directory.
///
/// Nothing is written to disk unless the whole document renders.
pub(crate) fn generate_report(
    context: &ReportContext,
    raw: &RawSuiteResult,
    now: DateTime<Local>,
) -> Result<Utf8PathBuf> {
    let suite = normalize(raw)?;
    let contents = XmlBuilder::new().set_timestamp(now).render(&suite)?;

    let report_dir = context.report_dir(&now);
    write_report(&report_dir, &contents)?;
    Ok(report_dir)
}
