// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    dispatch::{ConfigOpts, PROJECT_ROOT_ENV},
    errors::{ExpectedError, Result},
    naming::NameStrategy,
};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};

/// Name of the directory under the reports directory that holds XML reports.
pub static REPORT_SUBDIR: &str = "xml-report";

/// Default reports directory, relative to the project root.
pub static DEFAULT_REPORTS_DIR: &str = "reports";

/// Locations and policies resolved once at startup.
#[derive(Clone, Debug)]
pub struct ReportContext {
    project_root: Utf8PathBuf,
    plugin_dir: Utf8PathBuf,
    reports_dir: Utf8PathBuf,
    name_strategy: NameStrategy,
}

impl ReportContext {
    /// Resolves a context from configuration, with the current directory as the plugin directory.
    pub(crate) fn new(opts: &ConfigOpts) -> Result<Self> {
        let plugin_dir = std::env::current_dir()
            .map_err(|err| ExpectedError::PluginDirUnavailable { err })?;
        let plugin_dir =
            Utf8PathBuf::try_from(plugin_dir).map_err(|err| ExpectedError::NonUtf8Path { err })?;
        Self::with_plugin_dir(opts, plugin_dir)
    }

    pub(crate) fn with_plugin_dir(opts: &ConfigOpts, plugin_dir: Utf8PathBuf) -> Result<Self> {
        let project_root = match opts.project_root.as_deref() {
            Some(root) if !root.as_str().trim().is_empty() => root.to_owned(),
            _ => return Err(ExpectedError::configuration_missing(PROJECT_ROOT_ENV)),
        };

        let reports_dir = match opts.reports_dir.as_deref() {
            Some(dir) if !dir.as_str().trim().is_empty() => {
                if dir.is_absolute() {
                    dir.to_owned()
                } else {
                    project_root.join(dir)
                }
            }
            _ => project_root.join(DEFAULT_REPORTS_DIR),
        };

        let name_strategy =
            NameStrategy::from_overwrite_setting(opts.overwrite_reports.as_deref());

        Ok(Self {
            project_root,
            plugin_dir,
            reports_dir,
            name_strategy,
        })
    }

    /// The root directory of the project under test.
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// The directory the plugin runs from.
    pub fn plugin_dir(&self) -> &Utf8Path {
        &self.plugin_dir
    }

    /// The directory all reports are written under.
    pub fn reports_dir(&self) -> &Utf8Path {
        &self.reports_dir
    }

    /// How report directories are named.
    pub fn name_strategy(&self) -> NameStrategy {
        self.name_strategy
    }

    /// Returns the directory a report generated at `now` should be written to.
    ///
    /// With [`NameStrategy::Overwrite`] this is the `xml-report` directory itself.
    pub fn report_dir(&self, now: &DateTime<Local>) -> Utf8PathBuf {
        let base = self.reports_dir.join(REPORT_SUBDIR);
        let name = self.name_strategy.dir_name(now);
        if name.is_empty() { base } else { base.join(name) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn opts(
        project_root: Option<&str>,
        reports_dir: Option<&str>,
        overwrite_reports: Option<&str>,
    ) -> ConfigOpts {
        ConfigOpts {
            project_root: project_root.map(Utf8PathBuf::from),
            reports_dir: reports_dir.map(Utf8PathBuf::from),
            overwrite_reports: overwrite_reports.map(str::to_owned),
        }
    }

    fn context(opts: &ConfigOpts) -> Result<ReportContext> {
        ReportContext::with_plugin_dir(opts, "/opt/plugins/xml-report".into())
    }

    #[test]
    fn missing_project_root() {
        for opts in [opts(None, None, None), opts(Some("  "), None, None)] {
            let err = context(&opts).expect_err("project root is required");
            assert!(
                matches!(
                    err,
                    ExpectedError::ConfigurationMissing {
                        var_name: PROJECT_ROOT_ENV
                    }
                ),
                "unexpected error: {err:?}"
            );
        }
    }

    #[test]
    fn reports_dir_resolution() {
        let cx = context(&opts(Some("/work/project"), None, None)).unwrap();
        assert_eq!(cx.project_root().as_str(), "/work/project");
        assert_eq!(cx.plugin_dir().as_str(), "/opt/plugins/xml-report");
        assert_eq!(cx.reports_dir().as_str(), "/work/project/reports");

        let cx = context(&opts(Some("/work/project"), Some(""), None)).unwrap();
        assert_eq!(cx.reports_dir().as_str(), "/work/project/reports");

        let cx = context(&opts(Some("/work/project"), Some("out/reports"), None)).unwrap();
        assert_eq!(cx.reports_dir().as_str(), "/work/project/out/reports");

        let cx = context(&opts(Some("/work/project"), Some("/tmp/reports"), None)).unwrap();
        assert_eq!(cx.reports_dir().as_str(), "/tmp/reports");
    }

    #[test]
    fn report_dir_by_strategy() {
        let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 4, 5).unwrap();

        let cx = context(&opts(Some("/work/project"), None, Some("true"))).unwrap();
        assert_eq!(cx.name_strategy(), NameStrategy::Overwrite);
        assert_eq!(
            cx.report_dir(&now).as_str(),
            "/work/project/reports/xml-report"
        );
        assert_eq!(cx.report_dir(&now), cx.report_dir(&Local::now()));

        let cx = context(&opts(Some("/work/project"), None, Some("false"))).unwrap();
        assert_eq!(cx.name_strategy(), NameStrategy::Timestamped);
        assert_eq!(
            cx.report_dir(&now).as_str(),
            "/work/project/reports/xml-report/2026-10-16 09.04.05"
        );
    }
}
