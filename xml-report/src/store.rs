// Copyright (c) The xml-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{ExpectedError, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

/// File name of the rendered report within its directory.
pub static RESULT_FILE_NAME: &str = "result.xml";

/// Writes a rendered report into `dir`, creating the directory if needed.
///
/// An existing directory is reused. The file is replaced atomically, so readers never observe a
/// partially written report. Returns the path of the written file.
pub fn write_report(dir: &Utf8Path, contents: &[u8]) -> Result<Utf8PathBuf> {
    std::fs::create_dir_all(dir).map_err(|err| ExpectedError::ReportDirCreateError {
        dir: dir.to_owned(),
        err,
    })?;

    let path = dir.join(RESULT_FILE_NAME);
    tracing::debug!("writing {} bytes to {path}", contents.len());

    AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
        .write(|file| file.write_all(contents))
        .map_err(|err| ExpectedError::ResultFileWriteError {
            path: path.clone(),
            err: match err {
                atomicwrites::Error::Internal(err) => err,
                atomicwrites::Error::User(err) => err,
            },
        })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;

    #[test]
    fn writes_and_replaces() {
        let temp = Utf8TempDir::new().unwrap();
        let dir = temp.path().join("reports/xml-report/2026-10-16 09.04.05");

        let path = write_report(&dir, b"<result/>\n").unwrap();
        assert_eq!(path, dir.join(RESULT_FILE_NAME));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<result/>\n");

        // The directory already exists the second time around.
        let path = write_report(&dir, b"<result status=\"failed\"/>\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<result status=\"failed\"/>\n"
        );
    }

    #[test]
    fn dir_blocked_by_file() {
        let temp = Utf8TempDir::new().unwrap();
        let blocker = temp.path().join("reports");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_report(&blocker.join("xml-report"), b"<result/>").unwrap_err();
        assert!(
            matches!(&err, ExpectedError::ReportDirCreateError { dir, .. } if dir.ends_with("xml-report")),
            "unexpected error: {err:?}"
        );
    }
}
