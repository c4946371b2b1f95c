//! Atomic report writing
//!
//! All five reports are written into a staging directory inside the output
//! directory and renamed into place only once every one of them rendered and
//! wrote cleanly. Existing reports are moved aside first and put back if any
//! rename fails, so the output directory either holds the complete new set
//! or is left as it was.

use crate::core::cancel::CancellationToken;
use crate::core::walker::STAGING_PREFIX;
use crate::error::{CartographerError, Result};
use crate::output::reports::RenderedReport;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Suffix for previous reports moved aside during a commit
const PREVIOUS_SUFFIX: &str = ".previous";

/// Writes a full report set into an output directory, all or nothing
#[derive(Debug)]
pub struct ReportWriter {
    output_dir: PathBuf,
    cancel: CancellationToken,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, cancel: CancellationToken) -> Self {
        Self {
            output_dir: output_dir.into(),
            cancel,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Stage every report, then move them into place together
    pub fn commit(&self, reports: &[RenderedReport]) -> Result<()> {
        if self.output_dir.is_file() {
            return Err(CartographerError::output_write(
                &self.output_dir,
                io::Error::new(io::ErrorKind::AlreadyExists, "output path is a file"),
            ));
        }

        let created_dir = !self.output_dir.exists();
        fs::create_dir_all(&self.output_dir)
            .map_err(|err| CartographerError::output_write(&self.output_dir, err))?;

        let result = self.stage_and_install(reports);
        if result.is_err() && created_dir {
            if let Err(err) = fs::remove_dir_all(&self.output_dir) {
                warn!(
                    "Could not remove output directory {}: {}",
                    self.output_dir.display(),
                    err
                );
            }
        }
        result
    }

    fn stage_and_install(&self, reports: &[RenderedReport]) -> Result<()> {
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.output_dir)
            .map_err(|err| CartographerError::output_write(&self.output_dir, err))?;

        for report in reports {
            let path = staging.path().join(report.kind.file_name());
            fs::write(&path, &report.content)
                .map_err(|err| CartographerError::output_write(self.output_dir.join(report.kind.file_name()), err))?;
        }
        debug!("Staged {} reports in {}", reports.len(), staging.path().display());

        // A repeated interrupt must not exit between the renames below
        let _exit_guard = self.cancel.defer_exit();

        // Last point at which an interrupt leaves everything untouched
        self.cancel.check()?;

        let names: Vec<&str> = reports.iter().map(|r| r.kind.file_name()).collect();
        self.install(staging.path(), &names)
        // `staging` is dropped here, removing moved-aside previous reports
    }

    /// Move staged files into the output directory, rolling back on failure
    fn install(&self, staging: &Path, names: &[&str]) -> Result<()> {
        // (target, moved-aside previous version)
        let mut installed: Vec<(PathBuf, Option<PathBuf>)> = Vec::with_capacity(names.len());

        for name in names {
            let staged = staging.join(name);
            let target = self.output_dir.join(name);
            let backup = staging.join(format!("{}{}", name, PREVIOUS_SUFFIX));

            let previous = if target.exists() {
                if let Err(err) = fs::rename(&target, &backup) {
                    rollback(&installed);
                    return Err(CartographerError::output_write(target, err));
                }
                Some(backup)
            } else {
                None
            };

            let result = fs::rename(&staged, &target);
            installed.push((target.clone(), previous));
            if let Err(err) = result {
                rollback(&installed);
                return Err(CartographerError::output_write(target, err));
            }
        }

        Ok(())
    }
}

/// Restore moved-aside reports and remove newly installed ones, newest first
fn rollback(installed: &[(PathBuf, Option<PathBuf>)]) {
    for (target, previous) in installed.iter().rev() {
        let result = match previous {
            Some(previous) => fs::rename(previous, target),
            None => match fs::remove_file(target) {
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(err) = result {
            warn!("Rollback failed for {}: {}", target.display(), err);
        }
    }
}
