//! Edit engine for linecut.
//!
//! Responsibilities:
//! - Read the target file fully into a [`LineSequence`].
//! - Check the guard line before anything destructive happens.
//! - Excise the fixed removal range in memory and write the result back.
//! - Produce a [`RepairReport`] and, on request, a unified diff preview.
//!
//! The pipeline is split into [`load`], [`LoadedFile::check_guard`],
//! [`LoadedFile::excise`] and [`EditedFile::write`] so callers can report
//! progress between steps. [`run`] composes them.

pub mod error;
pub mod guard;
pub mod lines;
pub mod patch;
pub mod report;

pub use error::{GuardError, RepairError, RepairResult};
pub use guard::{GUARD_LINE_INDEX, GUARD_MARKER, Guard};
pub use lines::{Line, LineSequence};
pub use patch::{GarbagePatch, REMOVAL_END, REMOVAL_START, RemovalRange, TARGET_PATH};
pub use report::{RepairReport, render_patch};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use fs_err as fs;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute the edit but leave the file on disk untouched.
    pub dry_run: bool,
}

/// The target file as read from disk.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    patch: GarbagePatch,
    path: Utf8PathBuf,
    original: String,
    lines: LineSequence,
}

/// The in-memory result of excising the removal range.
#[derive(Debug, Clone)]
pub struct EditedFile {
    path: Utf8PathBuf,
    original: String,
    lines_before: usize,
    edited: LineSequence,
}

fn abs_path(root: &Utf8Path, rel: &str) -> Utf8PathBuf {
    let rel = Utf8Path::new(rel);
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

/// Read and decode the fixed target under `root`.
pub fn load(root: &Utf8Path) -> RepairResult<LoadedFile> {
    let patch = GarbagePatch::FIXED;
    let path = abs_path(root, patch.target);
    let bytes = fs::read(&path).map_err(anyhow::Error::from)?;
    let original =
        String::from_utf8(bytes).with_context(|| format!("decode {} as UTF-8", path))?;
    let lines = LineSequence::parse(&original);
    debug!("read {} lines ({} bytes) from {}", lines.len(), original.len(), path);

    Ok(LoadedFile {
        patch,
        path,
        original,
        lines,
    })
}

impl LoadedFile {
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn lines(&self) -> &LineSequence {
        &self.lines
    }

    pub fn guard(&self) -> Guard {
        self.patch.guard
    }

    pub fn check_guard(&self) -> RepairResult<()> {
        self.patch.guard.check(&self.lines)?;
        debug!(
            "guard marker {:?} found at line {}",
            self.patch.guard.marker,
            self.patch.guard.line_number()
        );
        Ok(())
    }

    /// Drop the removal range. Does not re-check the guard.
    pub fn excise(self) -> EditedFile {
        let edited = self.patch.removal.apply(&self.lines);
        EditedFile {
            path: self.path,
            lines_before: self.lines.len(),
            original: self.original,
            edited,
        }
    }
}

impl EditedFile {
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn lines(&self) -> &LineSequence {
        &self.edited
    }

    pub fn lines_removed(&self) -> usize {
        self.lines_before - self.edited.len()
    }

    /// Unified diff between the file on disk and the edited text.
    pub fn preview(&self) -> String {
        render_patch(self.path.as_str(), &self.original, &self.edited.to_text())
    }

    /// Report for this edit without touching disk.
    pub fn report(&self, dry_run: bool) -> RepairReport {
        let after = self.edited.to_text();
        RepairReport {
            path: self.path.clone(),
            dry_run,
            lines_before: self.lines_before,
            lines_after: self.edited.len(),
            lines_removed: self.lines_removed(),
            before_sha256: report::sha256_hex(self.original.as_bytes()),
            after_sha256: report::sha256_hex(after.as_bytes()),
            before_bytes: self.original.len() as u64,
            after_bytes: after.len() as u64,
            completed_at: Utc::now(),
        }
    }

    /// Overwrite the target with the edited lines. Not atomic.
    pub fn write(&self) -> RepairResult<RepairReport> {
        let contents = self.edited.to_text();
        fs::write(&self.path, contents.as_bytes()).map_err(anyhow::Error::from)?;
        info!(
            "removed {} lines from {} ({} -> {} lines)",
            self.lines_removed(),
            self.path,
            self.lines_before,
            self.edited.len()
        );
        Ok(self.report(false))
    }
}

/// Load, check, excise and (unless `dry_run`) write in one call.
pub fn run(root: &Utf8Path, opts: &RunOptions) -> RepairResult<RepairReport> {
    let loaded = load(root)?;
    loaded.check_guard()?;
    let edited = loaded.excise();
    if opts.dry_run {
        debug!("dry-run: not writing {}", edited.path());
        Ok(edited.report(true))
    } else {
        edited.write()
    }
}
