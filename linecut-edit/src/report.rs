//! Repair report and unified-diff preview.

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use diffy::PatchFormatter;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// What a repair did (or would do, for a dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub path: Utf8PathBuf,
    pub dry_run: bool,
    pub lines_before: usize,
    pub lines_after: usize,
    pub lines_removed: usize,
    pub before_sha256: String,
    pub after_sha256: String,
    pub before_bytes: u64,
    pub after_bytes: u64,
    pub completed_at: DateTime<Utc>,
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Git-style unified diff of a single file edit. Empty when nothing changed.
pub fn render_patch(path: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    let formatter = PatchFormatter::new();
    let body = formatter.fmt_patch(&patch).to_string();
    // diffy repeats its own ---/+++ header; keep only the hunks.
    match body.find("@@") {
        Some(idx) => out.push_str(&body[idx..]),
        None => out.push_str(&body),
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
