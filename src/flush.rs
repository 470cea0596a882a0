//! Draining the recording buffer into on-disk rewrites, once the test bundle
//! finishes.

use crate::{buffer, edit::PendingEdit, host, rewriter, SourceFile};
use anyhow::{Context, Result};
use log::info;
use std::{io::Write, path::Path, sync::Once};
use tempfile::NamedTempFile;

static HOOK: Once = Once::new();

/// Installs the bundle-finished hook the first time an edit is recorded.
pub(crate) fn ensure_hook_installed() {
    HOOK.call_once(|| {
        host::host().install_on_bundle_finished(Box::new(|| {
            if let Err(error) = flush_pending_edits() {
                // A partially applied recording state cannot be reconciled.
                #[allow(clippy::panic)]
                {
                    panic!("{error:?}");
                }
            }
        }));
    });
}

/// Applies every pending edit, file by file, writing each changed file
/// atomically. Harnesses that have their own notion of "bundle finished" may
/// call this directly instead of going through a [`crate::Host`].
pub fn flush_pending_edits() -> Result<()> {
    for (path, edits) in buffer::drain() {
        flush_file(&path, edits)?;
    }
    Ok(())
}

fn flush_file(path: &Path, edits: Vec<PendingEdit>) -> Result<()> {
    let first_line = edits.first().map_or(0, |edit| edit.line);

    let source_file = SourceFile::parse(path)
        .with_context(|| format!("Failed to load {}:{first_line}", path.display()))?;

    let rewritten = rewriter::rewrite(&source_file, edits)?;
    if rewritten == source_file.contents() {
        return Ok(());
    }

    write_atomically(path, &rewritten)
        .with_context(|| format!("Failed to write {}:{first_line}", path.display()))?;
    info!("updated inline snapshots in {}", path.display());
    Ok(())
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("{} has no parent directory", path.display()))?;
    let mut tempfile = NamedTempFile::new_in(parent)?;
    tempfile.write_all(contents.as_bytes())?;
    tempfile.persist(path)?;
    Ok(())
}
