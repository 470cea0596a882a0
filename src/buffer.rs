//! The process-wide recording buffer: per-file lists of pending edits,
//! populated by assertions and drained by the flush.

use crate::edit::PendingEdit;
use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;
use std::{
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

static PENDING_EDITS: Lazy<Mutex<IndexMap<PathBuf, Vec<PendingEdit>>>> =
    Lazy::new(|| Mutex::new(IndexMap::new()));

/// Appends `edit` to `path`'s pending list. The critical section is just the
/// append.
pub(crate) fn record(path: PathBuf, edit: PendingEdit) {
    debug!(
        "recording snapshot for `{}` at {}:{}",
        edit.function_name,
        path.display(),
        edit.line,
    );
    let mut pending_edits = PENDING_EDITS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    pending_edits.entry(path).or_default().push(edit);
}

/// Takes every pending edit, leaving the buffer empty. Files keep the order
/// in which they were first recorded; edits keep input order.
#[must_use]
pub(crate) fn drain() -> IndexMap<PathBuf, Vec<PendingEdit>> {
    let mut pending_edits = PENDING_EDITS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::take(&mut *pending_edits)
}
