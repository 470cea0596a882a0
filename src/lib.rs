#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::panic)]

//! Inline snapshot assertions that record themselves into the test source.
//!
//! An assertion's expected value lives in the test file itself, as a closure
//! returning a raw string literal. When the expected value is missing or
//! stale, the assertion fails and queues a source edit; when the test bundle
//! finishes, every touched file is rewritten in place, atomically, so the
//! next run passes.

pub use proc_macro2::LineColumn;

mod assert;
pub use assert::assert_inline_snapshot;

mod buffer;

mod config;
pub use config::{is_recording, set_recording, with_recording};

mod converter;
pub use converter::LocationConverter;

mod edit;
pub use edit::{PendingEdit, SyntaxDescriptor};

mod flush;
pub use flush::flush_pending_edits;

mod host;
pub use host::{set_host, Host};

mod location;
pub use location::Location;

mod locator;
pub use locator::slot_line;

mod rewriter;
pub use rewriter::rewrite;

mod slots;

mod source_file;
pub use source_file::SourceFile;

mod splice;

mod strategy;
pub use strategy::{FnStrategy, Strategy};

pub mod util;
