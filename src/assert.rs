//! The assertion entry point.

use crate::{
    buffer, config,
    edit::{PendingEdit, SyntaxDescriptor},
    flush, host, locator, util, Location, SourceFile, Strategy,
};

/// Compares `value`'s snapshot against the embedded `expected` value and, on
/// disagreement or absence, fails the test and records a source edit to be
/// applied when the bundle finishes.
///
/// `expected` is the raw value of the embedded literal; its framing (the
/// leading newline and the indentation) is stripped before comparison. An
/// absent `expected` records even when record mode is off. `location` is the
/// start of the call, as captured by [`std::panic::Location::caller`] in the
/// assertion surface.
pub fn assert_inline_snapshot<Value>(
    value: Value,
    strategy: &dyn Strategy<Value>,
    expected: Option<&str>,
    function_name: &str,
    descriptor: SyntaxDescriptor,
    location: &Location,
) {
    let recording = config::is_recording();

    let actual = match strategy.snapshot(value) {
        Ok(actual) => actual,
        Err(error) => {
            host::host().fail(&format!("{error:#}"), &location.file, location.line);
            return;
        }
    };

    let expected = expected.map(util::normalize_inline);

    if !recording {
        if let Some(expected) = &expected {
            let Some(difference) = strategy.diff(expected, &actual) else {
                return;
            };
            let line = slot_line_or_assertion_line(location, &descriptor);
            host::host().fail(
                &format!("Snapshot of `{function_name}` did not match:\n{difference}"),
                &location.file,
                line,
            );
            return;
        }
    }

    // Recording, or no expected snapshot yet. Queue the edit before failing;
    // a host is allowed to fail by panicking.
    let message = if expected.is_none() {
        "Automatically recorded a new snapshot."
    } else {
        "Record mode is on. Recorded a new snapshot."
    };
    buffer::record(
        location.file.clone(),
        PendingEdit {
            expected,
            actual,
            was_recording: recording,
            descriptor,
            function_name: function_name.to_owned(),
            line: location.line,
            column: location.column,
        },
    );
    flush::ensure_hook_installed();
    host::host().fail(message, &location.file, location.line);
}

fn slot_line_or_assertion_line(location: &Location, descriptor: &SyntaxDescriptor) -> usize {
    // A call site that cannot be read or located falls back to the
    // assertion's own line.
    SourceFile::parse(&location.file)
        .ok()
        .and_then(|source_file| {
            locator::slot_line(&source_file, location.line, location.column, descriptor)
        })
        .unwrap_or(location.line)
}
