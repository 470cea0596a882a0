//! The source rewriter: applies a file's pending edits by splicing
//! synthesized closure literals into the original text.

use crate::{
    edit::PendingEdit,
    slots::{self, ResolvedSlot, Slot},
    splice::Splicer,
    util, SourceFile,
};
use anyhow::{bail, Error, Result};
use indexmap::IndexMap;
use log::warn;
use proc_macro2::LineColumn;
use syn::{
    spanned::Spanned,
    visit::{self, Visit},
    ExprCall,
};

/// Applies `edits` to `source_file`, returning the rewritten text. The text
/// equals the original when every edit is a no-op.
///
/// Edits are processed in (line, slot offset) order; edits that share a call
/// site are consumed together in that order, and an identical
/// (line, column, offset) key recorded twice resolves to the last recording.
pub fn rewrite(source_file: &SourceFile, mut edits: Vec<PendingEdit>) -> Result<String> {
    edits.sort_by_key(|edit| (edit.line, edit.descriptor.trailing_closure_offset));
    // The source already matches; nothing to splice.
    edits.retain(|edit| edit.expected.as_deref() != Some(edit.actual.as_str()));

    let contents = source_file.contents();
    let mut visitor = Visitor {
        contents,
        one_level: util::one_level_indent(contents),
        edits,
        patches: Vec::new(),
        error: None,
    };
    visitor.visit_file(source_file.syntax());

    if let Some(error) = visitor.error {
        return Err(error);
    }

    if !visitor.edits.is_empty() {
        warn!(
            "failed to locate {} assertion call(s) in {}",
            visitor.edits.len(),
            source_file.display(),
        );
    }

    visitor.patches.sort_by_key(|patch| patch.start);

    let mut splicer = Splicer::new(contents);
    for patch in &visitor.patches {
        splicer.splice(patch.start, patch.end, &patch.replacement);
    }
    Ok(splicer.into_contents())
}

struct Patch {
    start: LineColumn,
    end: LineColumn,
    replacement: String,
}

struct Visitor<'original> {
    contents: &'original str,
    one_level: &'original str,
    edits: Vec<PendingEdit>,
    patches: Vec<Patch>,
    error: Option<Error>,
}

impl<'ast> Visit<'ast> for Visitor<'_> {
    fn visit_expr_call(&mut self, function_call: &'ast ExprCall) {
        if self.error.is_some() {
            return;
        }

        let key = function_call.func.span().start();
        let edits = self.take_matching(key);
        if edits.is_empty() {
            visit::visit_expr_call(self, function_call);
            return;
        }

        // Arguments appended by earlier edits in this batch shift where later
        // ones land.
        let mut appended = 0;
        for edit in &edits {
            match self.plan(function_call, edit, &mut appended) {
                Ok(Some(patch)) => self.patches.push(patch),
                Ok(None) => {}
                Err(error) => {
                    self.error = Some(error);
                    return;
                }
            }
        }
        // Do not descend into the matched call.
    }
}

impl Visitor<'_> {
    /// Removes and returns the edits keyed by `key`, preserving their sorted
    /// order. Duplicated (line, column, offset) keys collapse to the last
    /// recording.
    fn take_matching(&mut self, key: LineColumn) -> Vec<PendingEdit> {
        let mut matched = IndexMap::new();
        let mut i = 0;
        while i < self.edits.len() {
            if self.edits[i].line == key.line && self.edits[i].column == key.column {
                let edit = self.edits.remove(i);
                matched.insert(edit.descriptor.trailing_closure_offset, edit);
            } else {
                i += 1;
            }
        }
        matched.into_values().collect()
    }

    fn plan(
        &self,
        function_call: &ExprCall,
        edit: &PendingEdit,
        appended: &mut usize,
    ) -> Result<Option<Patch>> {
        let leading_trivia =
            leading_trivia_of_line(self.contents, function_call.func.span().start().line);
        let closure_text = synthesized_closure(&edit.actual, leading_trivia, self.one_level);

        match slots::resolve(function_call, edit.descriptor.trailing_closure_offset) {
            ResolvedSlot::Existing(Slot::Bare(closure)) => {
                if !edit.was_recording {
                    bail!(
                        "`{}` at {}:{} already has a closure in slot {}; the descriptor does not \
                         match the source",
                        edit.function_name,
                        edit.line,
                        edit.column + 1,
                        edit.descriptor.trailing_closure_offset,
                    );
                }
                Ok(Some(Patch {
                    start: closure.span().start(),
                    end: closure.span().end(),
                    replacement: closure_text,
                }))
            }
            ResolvedSlot::Existing(Slot::Labeled {
                label, closure, call, ..
            }) => {
                if *label == edit.descriptor.trailing_closure_label {
                    // An existing labeled slot is only overwritten when the
                    // assertion ran in record mode.
                    if edit.was_recording {
                        Ok(Some(Patch {
                            start: closure.span().start(),
                            end: closure.span().end(),
                            replacement: closure_text,
                        }))
                    } else {
                        Ok(None)
                    }
                } else {
                    Ok(Some(Patch {
                        start: call.span().start(),
                        end: call.span().start(),
                        replacement: format!(
                            "{}({closure_text}), ",
                            edit.descriptor.trailing_closure_label,
                        ),
                    }))
                }
            }
            ResolvedSlot::AppendBare => {
                let mut text = String::from(append_separator(function_call, *appended));
                text += &closure_text;
                *appended += 1;
                let position = function_call.paren_token.span.close().start();
                Ok(Some(Patch {
                    start: position,
                    end: position,
                    replacement: text,
                }))
            }
            ResolvedSlot::AppendLabeled { beyond } => {
                let label = &edit.descriptor.trailing_closure_label;
                let mut text = String::new();
                // Earlier edits in this batch may have filled part of the
                // gap; pad the rest with empty labeled closures so the
                // target lands at its offset.
                while *appended < beyond {
                    text += append_separator(function_call, *appended);
                    text += &format!("{label}(|| {{}})");
                    *appended += 1;
                }
                text += append_separator(function_call, *appended);
                text += &format!("{label}({closure_text})");
                *appended += 1;
                let position = function_call.paren_token.span.close().start();
                Ok(Some(Patch {
                    start: position,
                    end: position,
                    replacement: text,
                }))
            }
        }
    }
}

/// The separator preceding the `appended`th argument added to
/// `function_call`.
fn append_separator(function_call: &ExprCall, appended: usize) -> &'static str {
    if appended > 0 {
        ", "
    } else if function_call.args.is_empty() {
        ""
    } else if function_call.args.trailing_punct() {
        " "
    } else {
        ", "
    }
}

/// Synthesizes the replacement closure: a single raw multi-line string
/// literal, indented one level past the call's own line.
fn synthesized_closure(actual: &str, leading_trivia: &str, one_level: &str) -> String {
    let pounds = "#".repeat(util::pound_count(actual));
    let inner = format!("{leading_trivia}{one_level}");
    let body = util::indent(actual, &inner);
    format!("|| {{\n{inner}r{pounds}\"\n{body}\n{inner}\"{pounds}\n{leading_trivia}}}")
}

fn leading_trivia_of_line(contents: &str, line: usize) -> &str {
    let text = contents
        .split('\n')
        .nth(line.saturating_sub(1))
        .unwrap_or_default();
    &text[..text.len() - text.trim_start().len()]
}
