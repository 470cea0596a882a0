//! Read-only lookup of the snapshot-slot line for a known assertion call,
//! so that failure markers point at the closure rather than the call.

use crate::{
    slots::{self, ResolvedSlot},
    SourceFile, SyntaxDescriptor,
};
use proc_macro2::LineColumn;
use syn::{
    spanned::Spanned,
    visit::{self, Visit},
    ExprCall,
};

/// Reports the starting line of the snapshot slot that `descriptor` selects
/// for the call whose callee starts at (`line`, `column`), or `None` if no
/// such call is present or the slot has not been written yet.
#[must_use]
pub fn slot_line(
    source_file: &SourceFile,
    line: usize,
    column: usize,
    descriptor: &SyntaxDescriptor,
) -> Option<usize> {
    let mut visitor = Visitor {
        key: LineColumn { line, column },
        descriptor,
        slot_line: None,
    };
    visitor.visit_file(source_file.syntax());
    visitor.slot_line
}

struct Visitor<'descriptor> {
    key: LineColumn,
    descriptor: &'descriptor SyntaxDescriptor,
    slot_line: Option<usize>,
}

impl<'ast> Visit<'ast> for Visitor<'_> {
    fn visit_expr_call(&mut self, function_call: &'ast ExprCall) {
        if self.slot_line.is_some() {
            return;
        }

        if function_call.func.span().start() == self.key {
            if let ResolvedSlot::Existing(slot) =
                slots::resolve(function_call, self.descriptor.trailing_closure_offset)
            {
                self.slot_line = Some(slot.closure().span().start().line);
            }
            // Do not descend into the matched call.
            return;
        }

        visit::visit_expr_call(self, function_call);
    }
}
