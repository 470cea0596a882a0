//! Classification of a call's arguments into snapshot slots.
//!
//! A slot is an argument that can hold an inline snapshot: a bare closure
//! literal `|| { .. }`, or a labeled closure `label(|| { .. })`. The slot
//! suffix is the maximal run of slots at the end of the argument list; a
//! descriptor's offset counts from the start of that suffix.

use if_chain::if_chain;
use syn::{Expr, ExprCall, ExprClosure, ExprPath};

#[derive(Clone, Copy)]
pub(crate) enum Slot<'ast> {
    /// A bare closure literal: `|| { .. }`.
    Bare(&'ast ExprClosure),
    /// A labeled closure: `label(|| { .. })`.
    Labeled {
        label: &'ast syn::Ident,
        call: &'ast ExprCall,
        closure: &'ast ExprClosure,
    },
}

impl<'ast> Slot<'ast> {
    pub fn closure(self) -> &'ast ExprClosure {
        match self {
            Slot::Bare(closure) | Slot::Labeled { closure, .. } => closure,
        }
    }
}

pub(crate) fn as_slot(expr: &Expr) -> Option<Slot<'_>> {
    match expr {
        Expr::Closure(closure) => Some(Slot::Bare(closure)),
        Expr::Call(call) => {
            if_chain! {
                if let Expr::Path(ExprPath { qself: None, path, .. }) = &*call.func;
                if let Some(label) = path.get_ident();
                if call.args.len() == 1;
                if let Some(Expr::Closure(closure)) = call.args.first();
                then {
                    Some(Slot::Labeled { label, call, closure })
                } else {
                    None
                }
            }
        }
        _ => None,
    }
}

pub(crate) enum ResolvedSlot<'ast> {
    /// The target indexes an existing argument of the call.
    Existing(Slot<'ast>),
    /// The call has no slot suffix and the offset selects its first
    /// position; a bare closure belongs there. Every other empty position
    /// takes a labeled closure.
    AppendBare,
    /// The target lies `beyond` positions past the end of the argument
    /// list; labeled closures fill the gap and the target itself.
    AppendLabeled { beyond: usize },
}

/// Resolves the slot that `trailing_closure_offset` selects within `call`.
pub(crate) fn resolve(call: &ExprCall, trailing_closure_offset: usize) -> ResolvedSlot<'_> {
    let args = call.args.iter().collect::<Vec<_>>();

    let suffix_len = args
        .iter()
        .rev()
        .take_while(|arg| as_slot(arg).is_some())
        .count();
    let first_trailing = args.len() - suffix_len;

    let target = first_trailing + trailing_closure_offset;

    if target < args.len() {
        match as_slot(args[target]) {
            Some(slot) => ResolvedSlot::Existing(slot),
            // The offset is non-negative, so `target` cannot land before the
            // slot suffix.
            None => unreachable!(),
        }
    } else if suffix_len == 0 && trailing_closure_offset == 0 {
        ResolvedSlot::AppendBare
    } else {
        ResolvedSlot::AppendLabeled {
            beyond: target - args.len(),
        }
    }
}
