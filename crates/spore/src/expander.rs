//! Macro expansion: rewrites a parsed form until no list is headed by a
//! symbol bound to a macro.
//!
//! The expander itself knows nothing about any particular macro — `def`,
//! `defun`, and `when` are ordinary [`crate::ctx::NativeFn`] values registered
//! in the [`Module`] with `is_macro: true` (see `builtins::macros`). A macro
//! call is invoked exactly like any other native call, except its arguments
//! are the raw, unevaluated forms rather than evaluated values, and its
//! result replaces the call site rather than becoming the call site's
//! runtime value.

use crate::{
    ctx::NativeCtx,
    error::Error,
    intern::Interner,
    module::Module,
    object_manager::{ListObj, ObjectManager},
    print_sink::PrintSink,
    value::Value,
};

/// Expands `value` to a fixed point: repeatedly rewrites macro calls,
/// anywhere in the tree, until a full pass makes no further change.
pub fn expand(
    value: Value,
    manager: &mut ObjectManager,
    interner: &mut Interner,
    module: &mut Module,
    print_sink: &mut dyn PrintSink,
) -> Result<Value, Error> {
    let mut current = value;
    loop {
        let (next, changed) = expand_once(current, manager, interner, module, print_sink)?;
        if !changed {
            return Ok(next);
        }
        current = next;
    }
}

/// One rewrite pass: expands the outermost macro call found, or if none sits
/// at the root, recurses into children. Returns the possibly-rewritten value
/// and whether anything changed.
fn expand_once(
    value: Value,
    manager: &mut ObjectManager,
    interner: &mut Interner,
    module: &mut Module,
    print_sink: &mut dyn PrintSink,
) -> Result<(Value, bool), Error> {
    let Value::List(handle) = value else {
        return Ok((value, false));
    };
    let items = manager.get_list(handle).map(|l| l.0.clone()).unwrap_or_default();

    if let Some(macro_fn) = macro_head(&items, interner, module) {
        let mut ctx = NativeCtx { manager, interner, module, print_sink };
        let replacement = (macro_fn.call)(&mut ctx, &items[1..])?;
        return Ok((replacement, true));
    }

    let mut changed = false;
    let mut rewritten = Vec::with_capacity(items.len());
    for item in items {
        let (next, item_changed) = expand_once(item, manager, interner, module, print_sink)?;
        changed |= item_changed;
        rewritten.push(next);
    }
    if changed {
        Ok((Value::List(manager.put_list(ListObj(rewritten))), true))
    } else {
        Ok((value, false))
    }
}

/// If `items`'s head is a bareword symbol bound to a macro, returns that
/// macro's descriptor.
fn macro_head(items: &[Value], interner: &Interner, module: &Module) -> Option<&'static crate::ctx::NativeFn> {
    let Some(Value::Symbol(sym)) = items.first() else {
        return None;
    };
    if sym.quotes() != 0 {
        return None;
    }
    let _ = interner; // name resolution happens by id, kept for symmetry with compiler's head_name
    match module.get(sym.id()) {
        Some(Value::NativeFunction(nf)) if nf.is_macro => Some(nf),
        _ => None,
    }
}
