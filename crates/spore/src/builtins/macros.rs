//! The three built-in macros: `def`, `defun`, `when`.
//!
//! Each is an ordinary [`crate::ctx::NativeFn`] with `is_macro: true`,
//! invoked by the expander with its *unevaluated* argument forms and
//! expected to return a replacement expression built from the compiler's
//! special forms (`%define`, `function`, `if`, `do`). None of the three
//! special-cases anything the compiler doesn't already know how to lower.

use crate::{
    ctx::{NativeCtx, NativeFn},
    error::{Error, err},
    object_manager::ListObj,
    value::{Symbol, Value},
};

use super::args::at_least;

fn bareword(ctx: &mut NativeCtx<'_>, name: &str) -> Value {
    let id = ctx.interner.intern(name.as_bytes());
    Value::Symbol(Symbol::bareword(id))
}

fn as_name_symbol(v: Value) -> Result<Symbol, Error> {
    match v {
        Value::Symbol(s) if s.quotes() == 0 => Ok(s),
        _ => Err(err!(BadDefine, "expected an unquoted symbol name")),
    }
}

/// `(def name value)` -> `(%define 'name value)`.
fn def(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    if args.len() != 2 {
        return Err(err!(BadDefine, format!("def expects 2 arguments, got {}", args.len())));
    }
    let name = as_name_symbol(args[0])?;
    let define_sym = bareword(ctx, "%define");
    let quoted_name = Value::Symbol(Symbol::new(1, name.id()));
    let handle = ctx.manager.put_list(ListObj(vec![define_sym, quoted_name, args[1]]));
    Ok(Value::List(handle))
}

/// `(defun name (params...) body...)` -> `(%define 'name (function (params...) body...))`.
fn defun(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    at_least(args, 2).map_err(|_| err!(BadFunction, "defun expects a name, a parameter list, and a body"))?;
    let name = as_name_symbol(args[0])?;
    let params = args[1];
    if !matches!(params, Value::List(_)) {
        return Err(err!(BadFunction, "defun's second argument must be a parameter list"));
    }

    let function_sym = bareword(ctx, "function");
    let mut function_items = vec![function_sym, params];
    function_items.extend_from_slice(&args[2..]);
    let function_expr = Value::List(ctx.manager.put_list(ListObj(function_items)));

    let define_sym = bareword(ctx, "%define");
    let quoted_name = Value::Symbol(Symbol::new(1, name.id()));
    let handle = ctx.manager.put_list(ListObj(vec![define_sym, quoted_name, function_expr]));
    Ok(Value::List(handle))
}

/// `(when pred body...)` -> `(if pred (do body...))`.
fn when(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    at_least(args, 1).map_err(|_| err!(BadWhen, "when expects a predicate"))?;
    let pred = args[0];

    let do_sym = bareword(ctx, "do");
    let mut do_items = vec![do_sym];
    do_items.extend_from_slice(&args[1..]);
    let do_expr = Value::List(ctx.manager.put_list(ListObj(do_items)));

    let if_sym = bareword(ctx, "if");
    let handle = ctx.manager.put_list(ListObj(vec![if_sym, pred, do_expr]));
    Ok(Value::List(handle))
}

pub static DEF: NativeFn = NativeFn { name: "def", is_macro: true, call: def };
pub static DEFUN: NativeFn = NativeFn { name: "defun", is_macro: true, call: defun };
pub static WHEN: NativeFn = NativeFn { name: "when", is_macro: true, call: when };
