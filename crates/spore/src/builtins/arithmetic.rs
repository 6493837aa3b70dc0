//! `+`, `-`, `<`, `>`: the arithmetic built-ins, the interpreter's minimum
//! numeric surface.
//!
//! The numeric tower is limited to `i64`/`f64` with no implicit coercion
//! beyond mixed-arithmetic promotion to float.

use super::args::at_least;
use crate::{
    ctx::{NativeCtx, NativeFn},
    error::{Error, err},
    value::Value,
};

#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

fn as_number(v: Value) -> Result<Num, Error> {
    match v {
        Value::Int(i) => Ok(Num::Int(i)),
        Value::Float(f) => Ok(Num::Float(f)),
        other => Err(err!(WrongType, format!("expected a number, got {}", other.type_name()))),
    }
}

fn add(a: Num, b: Num) -> Num {
    match (a, b) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_add(b)),
        (Num::Float(a), Num::Float(b)) => Num::Float(a + b),
        (Num::Int(a), Num::Float(b)) | (Num::Float(b), Num::Int(a)) => Num::Float(a as f64 + b),
    }
}

fn sub(a: Num, b: Num) -> Num {
    match (a, b) {
        (Num::Int(a), Num::Int(b)) => Num::Int(a.wrapping_sub(b)),
        (Num::Float(a), Num::Float(b)) => Num::Float(a - b),
        (Num::Int(a), Num::Float(b)) => Num::Float(a as f64 - b),
        (Num::Float(a), Num::Int(b)) => Num::Float(a - b as f64),
    }
}

fn as_value(n: Num) -> Value {
    match n {
        Num::Int(i) => Value::Int(i),
        Num::Float(f) => Value::Float(f),
    }
}

fn as_f64(n: Num) -> f64 {
    match n {
        Num::Int(i) => i as f64,
        Num::Float(f) => f,
    }
}

/// Zero arguments yields integer `0`; any other count sums left-to-right,
/// promoting to float if any argument is a float.
fn plus(_ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    let Some((&first, rest)) = args.split_first() else {
        return Ok(Value::Int(0));
    };
    let mut acc = as_number(first)?;
    for &arg in rest {
        acc = add(acc, as_number(arg)?);
    }
    Ok(as_value(acc))
}

fn minus(_ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    at_least(args, 1)?;
    if args.len() == 1 {
        return Ok(as_value(sub(Num::Int(0), as_number(args[0])?)));
    }
    let mut acc = as_number(args[0])?;
    for &arg in &args[1..] {
        acc = sub(acc, as_number(arg)?);
    }
    Ok(as_value(acc))
}

/// `<`/`>` chain across any number of arguments: `(< a b c)` is true iff
/// `a<b` and `b<c`. Zero or one argument is vacuously true; a single
/// argument still has to be a number.
fn chained_compare(args: &[Value], cmp: fn(f64, f64) -> bool) -> Result<Value, Error> {
    if args.is_empty() {
        return Ok(Value::Bool(true));
    }
    let mut prev = as_f64(as_number(args[0])?);
    for &arg in &args[1..] {
        let next = as_f64(as_number(arg)?);
        if !cmp(prev, next) {
            return Ok(Value::Bool(false));
        }
        prev = next;
    }
    Ok(Value::Bool(true))
}

fn less_than(_ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    chained_compare(args, |a, b| a < b)
}

fn greater_than(_ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    chained_compare(args, |a, b| a > b)
}

pub static PLUS: NativeFn = NativeFn { name: "+", is_macro: false, call: plus };
pub static MINUS: NativeFn = NativeFn { name: "-", is_macro: false, call: minus };
pub static LESS_THAN: NativeFn = NativeFn { name: "<", is_macro: false, call: less_than };
pub static GREATER_THAN: NativeFn = NativeFn { name: ">", is_macro: false, call: greater_than };
