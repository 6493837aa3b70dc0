//! Small positional-argument helpers shared by the built-in implementations.
//!
//! Arity and type checks collapsed into one call so each built-in's `call`
//! body reads as the operation, not the validation.

use crate::{
    error::{Error, err},
    value::Value,
};

pub fn exactly<const N: usize>(args: &[Value]) -> Result<[Value; N], Error> {
    args.try_into().map_err(|_| err!(WrongArity, format!("expected {N} argument(s), got {}", args.len())))
}

pub fn at_least(args: &[Value], n: usize) -> Result<(), Error> {
    if args.len() < n {
        return Err(err!(WrongArity, format!("expected at least {n} argument(s), got {}", args.len())));
    }
    Ok(())
}

pub fn as_int(v: Value) -> Result<i64, Error> {
    match v {
        Value::Int(i) => Ok(i),
        other => Err(err!(WrongType, format!("expected int, got {}", other.type_name()))),
    }
}

pub fn as_symbol(v: Value) -> Result<crate::value::Symbol, Error> {
    match v {
        Value::Symbol(s) => Ok(s),
        other => Err(err!(WrongType, format!("expected symbol, got {}", other.type_name()))),
    }
}

pub fn as_list_handle(v: Value) -> Result<crate::object_manager::Handle, Error> {
    match v {
        Value::List(h) => Ok(h),
        other => Err(err!(WrongType, format!("expected list, got {}", other.type_name()))),
    }
}

pub fn as_string_handle(v: Value) -> Result<crate::object_manager::Handle, Error> {
    match v {
        Value::String(h) => Ok(h),
        other => Err(err!(WrongType, format!("expected string, got {}", other.type_name()))),
    }
}

/// Splits `args` into a fixed-size prefix and a trailing rest slice, erroring
/// if fewer than `N` arguments were given.
pub fn at_least_with_rest<const N: usize>(args: &[Value]) -> Result<([Value; N], &[Value]), Error> {
    if args.len() < N {
        return Err(err!(WrongArity, format!("expected at least {N} argument(s), got {}", args.len())));
    }
    let (prefix, rest) = args.split_at(N);
    Ok((prefix.try_into().expect("prefix has exactly N elements"), rest))
}
