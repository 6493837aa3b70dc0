//! Canonical text rendering of values, the inverse of [`crate::reader`].
//!
//! Used by the `print` and `str->sexp`/`str->sexps` built-ins. Every
//! canonical value (numbers, booleans, strings without embedded quotes,
//! symbols with 0-3 quotes, keys, and lists of canonical values) parses
//! back to an equal value after being printed.

use std::fmt::Write;

use crate::{intern::Interner, object_manager::ObjectManager, value::Value};

/// Writes `value`'s canonical text form to `out`.
pub fn write_value(out: &mut String, value: Value, interner: &Interner, manager: &ObjectManager) {
    match value {
        Value::Void => out.push_str("void"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => write_float(out, f),
        Value::String(h) => write_string(out, manager.get_string(h).map(|s| s.0.as_slice()).unwrap_or(b"")),
        Value::Symbol(sym) => {
            for _ in 0..sym.quotes() {
                out.push('\'');
            }
            out.push_str(interner.resolve_str(sym.id()));
        }
        Value::Key(id) => {
            out.push(':');
            out.push_str(interner.resolve_str(id));
        }
        Value::List(h) => {
            out.push('(');
            if let Some(list) = manager.get_list(h) {
                for (i, item) in list.0.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    write_value(out, *item, interner, manager);
                }
            }
            out.push(')');
        }
        Value::NativeFunction(nf) => {
            let _ = write!(out, "<native-function {}>", nf.name);
        }
        Value::BytecodeFunction(h) => {
            let name = manager
                .get_function(h)
                .map(|f| String::from_utf8_lossy(&f.name).into_owned())
                .unwrap_or_default();
            let _ = write!(out, "<function {name}>");
        }
    }
}

/// Formats a float so it always contains a decimal point (or exponent),
/// ensuring the printed form re-parses as a `Float` rather than an `Int`.
fn write_float(out: &mut String, f: f64) {
    if f.is_finite() && f == f.trunc() && f.abs() < 1e18 {
        let _ = write!(out, "{f:.1}");
    } else {
        let _ = write!(out, "{f}");
    }
}

fn write_string(out: &mut String, bytes: &[u8]) {
    out.push('"');
    for &b in bytes {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\r' => out.push_str("\\r"),
            _ => out.push(b as char),
        }
    }
    out.push('"');
}

/// Renders `value` as a fresh, owned `String`.
#[must_use]
pub fn to_string(value: Value, interner: &Interner, manager: &ObjectManager) -> String {
    let mut out = String::new();
    write_value(&mut out, value, interner, manager);
    out
}
