//! `VM::to_host`/`VM::from_host`: the minimum host interop contract, not a
//! general host-container-registration layer.
//!
//! A pair of small traits rather than one giant match on a host-type enum,
//! so adding a supported `T` is a new `impl` rather than a new arm somewhere
//! central.

use crate::{
    ctx::NativeFn,
    error::{Error, err},
    intern::StringId,
    object_manager::BytecodeFunctionObj,
    value::{Symbol, Value},
    vm::Vm,
};

/// The sum of the two numeric primitives, for host code that wants either
/// without committing to which.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

/// A host-facing, borrowed-name view of a `Symbol` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSymbol<'a> {
    pub quotes: u8,
    pub name: &'a [u8],
}

/// A host-facing, borrowed-name view of a `Key` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostKey<'a> {
    pub name: &'a [u8],
}

/// Converts a `Value` to a host type `Self`, borrowing from `vm` where the
/// source `Value` is heap-backed. Slices returned this way are invalidated
/// by the next `run_gc`.
pub trait FromValue<'vm>: Sized {
    fn from_value(v: Value, vm: &'vm Vm) -> Result<Self, Error>;
}

fn wrong_type(v: Value, expected: &str) -> Error {
    err!(WrongType, format!("expected {expected}, got {}", v.type_name()))
}

impl FromValue<'_> for () {
    fn from_value(v: Value, _vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::Void => Ok(()),
            other => Err(wrong_type(other, "void")),
        }
    }
}

impl FromValue<'_> for bool {
    fn from_value(v: Value, _vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::Bool(b) => Ok(b),
            other => Err(wrong_type(other, "bool")),
        }
    }
}

impl FromValue<'_> for i64 {
    fn from_value(v: Value, _vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::Int(i) => Ok(i),
            other => Err(wrong_type(other, "int")),
        }
    }
}

impl FromValue<'_> for f64 {
    fn from_value(v: Value, _vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::Float(f) => Ok(f),
            other => Err(wrong_type(other, "float")),
        }
    }
}

impl FromValue<'_> for Number {
    fn from_value(v: Value, _vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::Int(i) => Ok(Self::Int(i)),
            Value::Float(f) => Ok(Self::Float(f)),
            other => Err(wrong_type(other, "number")),
        }
    }
}

impl<'vm> FromValue<'vm> for &'vm [u8] {
    fn from_value(v: Value, vm: &'vm Vm) -> Result<Self, Error> {
        match v {
            Value::String(h) => vm.manager().get_string(h).map(|s| s.0.as_slice()).ok_or_else(|| err!(ObjectNotFound)),
            other => Err(wrong_type(other, "string")),
        }
    }
}

impl<'vm> FromValue<'vm> for &'vm [Value] {
    fn from_value(v: Value, vm: &'vm Vm) -> Result<Self, Error> {
        match v {
            Value::List(h) => vm.manager().get_list(h).map(|l| l.0.as_slice()).ok_or_else(|| err!(ObjectNotFound)),
            other => Err(wrong_type(other, "list")),
        }
    }
}

impl<'vm> FromValue<'vm> for HostSymbol<'vm> {
    fn from_value(v: Value, vm: &'vm Vm) -> Result<Self, Error> {
        match v {
            Value::Symbol(sym) => Ok(Self {
                quotes: sym.quotes(),
                name: vm.interner().resolve(sym.id()).unwrap_or(b""),
            }),
            other => Err(wrong_type(other, "symbol")),
        }
    }
}

impl<'vm> FromValue<'vm> for HostKey<'vm> {
    fn from_value(v: Value, vm: &'vm Vm) -> Result<Self, Error> {
        match v {
            Value::Key(id) => Ok(Self { name: vm.interner().resolve(id).unwrap_or(b"") }),
            other => Err(wrong_type(other, "key")),
        }
    }
}

/// The interned-id form of a symbol, for host code that wants to compare
/// identities rather than read the name.
impl FromValue<'_> for Symbol {
    fn from_value(v: Value, _vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::Symbol(sym) => Ok(sym),
            other => Err(wrong_type(other, "symbol")),
        }
    }
}

impl FromValue<'_> for StringId {
    fn from_value(v: Value, _vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::Key(id) => Ok(id),
            other => Err(wrong_type(other, "key")),
        }
    }
}

impl FromValue<'_> for &'static NativeFn {
    fn from_value(v: Value, _vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::NativeFunction(nf) => Ok(nf),
            other => Err(wrong_type(other, "native-function")),
        }
    }
}

/// A snapshot of a `BytecodeFunction`'s fields, copied out of the heap.
impl FromValue<'_> for BytecodeFunctionObj {
    fn from_value(v: Value, vm: &Vm) -> Result<Self, Error> {
        match v {
            Value::BytecodeFunction(h) => vm.manager().get_function(h).cloned().ok_or_else(|| err!(ObjectNotFound)),
            other => Err(wrong_type(other, "bytecode-function")),
        }
    }
}

impl<'vm, T: FromValue<'vm>> FromValue<'vm> for Option<T> {
    fn from_value(v: Value, vm: &'vm Vm) -> Result<Self, Error> {
        match v {
            Value::Void => Ok(None),
            other => T::from_value(other, vm).map(Some),
        }
    }
}

/// Converts a host value into a `Value`, allocating heap storage as needed.
pub trait ToValue {
    fn to_value(self, vm: &mut Vm) -> Value;
}

impl ToValue for () {
    fn to_value(self, _vm: &mut Vm) -> Value {
        Value::Void
    }
}

impl ToValue for bool {
    fn to_value(self, _vm: &mut Vm) -> Value {
        Value::Bool(self)
    }
}

impl ToValue for i64 {
    fn to_value(self, _vm: &mut Vm) -> Value {
        Value::Int(self)
    }
}

impl ToValue for f64 {
    fn to_value(self, _vm: &mut Vm) -> Value {
        Value::Float(self)
    }
}

impl ToValue for Number {
    fn to_value(self, _vm: &mut Vm) -> Value {
        match self {
            Self::Int(i) => Value::Int(i),
            Self::Float(f) => Value::Float(f),
        }
    }
}

impl ToValue for &[u8] {
    fn to_value(self, vm: &mut Vm) -> Value {
        Value::String(vm.manager_mut().put_string(crate::object_manager::StringObj(self.to_vec())))
    }
}

impl ToValue for Vec<u8> {
    fn to_value(self, vm: &mut Vm) -> Value {
        Value::String(vm.manager_mut().put_string(crate::object_manager::StringObj(self)))
    }
}

impl ToValue for &str {
    fn to_value(self, vm: &mut Vm) -> Value {
        self.as_bytes().to_value(vm)
    }
}

impl ToValue for &[Value] {
    fn to_value(self, vm: &mut Vm) -> Value {
        Value::List(vm.manager_mut().put_list(crate::object_manager::ListObj(self.to_vec())))
    }
}

impl ToValue for Vec<Value> {
    fn to_value(self, vm: &mut Vm) -> Value {
        Value::List(vm.manager_mut().put_list(crate::object_manager::ListObj(self)))
    }
}

/// Interns `name` and produces a bareword (zero-quote) symbol.
pub struct HostSymbolInput<'a> {
    pub quotes: u8,
    pub name: &'a [u8],
}

impl ToValue for HostSymbolInput<'_> {
    fn to_value(self, vm: &mut Vm) -> Value {
        let id = vm.interner_mut().intern(self.name);
        Value::Symbol(Symbol::new(self.quotes, id))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self, vm: &mut Vm) -> Value {
        match self {
            Some(t) => t.to_value(vm),
            None => Value::Void,
        }
    }
}
