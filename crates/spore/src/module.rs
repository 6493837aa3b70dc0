//! The global name→value binding table.
//!
//! One module — named `""`, the global module — exists per VM. A flat map,
//! since there is no module/import system to nest.

use ahash::AHashMap;

use crate::{
    error::{Error, ErrorKind},
    intern::StringId,
    value::Value,
};

/// A name→value mapping. The VM owns exactly one of these.
#[derive(Debug, Default)]
pub struct Module {
    bindings: AHashMap<StringId, Value>,
}

impl Module {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional upsert, used by `%define`'s implementation.
    ///
    /// `def`/`%define` behaves as a rebind-on-repeat-use update;
    /// `register_value`/`register_function` below retain the refusal
    /// behavior for host-side registration instead.
    pub fn define(&mut self, name: StringId, value: Value) {
        self.bindings.insert(name, value);
    }

    #[must_use]
    pub fn get(&self, name: StringId) -> Option<Value> {
        self.bindings.get(&name).copied()
    }

    /// Host-facing registration: refuses to shadow an existing binding.
    pub fn register_value(&mut self, name: StringId, value: Value) -> Result<(), Error> {
        if self.bindings.contains_key(&name) {
            return Err(Error::new(ErrorKind::ValueAlreadyDefined));
        }
        self.bindings.insert(name, value);
        Ok(())
    }

    /// Host-facing registration for a `NativeFunction` descriptor; shares
    /// `register_value`'s collision behavior.
    pub fn register_function(&mut self, name: StringId, function: &'static crate::ctx::NativeFn) -> Result<(), Error> {
        self.register_value(name, Value::NativeFunction(function))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.bindings.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::Interner;

    #[test]
    fn define_overwrites_existing_binding() {
        let mut interner = Interner::new();
        let mut module = Module::new();
        let name = interner.intern(b"x");
        module.define(name, Value::Int(1));
        module.define(name, Value::Int(2));
        assert_eq!(module.get(name), Some(Value::Int(2)));
    }

    #[test]
    fn register_value_refuses_duplicate() {
        let mut interner = Interner::new();
        let mut module = Module::new();
        let name = interner.intern(b"x");
        module.register_value(name, Value::Int(1)).unwrap();
        let err = module.register_value(name, Value::Int(2)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValueAlreadyDefined);
    }

    #[test]
    fn get_missing_is_none() {
        let interner = Interner::new();
        let module = Module::new();
        let name = StringId::from_raw(0);
        let _ = interner;
        assert_eq!(module.get(name), None);
    }
}
