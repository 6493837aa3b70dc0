//! The native function ABI: the function-record type stored in
//! `Value::NativeFunction`, and the context a native implementation runs
//! with.
//!
//! Each builtin file registers one `{name, function_ptr, is_macro}`
//! descriptor.

use crate::{error::Error, intern::Interner, module::Module, object_manager::ObjectManager, print_sink::PrintSink, value::Value};

/// A host- or built-in-implemented function record, borrowed for the VM's
/// life under a `'static` lifetime contract.
pub struct NativeFn {
    pub name: &'static str,
    pub is_macro: bool,
    pub call: fn(&mut NativeCtx<'_>, &[Value]) -> Result<Value, Error>,
}

impl std::fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFn").field("name", &self.name).field("is_macro", &self.is_macro).finish()
    }
}

/// Everything a native function's implementation can touch: the heap, the
/// interner, the global module, the print destination, and a way to call
/// back into the VM for a value that might itself be a function (used by
/// `apply` and by the macro expander invoking a macro's implementation).
///
/// This re-entry is synchronous nesting, not suspension: `call_value` drives
/// a fresh sub-computation on the same stack and returns before the caller's
/// native implementation continues.
pub struct NativeCtx<'a> {
    pub manager: &'a mut ObjectManager,
    pub interner: &'a mut Interner,
    pub module: &'a mut Module,
    pub print_sink: &'a mut dyn PrintSink,
}

impl NativeCtx<'_> {
    /// Calls `callee` with `args`, uniformly across native and bytecode
    /// callees.
    pub fn call_value(&mut self, callee: Value, args: &[Value]) -> Result<Value, Error> {
        crate::interpreter::call_value(self.manager, self.interner, self.module, self.print_sink, callee, args)
    }
}
