//! `Vm`: owns every other component and exposes the host-facing entry
//! points.
//!
//! One top-level owner holding the heap, interner, namespace, and options,
//! with `evaluate`/`run_gc` as its two drive methods, threading a
//! `PrintSink` for host-directed output.

use crate::{
    compiler::compile_toplevel,
    convert::{FromValue, ToValue},
    ctx::NativeFn,
    error::{Error, ErrorKind},
    expander::expand,
    intern::{Interner, StringId},
    interpreter,
    module::Module,
    object_manager::ObjectManager,
    print_sink::{PrintSink, StdoutSink},
    reader,
    stack::Stack,
    value::Value,
};

/// Host-supplied construction options.
#[derive(Debug, Clone, Copy)]
pub struct VmOptions {
    /// Capacity of the value stack (default: 4096).
    pub stack_capacity: usize,
    /// Gates the `eprintln!` diagnostic lines for `wrong-type` and
    /// `symbol-not-found`.
    pub log: bool,
}

impl Default for VmOptions {
    fn default() -> Self {
        Self { stack_capacity: 4096, log: true }
    }
}

/// Owns the allocator-backed heap, interner, global module, value stack,
/// print destination, and construction options for one interpreter
/// instance. Never safe to share across threads.
pub struct Vm {
    manager: ObjectManager,
    interner: Interner,
    module: Module,
    stack: Stack,
    print_sink: Box<dyn PrintSink>,
    options: VmOptions,
}

impl Vm {
    /// Allocates the stack, interner, and empty global module, then
    /// registers every built-in.
    #[must_use]
    pub fn new(options: VmOptions) -> Self {
        let mut interner = Interner::new();
        let mut module = Module::new();
        crate::builtins::register_all(&mut module, &mut interner);
        Self {
            manager: ObjectManager::new(),
            interner,
            module,
            stack: Stack::new(options.stack_capacity),
            print_sink: Box::new(StdoutSink),
            options,
        }
    }

    /// Swaps in a different print destination, e.g. `CollectSink` for
    /// tests that want to assert on `print` output.
    pub fn set_print_sink(&mut self, sink: Box<dyn PrintSink>) {
        self.print_sink = sink;
    }

    /// Reads, macro-expands, compiles, and runs every top-level form in
    /// `source` in order, returning the last form's result. An error aborts
    /// the evaluation of the *remaining* forms but leaves the `Vm` itself
    /// usable for the next call.
    pub fn evaluate(&mut self, source: &[u8]) -> Result<Value, Error> {
        let forms = reader::read_all(source, &mut self.interner, &mut self.manager)?;
        let mut last = Value::Void;
        for form in forms {
            let expanded = expand(form, &mut self.manager, &mut self.interner, &mut self.module, self.print_sink.as_mut())?;
            let instructions = compile_toplevel(expanded, &mut self.interner, &mut self.manager)?;
            let result = interpreter::run(&mut self.stack, &mut self.manager, &mut self.interner, &mut self.module, self.print_sink.as_mut(), &instructions);
            match result {
                Ok(v) => last = v,
                Err(e) => {
                    self.log_error(&e);
                    return Err(e);
                }
            }
        }
        Ok(last)
    }

    fn log_error(&self, e: &Error) {
        if !self.options.log {
            return;
        }
        match e.kind {
            ErrorKind::WrongType => eprintln!("spore: wrong-type: {}", e.context.as_deref().unwrap_or("")),
            ErrorKind::SymbolNotFound => eprintln!("spore: symbol-not-found: {}", e.context.as_deref().unwrap_or("")),
            _ => {}
        }
    }

    /// Runs a full mark-and-sweep collection, rooting `extra_roots` in
    /// addition to the stack, suspended frames, and the module.
    pub fn run_gc(&mut self, extra_roots: &[Value]) {
        self.manager.run_gc(extra_roots, self.stack.values(), std::iter::empty::<&[crate::value::Instruction]>(), self.module.values());
    }

    /// Converts `v` to a host type `T`.
    pub fn to_host<'vm, T: FromValue<'vm>>(&'vm self, v: Value) -> Result<T, Error> {
        T::from_value(v, self)
    }

    /// Converts a host value `t` into a `Value`.
    pub fn from_host<T: ToValue>(&mut self, t: T) -> Result<Value, Error> {
        Ok(t.to_value(self))
    }

    /// Registers a host value under `name`; refuses a duplicate name.
    pub fn register_value(&mut self, name: &str, value: Value) -> Result<(), Error> {
        let id = self.interner.intern(name.as_bytes());
        self.module.register_value(id, value)
    }

    /// Registers a host-implemented function under `name`.
    pub fn register_function(&mut self, name: &str, function: &'static NativeFn) -> Result<(), Error> {
        let id = self.interner.intern(name.as_bytes());
        self.module.register_function(id, function)
    }

    #[must_use]
    pub fn manager(&self) -> &ObjectManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ObjectManager {
        &mut self.manager
    }

    #[must_use]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    #[must_use]
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Renders `v`'s canonical text form.
    #[must_use]
    pub fn print_value(&self, v: Value) -> String {
        crate::printer::to_string(v, &self.interner, &self.manager)
    }

    /// Interns `name` and looks up its current identifier, without
    /// requiring a round-trip through `evaluate`.
    pub fn intern(&mut self, name: &str) -> StringId {
        self.interner.intern(name.as_bytes())
    }
}
