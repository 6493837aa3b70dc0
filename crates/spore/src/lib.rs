//! An embeddable interpreter for a small parenthesized expression language.
//!
//! A host program creates a [`Vm`], registers values and host functions
//! under names, and evaluates source text; the `Vm` parses it, macro-expands
//! it, compiles it to bytecode, and runs that bytecode over a stack,
//! returning a value the host can read back into host types via
//! [`convert::FromValue`]/[`convert::ToValue`].
//!
//! Pipeline, leaves first: [`intern`] (string interning) feeds [`value`]
//! (the tagged `Value` union and `Symbol`/`Key`), backed by
//! [`object_manager`] (the arena-with-handles heap and its mark-and-sweep
//! collector). [`reader`] turns source text into `Value` trees; [`expander`]
//! rewrites macro calls to a fixed point; [`compiler`] lowers the expanded
//! tree to a flat [`value::Instruction`] stream over [`stack`]; [`interpreter`]
//! executes that stream. [`module`] holds the name-to-value bindings every
//! compiled `Deref` resolves against. [`vm`] owns all of the above.

pub mod builtins;
pub mod compiler;
pub mod convert;
pub mod ctx;
pub mod error;
pub mod expander;
pub mod intern;
pub mod interpreter;
pub mod module;
pub mod object_manager;
pub mod print_sink;
pub mod printer;
pub mod reader;
pub mod stack;
pub mod value;
pub mod vm;

pub use crate::{
    convert::{FromValue, HostKey, HostSymbol, Number, ToValue},
    ctx::{NativeCtx, NativeFn},
    error::{Error, ErrorKind},
    object_manager::{BytecodeFunctionObj, Handle, ObjectManagerStats},
    value::{Instruction, Symbol, Value},
    vm::{Vm, VmOptions},
};
