//! Registers every built-in in the source language's global surface into a
//! fresh [`Module`].
//!
//! One `register_all(module: &mut Module, ...)` call per builtin function,
//! each builtin living in its own file under `builtins/`.

pub mod apply;
pub mod arithmetic;
pub(crate) mod args;
pub mod define;
pub mod introspect;
pub mod list;
pub mod macros;
pub mod io;
pub mod string;

use crate::{intern::Interner, module::Module};

/// Registers every required global binding into `module`.
pub fn register_all(module: &mut Module, interner: &mut Interner) {
    let mut reg = |name: &str, f: &'static crate::ctx::NativeFn| {
        let id = interner.intern(name.as_bytes());
        module
            .register_function(id, f)
            .unwrap_or_else(|e| panic!("builtin `{name}` failed to register: {e}"));
    };

    reg("%define", &define::DEFINE);
    reg("do", &define::DO);
    reg("list", &list::LIST);
    reg("+", &arithmetic::PLUS);
    reg("-", &arithmetic::MINUS);
    reg("<", &arithmetic::LESS_THAN);
    reg(">", &arithmetic::GREATER_THAN);
    reg("str-len", &string::STR_LEN);
    reg("str->sexps", &string::STR_TO_SEXPS);
    reg("str->sexp", &string::STR_TO_SEXP);
    reg("print", &io::PRINT);
    reg("apply", &apply::APPLY);
    reg("function-bytecode", &introspect::FUNCTION_BYTECODE);

    reg("def", &macros::DEF);
    reg("defun", &macros::DEFUN);
    reg("when", &macros::WHEN);
}
