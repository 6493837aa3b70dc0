//! `%define` and `do`: the two primitives the compiler's special forms and
//! the macro expansion of `def`/`defun` lower onto.
//!
//! `%define` is reachable both as the compiler's `%define` special form
//! and as an ordinary global binding any expression can call directly;
//! both paths go through this one native function. `do`
//! needs no special compiler support at all — by the time it's called, the
//! compiler's default "any other non-empty list" rule has already evaluated
//! every body expression left-to-right as `do`'s arguments, so `do` itself
//! only has to return the last one.

use crate::{
    ctx::{NativeCtx, NativeFn},
    error::Error,
    value::Value,
};

use super::args::{as_symbol, exactly};

fn define(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    let [name, value] = exactly(args)?;
    let sym = as_symbol(name)?;
    ctx.module.define(sym.id(), value);
    Ok(value)
}

fn do_(_ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    Ok(args.last().copied().unwrap_or(Value::Void))
}

pub static DEFINE: NativeFn = NativeFn { name: "%define", is_macro: false, call: define };
pub static DO: NativeFn = NativeFn { name: "do", is_macro: false, call: do_ };

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{intern::Interner, module::Module, object_manager::ObjectManager, print_sink::CollectSink, value::Symbol};

    fn ctx_call(f: fn(&mut NativeCtx<'_>, &[Value]) -> Result<Value, Error>, args: &[Value], module: &mut Module, interner: &mut Interner) -> Result<Value, Error> {
        let mut manager = ObjectManager::new();
        let mut sink = CollectSink::new();
        let mut ctx = NativeCtx { manager: &mut manager, interner, module, print_sink: &mut sink };
        f(&mut ctx, args)
    }

    #[test]
    fn define_binds_name_in_module() {
        let mut interner = Interner::new();
        let mut module = Module::new();
        let name_id = interner.intern(b"x");
        let name = Value::Symbol(Symbol::bareword(name_id));
        ctx_call(define, &[name, Value::Int(12)], &mut module, &mut interner).unwrap();
        assert_eq!(module.get(name_id), Some(Value::Int(12)));
    }

    #[test]
    fn do_returns_its_last_argument() {
        let mut interner = Interner::new();
        let mut module = Module::new();
        assert_eq!(ctx_call(do_, &[Value::Int(1), Value::Int(2), Value::Int(3)], &mut module, &mut interner).unwrap(), Value::Int(3));
    }

    #[test]
    fn do_with_no_arguments_is_void() {
        let mut interner = Interner::new();
        let mut module = Module::new();
        assert_eq!(ctx_call(do_, &[], &mut module, &mut interner).unwrap(), Value::Void);
    }
}
