//! `apply`: calls a function value with an explicit argument list.
//!
//! Re-enters the interpreter via [`crate::ctx::NativeCtx::call_value`]:
//! a native function calling back into the VM is synchronous nesting, not
//! suspension.

use crate::{
    ctx::{NativeCtx, NativeFn},
    error::{Error, err},
    value::Value,
};

use super::args::{as_list_handle, exactly};

fn apply(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    let [callee, arg_list] = exactly(args)?;
    if !matches!(callee, Value::NativeFunction(_) | Value::BytecodeFunction(_)) {
        return Err(err!(WrongType, format!("expected a function, got {}", callee.type_name())));
    }
    let handle = as_list_handle(arg_list)?;
    let call_args = ctx.manager.get_list(handle).ok_or_else(|| err!(ObjectNotFound))?.0.clone();
    ctx.call_value(callee, &call_args)
}

pub static APPLY: NativeFn = NativeFn { name: "apply", is_macro: false, call: apply };

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builtins::arithmetic::PLUS,
        intern::Interner,
        module::Module,
        object_manager::{ListObj, ObjectManager},
        print_sink::CollectSink,
    };

    #[test]
    fn apply_invokes_a_native_function_with_the_list_contents() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let mut module = Module::new();
        let mut sink = CollectSink::new();
        let list = manager.put_list(ListObj(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        let mut ctx = NativeCtx { manager: &mut manager, interner: &mut interner, module: &mut module, print_sink: &mut sink };
        let result = apply(&mut ctx, &[Value::NativeFunction(&PLUS), Value::List(list)]).unwrap();
        assert_eq!(result, Value::Int(6));
    }

    #[test]
    fn apply_on_a_non_function_callee_is_wrong_type() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let mut module = Module::new();
        let mut sink = CollectSink::new();
        let list = manager.put_list(ListObj(vec![]));
        let mut ctx = NativeCtx { manager: &mut manager, interner: &mut interner, module: &mut module, print_sink: &mut sink };
        let err = apply(&mut ctx, &[Value::Int(1), Value::List(list)]).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::WrongType);
    }
}
