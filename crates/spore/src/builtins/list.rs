//! `list`: builds a `List` value from its evaluated arguments.

use crate::{
    ctx::{NativeCtx, NativeFn},
    error::Error,
    object_manager::ListObj,
    value::Value,
};

fn list(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    let handle = ctx.manager.put_list(ListObj(args.to_vec()));
    Ok(Value::List(handle))
}

pub static LIST: NativeFn = NativeFn { name: "list", is_macro: false, call: list };

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{intern::Interner, module::Module, object_manager::ObjectManager, print_sink::CollectSink};

    #[test]
    fn list_collects_its_arguments_in_order() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let mut module = Module::new();
        let mut sink = CollectSink::new();
        let mut ctx = NativeCtx { manager: &mut manager, interner: &mut interner, module: &mut module, print_sink: &mut sink };
        let result = list(&mut ctx, &[Value::Int(1), Value::Int(2)]).unwrap();
        let Value::List(h) = result else { panic!("expected list") };
        assert_eq!(manager.get_list(h).unwrap().0, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn empty_list_call_produces_empty_list() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let mut module = Module::new();
        let mut sink = CollectSink::new();
        let mut ctx = NativeCtx { manager: &mut manager, interner: &mut interner, module: &mut module, print_sink: &mut sink };
        let result = list(&mut ctx, &[]).unwrap();
        let Value::List(h) = result else { panic!("expected list") };
        assert!(manager.get_list(h).unwrap().0.is_empty());
    }
}
