//! `print`: writes a value's canonical text form through the VM's
//! [`crate::print_sink::PrintSink`].

use crate::{
    ctx::{NativeCtx, NativeFn},
    error::Error,
    printer,
    value::Value,
};

fn print(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    for &arg in args {
        let text = printer::to_string(arg, ctx.interner, ctx.manager);
        ctx.print_sink.print(&text);
    }
    Ok(Value::Void)
}

pub static PRINT: NativeFn = NativeFn { name: "print", is_macro: false, call: print };
