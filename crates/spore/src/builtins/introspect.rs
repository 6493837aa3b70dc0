//! `function-bytecode`: disassembles a compiled function's instructions
//! into ordinary `Value`s so host/test code can inspect what the compiler
//! produced without a separate debugging API.
//!
//! Each instruction becomes a list `[opcode-symbol, operand?]`.

use crate::{
    ctx::{NativeCtx, NativeFn},
    error::{Error, err},
    object_manager::ListObj,
    value::{Instruction, Symbol, Value},
};

use super::args::exactly;

fn opcode_symbol(ctx: &mut NativeCtx<'_>, name: &'static str) -> Value {
    let id = ctx.interner.intern(name.as_bytes());
    Value::Symbol(Symbol::bareword(id))
}

fn disassemble_one(ctx: &mut NativeCtx<'_>, instr: Instruction) -> Value {
    let (opcode, operand) = match instr {
        Instruction::Push(v) => ("push", Some(v)),
        Instruction::Eval(n) => ("eval", Some(Value::Int(i64::from(n)))),
        Instruction::GetLocal(i) => ("get-local", Some(Value::Int(i64::from(i)))),
        Instruction::Deref(id) => ("deref", Some(Value::Symbol(Symbol::bareword(id)))),
        Instruction::JumpIf(delta) => ("jump-if", Some(Value::Int(i64::from(delta)))),
        Instruction::Jump(delta) => ("jump", Some(Value::Int(i64::from(delta)))),
        Instruction::Ret => ("ret", None),
    };
    let op = opcode_symbol(ctx, opcode);
    let mut items = vec![op];
    items.extend(operand);
    Value::List(ctx.manager.put_list(ListObj(items)))
}

fn function_bytecode(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    let [f] = exactly(args)?;
    let Value::BytecodeFunction(handle) = f else {
        return Err(err!(WrongType, format!("expected a bytecode function, got {}", f.type_name())));
    };
    let instructions = ctx.manager.get_function(handle).ok_or_else(|| err!(ObjectNotFound))?.instructions.clone();
    let rows: Vec<Value> = instructions.into_iter().map(|instr| disassemble_one(ctx, instr)).collect();
    Ok(Value::List(ctx.manager.put_list(ListObj(rows))))
}

pub static FUNCTION_BYTECODE: NativeFn = NativeFn { name: "function-bytecode", is_macro: false, call: function_bytecode };
