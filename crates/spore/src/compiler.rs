//! Lowers one macro-expanded expression into a flat instruction sequence.
//!
//! Forward jumps (`if`'s `JumpIf`/`Jump`) are emitted as placeholders and
//! back-patched once the jump target is known, rather than computed in a
//! separate pass. Instructions are a tagged-union stream with no byte
//! format, so the compiler appends directly to a `Vec<Instruction>`.

use smallvec::SmallVec;

use crate::{
    error::{Error, ErrorKind, err},
    intern::{Interner, StringId},
    object_manager::{BytecodeFunctionObj, ObjectManager},
    value::{Instruction, Value},
};

/// Parameter/local lists are almost always short; inlining the first few
/// avoids a heap allocation for the common case of a 0-3 argument function.
type Locals = SmallVec<[StringId; 4]>;

/// Compiles one top-level, already macro-expanded expression.
pub fn compile_toplevel(expr: Value, interner: &mut Interner, manager: &mut ObjectManager) -> Result<Vec<Instruction>, Error> {
    let mut out = Vec::new();
    compile_expr(expr, interner, manager, &[], None, &mut out)?;
    Ok(out)
}

fn compile_expr(
    value: Value,
    interner: &mut Interner,
    manager: &mut ObjectManager,
    locals: &[StringId],
    define_context: Option<StringId>,
    out: &mut Vec<Instruction>,
) -> Result<(), Error> {
    match value {
        Value::List(handle) => {
            let items = manager
                .get_list(handle)
                .map(|l| l.0.clone())
                .ok_or_else(|| err!(ObjectNotFound))?;
            compile_list(&items, interner, manager, locals, define_context, out)
        }
        Value::Symbol(sym) if sym.quotes() > 0 => {
            out.push(Instruction::Push(Value::Symbol(sym.unquote_one())));
            Ok(())
        }
        Value::Symbol(sym) => {
            if let Some(index) = locals.iter().rposition(|&l| l == sym.id()) {
                out.push(Instruction::GetLocal(u32::try_from(index).expect("locals fit u32")));
            } else {
                out.push(Instruction::Deref(sym.id()));
            }
            Ok(())
        }
        other => {
            out.push(Instruction::Push(other));
            Ok(())
        }
    }
}

fn head_name<'a>(items: &[Value], interner: &'a Interner) -> Option<&'a str> {
    match items.first() {
        Some(Value::Symbol(sym)) if sym.quotes() == 0 => Some(interner.resolve_str(sym.id())),
        _ => None,
    }
}

fn compile_list(
    items: &[Value],
    interner: &mut Interner,
    manager: &mut ObjectManager,
    locals: &[StringId],
    define_context: Option<StringId>,
    out: &mut Vec<Instruction>,
) -> Result<(), Error> {
    if items.is_empty() {
        return Err(err!(UnexpectedEmptyExpression));
    }
    match head_name(items, interner) {
        Some("function") => compile_function(items, interner, manager, define_context, out),
        Some("%define") => compile_define(items, interner, manager, locals, define_context, out),
        Some("if") => compile_if(items, interner, manager, locals, define_context, out),
        Some("return") => compile_return(items, interner, manager, locals, define_context, out),
        _ => compile_application(items, interner, manager, locals, define_context, out),
    }
}

fn compile_application(
    items: &[Value],
    interner: &mut Interner,
    manager: &mut ObjectManager,
    locals: &[StringId],
    define_context: Option<StringId>,
    out: &mut Vec<Instruction>,
) -> Result<(), Error> {
    for &item in items {
        compile_expr(item, interner, manager, locals, define_context, out)?;
    }
    out.push(Instruction::Eval(u32::try_from(items.len()).expect("arity fits u32")));
    Ok(())
}

/// `(function (params...) body...)`.
fn compile_function(
    items: &[Value],
    interner: &mut Interner,
    manager: &mut ObjectManager,
    define_context: Option<StringId>,
    out: &mut Vec<Instruction>,
) -> Result<(), Error> {
    let params_value = items.get(1).copied().ok_or_else(|| err!(BadFunction))?;
    let Value::List(params_handle) = params_value else {
        return Err(err!(BadFunction));
    };
    let param_values = manager
        .get_list(params_handle)
        .map(|l| l.0.clone())
        .ok_or_else(|| err!(ObjectNotFound))?;
    let mut params: Locals = SmallVec::with_capacity(param_values.len());
    for p in param_values {
        match p {
            Value::Symbol(sym) if sym.quotes() == 0 => params.push(sym.id()),
            _ => return Err(err!(BadFunction)),
        }
    }

    let mut body = Vec::new();
    for &expr in &items[2..] {
        compile_expr(expr, interner, manager, &params, define_context, &mut body)?;
    }

    let name = define_context.map_or_else(Vec::new, |id| interner.resolve(id).unwrap_or(b"").to_vec());
    let arg_count = u32::try_from(params.len()).expect("arity fits u32");
    let handle = manager.put_function(BytecodeFunctionObj { name, instructions: body, arg_count });
    out.push(Instruction::Push(Value::BytecodeFunction(handle)));
    Ok(())
}

/// `(%define name-sym expr)`.
fn compile_define(
    items: &[Value],
    interner: &mut Interner,
    manager: &mut ObjectManager,
    locals: &[StringId],
    define_context: Option<StringId>,
    out: &mut Vec<Instruction>,
) -> Result<(), Error> {
    if items.len() != 3 {
        return Err(err!(BadDefine));
    }
    let Value::Symbol(name_sym) = items[1] else {
        return Err(err!(BadDefine));
    };
    if name_sym.quotes() > 1 {
        return Err(err!(BadDefine));
    }

    let define_id = interner.intern(b"%define");
    out.push(Instruction::Deref(define_id));
    let literal = crate::value::Symbol::new(0, name_sym.id());
    out.push(Instruction::Push(Value::Symbol(literal)));
    compile_expr(items[2], interner, manager, locals, Some(name_sym.id()), out)?;
    out.push(Instruction::Eval(3));
    Ok(())
}

/// `(if pred then else?)`.
fn compile_if(
    items: &[Value],
    interner: &mut Interner,
    manager: &mut ObjectManager,
    locals: &[StringId],
    define_context: Option<StringId>,
    out: &mut Vec<Instruction>,
) -> Result<(), Error> {
    if items.len() < 3 || items.len() > 4 {
        return Err(err!(BadIf));
    }
    let pred = items[1];
    let then_expr = items[2];
    let else_expr = items.get(3).copied().unwrap_or(Value::Void);

    compile_expr(pred, interner, manager, locals, define_context, out)?;

    let jump_if_idx = out.len();
    out.push(Instruction::JumpIf(0)); // patched below

    compile_expr(else_expr, interner, manager, locals, define_context, out)?;

    let jump_idx = out.len();
    out.push(Instruction::Jump(0)); // patched below

    let then_start = out.len();
    compile_expr(then_expr, interner, manager, locals, define_context, out)?;
    let then_end = out.len();

    let jump_if_delta = i32::try_from(jump_idx - jump_if_idx).expect("delta fits i32");
    out[jump_if_idx] = Instruction::JumpIf(jump_if_delta);

    let jump_delta = i32::try_from(then_end - then_start).expect("delta fits i32");
    out[jump_idx] = Instruction::Jump(jump_delta);
    Ok(())
}

/// `(return [expr])`.
fn compile_return(
    items: &[Value],
    interner: &mut Interner,
    manager: &mut ObjectManager,
    locals: &[StringId],
    define_context: Option<StringId>,
    out: &mut Vec<Instruction>,
) -> Result<(), Error> {
    if items.len() > 2 {
        return Err(err!(BadArg));
    }
    let expr = items.get(1).copied().unwrap_or(Value::Void);
    compile_expr(expr, interner, manager, locals, define_context, out)?;
    out.push(Instruction::Ret);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_all;

    fn compile_src(src: &str) -> (Vec<Instruction>, Interner, ObjectManager) {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(src.as_bytes(), &mut interner, &mut manager).unwrap();
        let instrs = compile_toplevel(forms[0], &mut interner, &mut manager).unwrap();
        (instrs, interner, manager)
    }

    #[test]
    fn literal_compiles_to_single_push() {
        let (instrs, ..) = compile_src("12");
        assert!(matches!(instrs.as_slice(), [Instruction::Push(Value::Int(12))]));
    }

    #[test]
    fn global_symbol_compiles_to_deref() {
        let (instrs, ..) = compile_src("x");
        assert!(matches!(instrs.as_slice(), [Instruction::Deref(_)]));
    }

    #[test]
    fn quoted_symbol_compiles_to_push_with_one_fewer_quote() {
        let (instrs, _interner, _manager) = compile_src("'x");
        let Instruction::Push(Value::Symbol(sym)) = instrs[0] else {
            panic!("expected push symbol")
        };
        assert_eq!(sym.quotes(), 0);
    }

    #[test]
    fn application_emits_eval_with_total_arity() {
        let (instrs, ..) = compile_src("(+ 1 2)");
        assert!(matches!(instrs.last(), Some(Instruction::Eval(3))));
    }

    #[test]
    fn empty_list_is_error() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(b"()", &mut interner, &mut manager).unwrap();
        let err = compile_toplevel(forms[0], &mut interner, &mut manager).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEmptyExpression);
    }

    #[test]
    fn bad_function_params_not_a_list() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(b"(function x 1)", &mut interner, &mut manager).unwrap();
        let err = compile_toplevel(forms[0], &mut interner, &mut manager).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadFunction);
    }

    #[test]
    fn function_param_becomes_local() {
        let (instrs, ..) = compile_src("(function (n) n)");
        // Push bytecode-function is the only top-level instruction.
        assert_eq!(instrs.len(), 1);
    }

    #[test]
    fn if_patches_jumps_to_skip_else_and_then_correctly() {
        let (instrs, ..) = compile_src("(if true 1 2)");
        // pred, jump_if, else, jump, then
        assert_eq!(instrs.len(), 5);
        assert!(matches!(instrs[1], Instruction::JumpIf(2)));
        assert!(matches!(instrs[3], Instruction::Jump(1)));
    }

    #[test]
    fn if_without_else_uses_void() {
        let (instrs, ..) = compile_src("(if false 1)");
        assert!(matches!(instrs[2], Instruction::Push(Value::Void)));
    }

    #[test]
    fn bad_if_arity() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(b"(if true)", &mut interner, &mut manager).unwrap();
        let err = compile_toplevel(forms[0], &mut interner, &mut manager).unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadIf);
    }

    #[test]
    fn return_with_no_expr_pushes_void() {
        let (instrs, ..) = compile_src("(return)");
        assert!(matches!(instrs[0], Instruction::Push(Value::Void)));
        assert!(matches!(instrs[1], Instruction::Ret));
    }
}
