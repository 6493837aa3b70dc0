//! The stack-based dispatch loop and the calling-convention entry points
//! shared by bytecode-to-bytecode calls, top-level evaluation, and
//! native-function re-entry (`ctx::NativeCtx::call_value`).
//!
//! Fetch-decode-execute over a flat instruction vector, with call frames
//! delimiting each function's locals on a shared value stack. Native calls
//! and bytecode calls share the single `Eval` dispatch below rather than
//! taking separate paths.

use std::rc::Rc;

use crate::{
    ctx::NativeCtx,
    error::{Error, err},
    intern::Interner,
    module::Module,
    object_manager::ObjectManager,
    print_sink::PrintSink,
    stack::{Frame, Stack},
    value::{Instruction, Value},
};

/// Stack capacity used by re-entrant calls made from inside a native function
/// (`apply`, a macro's implementation). These calls don't have access to the
/// caller's own `Stack` — `NativeCtx` deliberately doesn't carry one, so a
/// native function can't peek at or corrupt the calling frame's locals — so
/// each one runs on a short-lived stack of its own.
const REENTRANT_STACK_CAPACITY: usize = 8192;

/// Runs one already-compiled top-level form to completion on `stack`,
/// returning its result value.
pub fn run(
    stack: &mut Stack,
    manager: &mut ObjectManager,
    interner: &mut Interner,
    module: &mut Module,
    print_sink: &mut dyn PrintSink,
    instructions: &[Instruction],
) -> Result<Value, Error> {
    stack.reset();
    stack.push_frame(Frame {
        instructions: Rc::from(instructions.to_vec()),
        stack_start: 0,
        next_instruction: 0,
    });
    run_loop(stack, manager, interner, module, print_sink)
}

/// Calls `callee` with `args` uniformly, whether it's a native or bytecode
/// function. Used by `apply` and by macro expansion invoking a macro's
/// native implementation.
pub fn call_value(
    manager: &mut ObjectManager,
    interner: &mut Interner,
    module: &mut Module,
    print_sink: &mut dyn PrintSink,
    callee: Value,
    args: &[Value],
) -> Result<Value, Error> {
    match callee {
        Value::NativeFunction(nf) => {
            let mut ctx = NativeCtx { manager, interner, module, print_sink };
            (nf.call)(&mut ctx, args)
        }
        Value::BytecodeFunction(handle) => {
            let func = manager.get_function(handle).ok_or_else(|| err!(ObjectNotFound))?;
            if func.arg_count as usize != args.len() {
                return Err(err!(WrongArity, format!("expected {} argument(s), got {}", func.arg_count, args.len())));
            }
            let instructions: Rc<[Instruction]> = Rc::from(func.instructions.clone());
            let mut stack = Stack::new(REENTRANT_STACK_CAPACITY);
            stack.push_many(args)?;
            stack.push_frame(Frame { instructions, stack_start: 0, next_instruction: 0 });
            run_loop(&mut stack, manager, interner, module, print_sink)
        }
        other => Err(err!(ExpectedFunction, other.type_name())),
    }
}

/// Drives `stack` until every frame pushed onto it (by `run` or `call_value`)
/// has completed, returning the last frame's result.
fn run_loop(
    stack: &mut Stack,
    manager: &mut ObjectManager,
    interner: &mut Interner,
    module: &mut Module,
    print_sink: &mut dyn PrintSink,
) -> Result<Value, Error> {
    let mut last_result = Value::Void;

    while let Some(frame) = stack.current_frame().cloned() {
        if frame.next_instruction as usize >= frame.instructions.len() {
            last_result = finish_frame(stack)?;
            continue;
        }

        let instr = frame.instructions[frame.next_instruction as usize];
        stack.current_frame_mut().expect("frame present, checked above").next_instruction += 1;

        match instr {
            Instruction::Push(v) => stack.push(v)?,
            Instruction::GetLocal(index) => {
                let v = *stack.local().get(index as usize).ok_or_else(|| err!(StackFrameUnderflow))?;
                stack.push(v)?;
            }
            Instruction::Deref(id) => {
                let v = module.get(id).ok_or_else(|| err!(SymbolNotFound, interner.resolve_str(id).to_string()))?;
                stack.push(v)?;
            }
            Instruction::JumpIf(delta) => {
                let cond = stack.pop()?;
                if cond.is_truthy() {
                    apply_jump(stack, delta);
                }
            }
            Instruction::Jump(delta) => apply_jump(stack, delta),
            Instruction::Ret => last_result = finish_frame(stack)?,
            Instruction::Eval(n) => dispatch_eval(stack, manager, interner, module, print_sink, n)?,
        }
    }

    Ok(last_result)
}

/// Pops the current frame. If a caller frame remains beneath it, the popped
/// value is pushed back onto the (now-current) caller's stack so its
/// in-flight `Eval`'s net "replace n slots with 1 result" arithmetic holds;
/// otherwise it's the final value of the whole run.
fn finish_frame(stack: &mut Stack) -> Result<Value, Error> {
    let result = stack.pop_frame()?;
    if stack.frame_count() > 0 {
        stack.push(result)?;
    }
    Ok(result)
}

fn apply_jump(stack: &mut Stack, delta: i32) {
    let frame = stack.current_frame_mut().expect("jump only reached inside a running frame");
    let target = i64::from(frame.next_instruction) + i64::from(delta);
    frame.next_instruction = u32::try_from(target).unwrap_or(frame.next_instruction);
}

/// `Eval(n)`: the top `n` stack slots are `[callee, arg_0, .., arg_{n-2}]`;
/// dispatches on `callee`'s kind and replaces those `n` slots with the single
/// result value.
fn dispatch_eval(
    stack: &mut Stack,
    manager: &mut ObjectManager,
    interner: &mut Interner,
    module: &mut Module,
    print_sink: &mut dyn PrintSink,
    n: u32,
) -> Result<(), Error> {
    let n = n as usize;
    let base = stack.len().checked_sub(n).ok_or_else(|| err!(StackFrameUnderflow))?;
    let callee = stack.get(base)?;
    let args: Vec<Value> = (base + 1..stack.len()).map(|i| stack.get(i)).collect::<Result<_, _>>()?;

    match callee {
        Value::NativeFunction(nf) => {
            let mut ctx = NativeCtx { manager, interner, module, print_sink };
            let result = (nf.call)(&mut ctx, &args)?;
            stack.truncate(base);
            stack.push(result)
        }
        Value::BytecodeFunction(handle) => {
            let func = manager.get_function(handle).ok_or_else(|| err!(ObjectNotFound))?;
            if func.arg_count as usize != args.len() {
                return Err(err!(WrongArity, format!("expected {} argument(s), got {}", func.arg_count, args.len())));
            }
            let instructions: Rc<[Instruction]> = Rc::from(func.instructions.clone());
            stack.truncate(base);
            stack.push_many(&args)?;
            stack.push_frame(Frame {
                instructions,
                stack_start: u32::try_from(base).expect("stack depth fits u32"),
                next_instruction: 0,
            });
            Ok(())
        }
        other => Err(err!(ExpectedFunction, other.type_name())),
    }
}
