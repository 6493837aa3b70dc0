//! `str-len`, `str->sexps`, `str->sexp`: the minimal string/reader surface
//! among the required global bindings.

use crate::{
    ctx::{NativeCtx, NativeFn},
    error::{Error, err},
    object_manager::ListObj,
    reader,
    value::Value,
};

use super::args::{as_string_handle, exactly};

fn str_len(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    let [s] = exactly(args)?;
    let handle = as_string_handle(s)?;
    let bytes = &ctx.manager.get_string(handle).ok_or_else(|| err!(ObjectNotFound))?.0;
    Ok(Value::Int(i64::try_from(bytes.len()).expect("string length fits i64")))
}

/// Reads every top-level form in a string, returning them as a `List`.
fn str_to_sexps(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    let [s] = exactly(args)?;
    let handle = as_string_handle(s)?;
    let bytes = ctx.manager.get_string(handle).ok_or_else(|| err!(ObjectNotFound))?.0.clone();
    let forms = reader::read_all(&bytes, ctx.interner, ctx.manager)?;
    Ok(Value::List(ctx.manager.put_list(ListObj(forms))))
}

/// Reads a string's first top-level form. Errs `bad-arg` if the string
/// contains no form at all.
fn str_to_sexp(ctx: &mut NativeCtx<'_>, args: &[Value]) -> Result<Value, Error> {
    let [s] = exactly(args)?;
    let handle = as_string_handle(s)?;
    let bytes = ctx.manager.get_string(handle).ok_or_else(|| err!(ObjectNotFound))?.0.clone();
    let mut forms = reader::read_all(&bytes, ctx.interner, ctx.manager)?;
    if forms.is_empty() {
        return Err(err!(BadArg, "str->sexp: no expression in string"));
    }
    Ok(forms.remove(0))
}

pub static STR_LEN: NativeFn = NativeFn { name: "str-len", is_macro: false, call: str_len };
pub static STR_TO_SEXPS: NativeFn = NativeFn { name: "str->sexps", is_macro: false, call: str_to_sexps };
pub static STR_TO_SEXP: NativeFn = NativeFn { name: "str->sexp", is_macro: false, call: str_to_sexp };

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{intern::Interner, module::Module, object_manager::{ObjectManager, StringObj}, print_sink::CollectSink};

    fn with_ctx<R>(f: impl FnOnce(&mut NativeCtx<'_>) -> R) -> R {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let mut module = Module::new();
        let mut sink = CollectSink::new();
        let mut ctx = NativeCtx { manager: &mut manager, interner: &mut interner, module: &mut module, print_sink: &mut sink };
        f(&mut ctx)
    }

    #[test]
    fn str_len_counts_bytes() {
        with_ctx(|ctx| {
            let h = ctx.manager.put_string(StringObj(b"hello".to_vec()));
            assert_eq!(str_len(ctx, &[Value::String(h)]).unwrap(), Value::Int(5));
        });
    }

    #[test]
    fn str_to_sexp_reads_first_form() {
        with_ctx(|ctx| {
            let h = ctx.manager.put_string(StringObj(b"(+ 1 (foo 2 3 :key ''quoted))".to_vec()));
            let result = str_to_sexp(ctx, &[Value::String(h)]).unwrap();
            let text = crate::printer::to_string(result, ctx.interner, ctx.manager);
            assert_eq!(text, "(+ 1 (foo 2 3 :key ''quoted))");
        });
    }

    #[test]
    fn str_to_sexps_reads_every_top_level_form() {
        with_ctx(|ctx| {
            let h = ctx.manager.put_string(StringObj(b"1 2 3".to_vec()));
            let result = str_to_sexps(ctx, &[Value::String(h)]).unwrap();
            let Value::List(list_h) = result else { panic!("expected list") };
            assert_eq!(ctx.manager.get_list(list_h).unwrap().0, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        });
    }

    #[test]
    fn str_to_sexp_on_empty_string_is_bad_arg() {
        with_ctx(|ctx| {
            let h = ctx.manager.put_string(StringObj(b"".to_vec()));
            let err = str_to_sexp(ctx, &[Value::String(h)]).unwrap_err();
            assert_eq!(err.kind, crate::error::ErrorKind::BadArg);
        });
    }
}
