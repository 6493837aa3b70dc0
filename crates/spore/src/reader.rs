//! Lexer and S-expression builder: turns source text into [`Value`] trees.
//!
//! Two stages: tokenize, then build an AST from the token stream. There's
//! no operator precedence or statement grammar here, only parens and atoms,
//! and parenthesis matching is lenient rather than strict.

use crate::{
    error::{Error, ErrorKind, err},
    intern::Interner,
    object_manager::{ListObj, ObjectManager, StringObj},
    value::{MAX_QUOTES, Symbol, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Open,
    Close,
    Atom,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

fn is_ascii_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Splits `src` into open-paren, close-paren, and atom tokens, skipping
/// whitespace. A token beginning with `"` is scanned as a string literal:
/// characters up to the next unescaped `"`, with `\x` sequences consuming
/// two bytes.
fn tokenize(src: &[u8]) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < src.len() {
        let b = src[i];
        if is_ascii_whitespace(b) {
            i += 1;
            continue;
        }
        if b == b'(' {
            tokens.push(Token { kind: TokenKind::Open, start: i, end: i + 1 });
            i += 1;
            continue;
        }
        if b == b')' {
            tokens.push(Token { kind: TokenKind::Close, start: i, end: i + 1 });
            i += 1;
            continue;
        }
        if b == b'"' {
            let start = i;
            i += 1;
            loop {
                if i >= src.len() {
                    return Err(err!(BadString, "unterminated string literal"));
                }
                match src[i] {
                    b'"' => {
                        i += 1;
                        break;
                    }
                    b'\\' => {
                        i += 2;
                    }
                    _ => i += 1,
                }
            }
            tokens.push(Token { kind: TokenKind::Atom, start, end: i });
            continue;
        }
        // A plain atom: any run of bytes that isn't whitespace, a paren, or
        // the start of a string literal.
        let start = i;
        while i < src.len() && !is_ascii_whitespace(src[i]) && src[i] != b'(' && src[i] != b')' && src[i] != b'"' {
            i += 1;
        }
        if start == i {
            return Err(err!(EmptyAtom));
        }
        tokens.push(Token { kind: TokenKind::Atom, start, end: i });
    }
    Ok(tokens)
}

/// Decodes a `"`-delimited string atom's escape sequences.
fn decode_string(raw: &[u8]) -> Result<Vec<u8>, Error> {
    if raw.len() < 2 || raw[0] != b'"' || raw[raw.len() - 1] != b'"' {
        return Err(err!(BadString, "string literal must be quote-delimited"));
    }
    let body = &raw[1..raw.len() - 1];
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        if body[i] == b'\\' {
            if i + 1 >= body.len() {
                return Err(err!(BadString, "dangling escape at end of string"));
            }
            let escaped = match body[i + 1] {
                b'n' => b'\n',
                b't' => b'\t',
                b'r' => b'\r',
                b'"' => b'"',
                b'\\' => b'\\',
                other => other,
            };
            out.push(escaped);
            i += 2;
        } else {
            out.push(body[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Parses `{quotes, name}` from a bareword atom.
fn parse_symbol_name(atom: &[u8], interner: &mut Interner) -> Result<Symbol, Error> {
    let quotes = atom.iter().take_while(|&&b| b == b'\'').count();
    if quotes > MAX_QUOTES as usize {
        return Err(err!(TooManyQuotes));
    }
    let name = &atom[quotes..];
    if name.is_empty() {
        return Err(err!(EmptySymbol));
    }
    let id = interner.intern(name);
    Ok(Symbol::new(quotes as u8, id))
}

fn classify_atom(atom: &[u8], interner: &mut Interner, manager: &mut ObjectManager) -> Result<Value, Error> {
    if atom == b"true" {
        return Ok(Value::Bool(true));
    }
    if atom == b"false" {
        return Ok(Value::Bool(false));
    }
    if atom.first() == Some(&b'"') {
        let bytes = decode_string(atom)?;
        let handle = manager.put_string(StringObj(bytes));
        return Ok(Value::String(handle));
    }
    if atom.first() == Some(&b':') {
        let name = &atom[1..];
        if name.is_empty() {
            return Err(err!(EmptyKey));
        }
        let id = interner.intern(name);
        return Ok(Value::Key(id));
    }
    if let Ok(text) = std::str::from_utf8(atom) {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Value::Int(i));
        }
        if let Ok(f) = text.parse::<f64>() {
            return Ok(Value::Float(f));
        }
    }
    Ok(Value::Symbol(parse_symbol_name(atom, interner)?))
}

struct Parser<'a> {
    src: &'a [u8],
    tokens: Vec<Token>,
    pos: usize,
    interner: &'a mut Interner,
    manager: &'a mut ObjectManager,
}

impl Parser<'_> {
    fn parse_value(&mut self) -> Result<Value, Error> {
        let token = self.tokens[self.pos];
        match token.kind {
            TokenKind::Open => {
                self.pos += 1;
                self.parse_list()
            }
            TokenKind::Close => Err(err!(UnexpectedCloseParen)),
            TokenKind::Atom => {
                self.pos += 1;
                classify_atom(&self.src[token.start..token.end], self.interner, self.manager)
            }
        }
    }

    /// Consumes tokens until a matching `)`, or until input runs out
    /// (lenient: end-of-input mid-list terminates the list without error).
    fn parse_list(&mut self) -> Result<Value, Error> {
        let mut items = Vec::new();
        loop {
            if self.pos >= self.tokens.len() {
                break;
            }
            if self.tokens[self.pos].kind == TokenKind::Close {
                self.pos += 1;
                break;
            }
            items.push(self.parse_value()?);
        }
        let handle = self.manager.put_list(ListObj(items));
        Ok(Value::List(handle))
    }
}

/// Reads every top-level form in `src`, in order.
pub fn read_all(src: &[u8], interner: &mut Interner, manager: &mut ObjectManager) -> Result<Vec<Value>, Error> {
    let tokens = tokenize(src)?;
    let mut parser = Parser { src, tokens, pos: 0, interner, manager };
    let mut forms = Vec::new();
    while parser.pos < parser.tokens.len() {
        if parser.tokens[parser.pos].kind == TokenKind::Close {
            return Err(err!(UnexpectedCloseParen));
        }
        forms.push(parser.parse_value()?);
    }
    Ok(forms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_one(src: &str) -> Value {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let mut forms = read_all(src.as_bytes(), &mut interner, &mut manager).unwrap();
        assert_eq!(forms.len(), 1);
        forms.pop().unwrap()
    }

    #[test]
    fn reads_integer() {
        assert_eq!(read_one("12"), Value::Int(12));
    }

    #[test]
    fn reads_negative_integer() {
        assert_eq!(read_one("-12"), Value::Int(-12));
    }

    #[test]
    fn reads_float() {
        assert_eq!(read_one("4.5"), Value::Float(4.5));
    }

    #[test]
    fn reads_bools() {
        assert_eq!(read_one("true"), Value::Bool(true));
        assert_eq!(read_one("false"), Value::Bool(false));
    }

    #[test]
    fn reads_string_with_escapes() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(br#""hello\nworld""#, &mut interner, &mut manager).unwrap();
        let Value::String(h) = forms[0] else { panic!("expected string") };
        assert_eq!(manager.get_string(h).unwrap().0, b"hello\nworld");
    }

    #[test]
    fn reads_key() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(b":key", &mut interner, &mut manager).unwrap();
        let Value::Key(id) = forms[0] else { panic!("expected key") };
        assert_eq!(interner.resolve(id), Some(&b"key"[..]));
    }

    #[test]
    fn empty_key_is_error() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let err = read_all(b":", &mut interner, &mut manager).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyKey);
    }

    #[test]
    fn reads_quoted_symbol() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(b"''foo", &mut interner, &mut manager).unwrap();
        let Value::Symbol(sym) = forms[0] else { panic!("expected symbol") };
        assert_eq!(sym.quotes(), 2);
        assert_eq!(interner.resolve(sym.id()), Some(&b"foo"[..]));
    }

    #[test]
    fn too_many_quotes_is_error() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let err = read_all(b"''''foo", &mut interner, &mut manager).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TooManyQuotes);
    }

    #[test]
    fn empty_symbol_is_error() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let err = read_all(b"'", &mut interner, &mut manager).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptySymbol);
    }

    #[test]
    fn unexpected_close_paren_is_error() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let err = read_all(b")", &mut interner, &mut manager).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedCloseParen);
    }

    #[test]
    fn unterminated_list_is_lenient() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(b"(+ 1 2", &mut interner, &mut manager).unwrap();
        let Value::List(h) = forms[0] else { panic!("expected list") };
        assert_eq!(manager.get_list(h).unwrap().0.len(), 3);
    }

    #[test]
    fn reads_nested_list() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(b"(+ 1 (foo 2 3))", &mut interner, &mut manager).unwrap();
        let Value::List(h) = forms[0] else { panic!("expected list") };
        let items = &manager.get_list(h).unwrap().0;
        assert_eq!(items.len(), 3);
        assert!(matches!(items[2], Value::List(_)));
    }

    #[test]
    fn reads_multiple_top_level_forms() {
        let mut interner = Interner::new();
        let mut manager = ObjectManager::new();
        let forms = read_all(b"12 true false 4.5", &mut interner, &mut manager).unwrap();
        assert_eq!(forms.len(), 4);
        assert_eq!(forms[3], Value::Float(4.5));
    }
}
