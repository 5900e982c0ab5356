//! codec::plist
//!
//! Parser for the OpenStep property-list dialect of `project.pbxproj`.
//!
//! # Grammar
//!
//! ```text
//! value  := dict | array | string
//! dict   := '{' (string '=' value ';')* '}'
//! array  := '(' (value (',' value)* ','?)? ')'
//! string := bare | '"' (char | escape)* '"'
//! ```
//!
//! `/* ... */` and `// ...` comments may appear between any two tokens and
//! are ignored. The `// !$*UTF8*$!` header is such a comment.

use thiserror::Error;

use crate::core::model::{Attributes, PlistValue};

/// Errors from parsing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// Parse a whole document. Trailing content after the root value is an
/// error.
pub fn parse(input: &str) -> Result<PlistValue, ParseError> {
    let mut parser = Parser { src: input, pos: 0 };
    parser.skip_trivia()?;
    let value = parser.value()?;
    parser.skip_trivia()?;
    if parser.pos < input.len() {
        return Err(parser.error("unexpected content after root value"));
    }
    Ok(value)
}

/// Whether `c` may appear in an unquoted string.
pub(crate) fn is_bare_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.' | '-')
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn line(&self) -> usize {
        self.src[..self.pos].matches('\n').count() + 1
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line(),
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                let end = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += end;
            } else if trimmed.starts_with("/*") {
                let end = trimmed[2..]
                    .find("*/")
                    .ok_or_else(|| self.error("unterminated comment"))?;
                self.pos += end + 4;
            } else {
                return Ok(());
            }
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        self.skip_trivia()?;
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected '{}', found {}",
                c,
                self.peek()
                    .map(|f| format!("'{}'", f))
                    .unwrap_or_else(|| "end of input".to_string())
            )))
        }
    }

    fn value(&mut self) -> Result<PlistValue, ParseError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('{') => self.dict().map(PlistValue::Dict),
            Some('(') => self.array().map(PlistValue::Array),
            Some(_) => self.string().map(PlistValue::String),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn dict(&mut self) -> Result<Attributes, ParseError> {
        self.expect('{')?;
        let mut map = Attributes::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(map);
            }
            let key = self.string()?;
            self.expect('=')?;
            let value = self.value()?;
            self.expect(';')?;
            map.insert(key, value);
        }
    }

    fn array(&mut self) -> Result<Vec<PlistValue>, ParseError> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(')') {
                self.pos += 1;
                return Ok(items);
            }
            items.push(self.value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') => {}
                _ => return Err(self.error("expected ',' or ')' in array")),
            }
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('"') => self.quoted(),
            Some(c) if is_bare_char(c) => Ok(self.bare()),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn bare(&mut self) -> String {
        let rest = self.rest();
        let mut end = 0;
        for (i, c) in rest.char_indices() {
            if !is_bare_char(c) || rest[i..].starts_with("//") || rest[i..].starts_with("/*") {
                break;
            }
            end = i + c.len_utf8();
        }
        self.pos += end;
        rest[..end].to_string()
    }

    fn quoted(&mut self) -> Result<String, ParseError> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            let c = self
                .peek()
                .ok_or_else(|| self.error("unterminated string"))?;
            self.pos += c.len_utf8();
            match c {
                '"' => return Ok(out),
                '\\' => out.push(self.escape()?),
                other => out.push(other),
            }
        }
    }

    fn escape(&mut self) -> Result<char, ParseError> {
        let c = self
            .peek()
            .ok_or_else(|| self.error("unterminated escape"))?;
        self.pos += c.len_utf8();
        Ok(match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            'U' => {
                let hex = self
                    .rest()
                    .get(..4)
                    .ok_or_else(|| self.error("short \\U escape"))?;
                let code = u32::from_str_radix(hex, 16)
                    .map_err(|_| self.error(format!("invalid \\U escape '{}'", hex)))?;
                self.pos += 4;
                char::from_u32(code)
                    .ok_or_else(|| self.error(format!("invalid code point {:04X}", code)))?
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> PlistValue {
        PlistValue::String(v.to_string())
    }

    mod values {
        use super::*;

        #[test]
        fn parses_nested_structures() {
            let value = parse("{ a = 1; b = ( x, \"y z\", ); c = { d = e; }; }").unwrap();
            let dict = value.as_dict().unwrap();
            assert_eq!(dict["a"], s("1"));
            assert_eq!(dict["b"], PlistValue::Array(vec![s("x"), s("y z")]));
            assert_eq!(dict["c"].as_dict().unwrap()["d"], s("e"));
        }

        #[test]
        fn arrays_without_trailing_comma() {
            let value = parse("(a, b)").unwrap();
            assert_eq!(value, PlistValue::Array(vec![s("a"), s("b")]));
        }

        #[test]
        fn bare_paths_and_variables() {
            let value = parse("{ path = Sources/App/main.swift; v = $SRCROOT; }").unwrap();
            let dict = value.as_dict().unwrap();
            assert_eq!(dict["path"], s("Sources/App/main.swift"));
            assert_eq!(dict["v"], s("$SRCROOT"));
        }
    }

    mod strings {
        use super::*;

        #[test]
        fn escapes_are_decoded() {
            let value = parse(r#""line\n\ttab \"q\" back\\slash""#).unwrap();
            assert_eq!(value, s("line\n\ttab \"q\" back\\slash"));
        }

        #[test]
        fn unicode_escape() {
            assert_eq!(parse(r#""\U00e9""#).unwrap(), s("é"));
        }

        #[test]
        fn utf8_passes_through() {
            assert_eq!(parse("\"Größe.swift\"").unwrap(), s("Größe.swift"));
        }
    }

    mod comments {
        use super::*;

        #[test]
        fn header_and_annotations_are_ignored() {
            let input = "// !$*UTF8*$!\n{\n\tfile = ABC /* Foo.swift */;\n}\n";
            let value = parse(input).unwrap();
            assert_eq!(value.as_dict().unwrap()["file"], s("ABC"));
        }

        #[test]
        fn comment_directly_after_bare_token() {
            let value = parse("{ a = ID/* c */; }").unwrap();
            assert_eq!(value.as_dict().unwrap()["a"], s("ID"));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn reports_line_of_failure() {
            let err = parse("{\n a = b;\n c = ;\n}").unwrap_err();
            assert_eq!(err.line, 3);
        }

        #[test]
        fn unterminated_string() {
            assert!(parse("\"abc").is_err());
        }

        #[test]
        fn trailing_garbage() {
            assert!(parse("{ } }").is_err());
        }
    }
}
