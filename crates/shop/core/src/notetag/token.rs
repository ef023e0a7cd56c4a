//! Tag extraction and tokenizing.
//!
//! A tag is the text between a `<` and the next `>` on one line. Its body is
//! split into words, unsigned integers, colons and commas. Anything else makes
//! the tag untokenizable, which the grammar treats as "not a directive".

/// A lexical token inside a tag body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// ASCII alphabetic run.
    Word(&'a str),
    /// Unsigned decimal integer that fits in `u32`.
    Number(u32),
    Colon,
    Comma,
}

impl Token<'_> {
    /// Case-insensitive keyword comparison.
    #[inline]
    pub fn is_word(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(word) if word.eq_ignore_ascii_case(keyword))
    }
}

/// Iterates over the bodies of every `<...>` tag in a line.
pub fn tags(line: &str) -> Tags<'_> {
    Tags { rest: line }
}

/// Iterator returned by [`tags`].
#[derive(Clone, Debug)]
pub struct Tags<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tags<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let open = self.rest.find('<')?;
        let after_open = &self.rest[open + 1..];
        let close = after_open.find('>')?;
        let mut body = &after_open[..close];

        // A stray '<' before the closing bracket: the tag starts at the last one.
        if let Some(inner) = body.rfind('<') {
            body = &body[inner + 1..];
        }

        self.rest = &after_open[close + 1..];
        Some(body)
    }
}

/// Splits a tag body into tokens.
///
/// Returns `None` when the body contains characters outside the grammar,
/// when a number overflows `u32`, or when a word and a number touch
/// (`item7`), since directives always separate them with whitespace.
pub fn tokenize(body: &str) -> Option<Vec<Token<'_>>> {
    let bytes = body.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        match byte {
            b' ' | b'\t' => pos += 1,
            b':' => {
                tokens.push(Token::Colon);
                pos += 1;
            }
            b',' => {
                tokens.push(Token::Comma);
                pos += 1;
            }
            b'0'..=b'9' => {
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                if pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                    return None;
                }
                let value = body[start..pos].parse::<u32>().ok()?;
                tokens.push(Token::Number(value));
            }
            b if b.is_ascii_alphabetic() => {
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                    pos += 1;
                }
                if pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    return None;
                }
                tokens.push(Token::Word(&body[start..pos]));
            }
            _ => return None,
        }
    }

    Some(tokens)
}
