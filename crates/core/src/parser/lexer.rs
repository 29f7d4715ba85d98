//! PostScript tokenizer.
//!
//! Lexes document text into a flat sequence of typed tokens. The lexer is
//! total: characters that start no token are skipped, unterminated strings
//! run to the end of input, and nothing here ever fails.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `%` to end of line. Comments are removed before scanning.
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[^\n\r]*").expect("comment pattern is valid"));

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Integer, real or exponent form (`12`, `-.5`, `3e4`)
    Number,
    /// Parenthesized string with escapes already decoded
    String,
    /// `<...>` string, decoded to one character per hex pair
    HexString,
    /// `/name` literal, stored without the slash
    Name,
    /// Executable name
    Operator,
    /// `{` or `}`
    Brace,
    /// `[` or `]`
    Bracket,
    /// `<<` or `>>`
    DictMarker,
}

/// A lexed token: its kind plus the (decoded) source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// True if this token has the given kind and text.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Operator name if this token is executable.
    pub fn operator(&self) -> Option<&str> {
        (self.kind == TokenKind::Operator).then_some(self.text.as_str())
    }
}

/// Tokenize a whole document.
///
/// Comments are stripped first, so a `%` inside a string literal also
/// starts a comment.
pub fn tokenize(source: &str) -> Vec<Token> {
    let stripped = COMMENT_RE.replace_all(source, " ");
    Lexer::new(&stripped).collect()
}

/// Character cursor over comment-free source text.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if is_whitespace(c)) {
            self.pos += 1;
        }
    }

    fn take(&mut self, kind: TokenKind, len: usize) -> Token {
        let end = (self.pos + len).min(self.chars.len());
        let text: String = self.chars[self.pos..end].iter().collect();
        self.pos = end;
        Token::new(kind, text)
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            let c = self.peek()?;
            if let Some(token) = self.match_token(c) {
                return Some(token);
            }
            // Tolerant lexing: drop the character and keep going.
            self.pos += 1;
        }
    }

    fn match_token(&mut self, c: char) -> Option<Token> {
        if c == '(' {
            return Some(self.parse_string());
        }
        if let Some(len) = self.number_len() {
            return Some(self.take(TokenKind::Number, len));
        }
        match c {
            '{' | '}' => return Some(self.take(TokenKind::Brace, 1)),
            '[' | ']' => return Some(self.take(TokenKind::Bracket, 1)),
            _ => {}
        }
        let next = self.peek_at(1);
        if (c == '<' && next == Some('<')) || (c == '>' && next == Some('>')) {
            return Some(self.take(TokenKind::DictMarker, 2));
        }
        if c == '<' {
            return Some(self.parse_hex_string());
        }
        self.parse_name()
    }

    /// Length of the number starting at the cursor, if one does.
    ///
    /// Accepts `[+-]?(\d+\.\d*|\.\d+|\d+)([eE][+-]?\d+)?`.
    fn number_len(&self) -> Option<usize> {
        let digits_from = |start: usize| {
            self.chars[start.min(self.chars.len())..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .count()
        };

        let mut len = 0;
        if matches!(self.peek(), Some('+' | '-')) {
            len += 1;
        }
        let int_digits = digits_from(self.pos + len);
        len += int_digits;

        if self.peek_at(len) == Some('.') {
            let frac_digits = digits_from(self.pos + len + 1);
            if int_digits == 0 && frac_digits == 0 {
                return None;
            }
            len += 1 + frac_digits;
        } else if int_digits == 0 {
            return None;
        }

        if matches!(self.peek_at(len), Some('e' | 'E')) {
            let mut exp_len = 1;
            if matches!(self.peek_at(len + 1), Some('+' | '-')) {
                exp_len += 1;
            }
            let exp_digits = digits_from(self.pos + len + exp_len);
            if exp_digits > 0 {
                len += exp_len + exp_digits;
            }
        }

        Some(len)
    }

    fn parse_string(&mut self) -> Token {
        let mut result = String::new();
        let mut i = self.pos + 1; // skip '('
        let mut depth = 1;

        while i < self.chars.len() {
            let c = self.chars[i];
            match c {
                '\\' => {
                    i += 1;
                    let Some(&esc) = self.chars.get(i) else {
                        break;
                    };
                    match esc {
                        'n' => result.push('\n'),
                        'r' => result.push('\r'),
                        't' => result.push('\t'),
                        'b' => result.push('\u{08}'),
                        'f' => result.push('\u{0c}'),
                        '(' | ')' | '\\' | ' ' => result.push(esc),
                        '0'..='7' => {
                            let mut code = 0u32;
                            let mut taken = 0;
                            while taken < 3 {
                                match self.chars.get(i + taken) {
                                    Some(&d @ '0'..='7') => {
                                        code = code * 8 + (d as u32 - '0' as u32);
                                        taken += 1;
                                    }
                                    _ => break,
                                }
                            }
                            result.push(char::from(code.min(255) as u8));
                            i += taken - 1;
                        }
                        other => result.push(other),
                    }
                }
                '(' => {
                    depth += 1;
                    result.push(c);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos = i + 1;
                        return Token::new(TokenKind::String, result);
                    }
                    result.push(c);
                }
                _ => result.push(c),
            }
            i += 1;
        }

        self.pos = self.chars.len();
        Token::new(TokenKind::String, result)
    }

    fn parse_hex_string(&mut self) -> Token {
        let mut i = self.pos + 1; // skip '<'
        let mut digits = Vec::new();
        while i < self.chars.len() && self.chars[i] != '>' {
            if !is_whitespace(self.chars[i]) {
                digits.push(self.chars[i]);
            }
            i += 1;
        }
        self.pos = (i + 1).min(self.chars.len());

        let text = digits
            .chunks(2)
            .map(|pair| char::from(hex_pair_value(pair)))
            .collect::<String>();
        Token::new(TokenKind::HexString, text)
    }

    fn parse_name(&mut self) -> Option<Token> {
        let literal = self.peek() == Some('/');
        let start = usize::from(literal);
        if !matches!(self.peek_at(start), Some(c) if is_name_start(c)) {
            return None;
        }
        let mut len = start + 1;
        while matches!(self.peek_at(len), Some(c) if is_name_char(c)) {
            len += 1;
        }

        if literal {
            self.pos += 1;
            Some(self.take(TokenKind::Name, len - 1))
        } else {
            Some(self.take(TokenKind::Operator, len))
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '-' | '.' | '?' | '*')
}

const fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

/// Value of the leading hex digits of a one- or two-character chunk.
/// A chunk that starts with a non-hex character decodes to 0.
fn hex_pair_value(pair: &[char]) -> u8 {
    let mut value = 0u32;
    for c in pair {
        match c.to_digit(16) {
            Some(d) => value = value * 16 + d,
            None => break,
        }
    }
    value as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_number_forms() {
        let tokens = tokenize("12 -3 .5 4. 1.5e3 -2E-2");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["12", "-3", ".5", "4.", "1.5e3", "-2E-2"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_minus_alone_is_operator() {
        let tokens = tokenize("-foo");
        assert_eq!(tokens, vec![Token::new(TokenKind::Operator, "-foo")]);
    }

    #[test]
    fn test_structural_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("{ } [ ] << >>"),
            vec![Brace, Brace, Bracket, Bracket, DictMarker, DictMarker]
        );
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let tokens = tokenize("1 ! 2 @ #");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_hex_pair_value_prefix() {
        assert_eq!(hex_pair_value(&['4', '1']), 0x41);
        assert_eq!(hex_pair_value(&['a']), 0x0a);
        assert_eq!(hex_pair_value(&['z', '1']), 0);
    }
}
