//! Token source for the interpreter.
//!
//! Calling a user procedure pushes its body as a new frame instead of
//! splicing it into the token array, so expansion costs nothing beyond a
//! reference count bump. Lookahead sees the remaining tokens of every frame
//! from innermost to outermost, which is exactly the sequence the
//! interpreter will consume next.

use crate::parser::Token;
use smallvec::SmallVec;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct Frame {
    tokens: Rc<[Token]>,
    pos: usize,
}

impl Frame {
    fn remaining(&self) -> &[Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Stack of token frames; the bottom frame is the program itself.
#[derive(Debug, Clone)]
pub struct TokenStream {
    frames: SmallVec<[Frame; 4]>,
}

impl TokenStream {
    pub fn new(tokens: Rc<[Token]>) -> Self {
        let mut frames = SmallVec::new();
        frames.push(Frame { tokens, pos: 0 });
        Self { frames }
    }

    /// Number of procedure bodies currently being executed.
    pub fn expansion_depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Start executing `body` before the rest of the stream.
    ///
    /// Frames that have already been fully consumed are dropped first, so
    /// a procedure invoked as the last token of another procedure does not
    /// deepen the stack. Returns `false` without pushing when the resulting
    /// depth would exceed `limit`.
    pub fn push_expansion(&mut self, body: Rc<[Token]>, limit: Option<usize>) -> bool {
        while self.frames.len() > 1 && self.frames.last().is_some_and(Frame::is_exhausted) {
            self.frames.pop();
        }
        if let Some(limit) = limit
            && self.expansion_depth() >= limit
        {
            return false;
        }
        if !body.is_empty() {
            self.frames.push(Frame {
                tokens: body,
                pos: 0,
            });
        }
        true
    }

    /// Tokens still to be consumed, innermost frame first.
    pub fn lookahead(&self) -> impl Iterator<Item = &Token> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.remaining().iter())
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(top) = self.frames.last_mut() {
            if let Some(token) = top.tokens.get(top.pos) {
                top.pos += 1;
                return Some(token.clone());
            }
            if self.frames.len() == 1 {
                return None;
            }
            self.frames.pop();
        }
        None
    }
}
