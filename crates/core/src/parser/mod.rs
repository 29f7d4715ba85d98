//! PostScript source parsing.
//!
//! - `lexer`: tokenizer producing the flat token stream the interpreter walks

pub mod lexer;

// Re-export main types for convenience
pub use lexer::{Lexer, Token, TokenKind, tokenize};
