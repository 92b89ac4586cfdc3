pub mod ast;
pub mod compiler;
pub mod format;
pub mod lexer;
pub mod parser;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use ast::*;
pub use compiler::{CompileError, Compiler};
pub use format::{format_constraint, format_linear, format_number, format_objective, to_source};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser};
