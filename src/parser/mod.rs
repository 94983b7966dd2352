//! Parser for the jobforge definition language

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::parse;
