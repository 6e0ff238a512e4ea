//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using an ordered table of regex patterns
//! - Recognition of keywords, constants, identifiers, literals and operators
//! - Synthesis of `Newline`, `Indent` and `Outdent` tokens from leading spaces
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
