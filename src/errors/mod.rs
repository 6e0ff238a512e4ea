//! Error types and error reporting for the front end.
//!
//! This module defines the single fault type shared by the lexer and the
//! parser. It includes:
//!
//! - The structured cause of every fault
//! - The source position of the offending token
//! - Rendering of the surrounding source lines with a caret underline

pub mod errors;

#[cfg(test)]
mod tests;
