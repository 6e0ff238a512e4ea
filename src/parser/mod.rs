//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with ordered rule registries and handles:
//!
//! - Expression parsing (literals, binary ops, assignment, call arrows)
//! - Declarations (modules, `use`, functions, `if`) and indented bodies
//! - Type parsing for type annotations
//! - Error reporting with source context
//!
//! Prefix rules start an expression and infix rules extend one; an infix
//! rule applies only while its binding power exceeds the caller's.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
