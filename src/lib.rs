//! # tpls
//!
//! A parser for the FANUC TP teach pendant language (`.ls` program files).
//!
//! The crate exposes a single synchronous parsing boundary: source text in,
//! `Program` AST (or a positioned `ParseError`) out. Editor tooling layers
//! (diagnostics, completion, hover) consume the AST read-only; nothing in
//! here keeps state between calls, so independent documents may be parsed
//! concurrently without synchronization.
//!
//! ## Testing
//!
//! Grammar-level tests live next to their grammars in `#[cfg(test)]`
//! modules and in `tp::parser::tests`; whole-program tests live under
//! `tests/`.

pub mod tp;

pub use tp::error::ParseError;
pub use tp::parser::{parse_instruction, parse_program};
