//! Regex-like pattern engine.
//!
//! A [`Pattern`] is compiled front-to-back: the parser builds a small tree
//! from the surface grammar (bytes, `.`, escapes, classes, bracket sets,
//! alternation, groups, quantifiers), the emitter lowers it into a compact
//! bytecode of five-plus-one opcodes with fixed native-width operands, and
//! the matcher executes the bytecode with a bounded backtracking stack,
//! greedy quantifier rewind and capture extraction.
//!
//! Matching is byte-oriented except where UTF-8 is explicitly atomic: a
//! multibyte literal in the pattern and the `.` atom both consume one whole
//! codepoint. Lookaround, named captures, backreferences and non-greedy
//! quantifiers are not part of the grammar.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

mod atom;
mod compile;
mod exec;
mod opcode;

pub use exec::{Captures, Pattern};
pub use opcode::{Opcode, MATCHER_DEPTH, PARSER_DEPTH};

pub use strand_types::{Error, Result};
