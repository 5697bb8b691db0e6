//! psh: a minimal command interpreter.
//!
//! Each input line is split into an argument vector, checked against the builtin
//! table (`quit`), and otherwise run as an external program in a forked child. A
//! trailing `&` runs the child in the background instead of waiting for it.

pub mod cli;
pub mod conf;
pub mod control;
pub mod control_state;
pub mod environment;
pub mod error;
pub mod input;
pub mod logging;
pub mod parser;
pub mod process;
pub mod signals;
