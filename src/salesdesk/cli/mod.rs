//! Argument parsing and terminal output for the `salesdesk` binary. Not part of
//! the library API.

pub mod args;
pub mod print;
