//! Library side of the argent terminal app.
//!
//! The binary in `main.rs` is a thin dispatcher; everything it does lives
//! here so session flows can be driven by scripted input in tests.

pub mod cli;
pub mod commands;
pub mod session;
pub mod table;
pub mod username;
