//! Installation code list parsing
//!
//! This module handles parsing of code list files used by the batch mode of the CLI.

mod parser;

pub use parser::{CodeEntry, CodeList};
