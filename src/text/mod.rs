//! Text utilities
//!
//! Offset unit conversion, HTML entity escaping, and whitespace
//! tokenization. No annotation knowledge; everything here operates on plain
//! `&str`.

pub mod escape;
pub mod offsets;
pub mod tokenize;

pub use escape::{escape, escaped_unit_len};
pub use tokenize::split_tokens;
