//! A small context-free grammar toolkit.
//!
//! Grammars are loaded from `A -> B "c" | "d"` lines by [`loader`] and run
//! through one of the parsers in [`engine`], each of which produces a
//! [`tree::Tree`].

pub mod engine;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod loader;
pub mod tree;
