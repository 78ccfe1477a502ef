//! Foundation types for routersim.
//!
//! This crate contains the types shared by every routersim crate: the error
//! enum returned across the command trie and handler boundary, and the TOML
//! configuration used to seed the simulated router.

pub mod config;
pub mod error;
