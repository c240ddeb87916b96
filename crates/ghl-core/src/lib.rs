//! Core types and terminal utilities for the gh-label CLI.
//!
//! This crate provides the foundational abstractions used across all
//! gh-label crates:
//! - [`IOStreams`] for terminal I/O handling and output capture
//! - [`Repo`] for resolving the target repository
//! - Color validation and generation, table formatting, text utilities

pub mod colors;
pub mod iostreams;
pub mod repo;
pub mod table;
pub mod text;

pub use iostreams::IOStreams;
pub use repo::Repo;
