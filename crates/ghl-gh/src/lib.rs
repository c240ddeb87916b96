//! gh subprocess wrapper and label operations for the gh-label CLI.
//!
//! This crate never speaks the GitHub wire protocol directly: every remote
//! operation shells out to the authenticated `gh` CLI and parses its output.
//! - [`GhExec`] runs the `gh` binary and captures its output
//! - [`LabelBackend`] is the capability trait over the remote label store,
//!   with a real subprocess implementation ([`GhCli`]) and an in-memory one
//!   for tests ([`StubBackend`])
//! - [`Client`] parses backend payloads into [`Label`] records
//! - [`label`] holds the label record and its CSV/JSON codec

pub mod client;
pub mod errors;
pub mod exec;
pub mod label;

pub use client::{Client, GhCli, LabelBackend, StubBackend};
pub use errors::GhError;
pub use exec::GhExec;
pub use label::{EditLabel, Label, LabelFormat};
