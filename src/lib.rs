// Library root
// -----------
// This crate exposes the library surface behind the `keep-cli` binary.
// `main.rs` parses the process arguments and hands them to `commands`.
//
// Module responsibilities:
// - `config`: Fixed API constants and environment overrides.
// - `logging`: Diagnostic logging bootstrap (stderr only).
// - `error`: The error taxonomy shared by every layer.
// - `auth`: Resolves the bearer token (credential helper, then env var).
// - `api`: Encapsulates HTTP interactions with the Keep REST API.
// - `model`: Wire types for notes and permissions.
// - `args`: Turns CLI tokens into a typed `Command`.
// - `commands`: One handler per command plus the dispatcher.
// - `ui`: Terminal rendering of notes, permissions and usage help.
//
// Handlers only see the `api::KeepApi` trait, so they can be tested
// without a network and the HTTP layer can be swapped independently.
pub mod api;
pub mod args;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod ui;

pub use error::{KeepError, Result};
