//! Shared REST contract for the testbench UI and CLI.
//!
//! This crate owns the request/response shapes of the backend's
//! `/utilities` surface, the verdict model used during chunk review, CSV
//! import/export, and the small input checks the forms apply before a
//! request leaves the browser. It has no I/O of its own, so both the WASM
//! client and the native CLI depend on it.

pub mod analysis;
pub mod auth;
pub mod csv;
mod de;
pub mod endpoints;
mod error;
pub mod media;
pub mod runs;
pub mod task;

pub use error::RecordsError;
