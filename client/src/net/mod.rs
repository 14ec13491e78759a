//! Networking for the backend REST surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps every `/utilities` call; request/response shapes come from the
//! shared `records` crate.

pub mod api;
