//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Most browser access (storage, clipboard, files, downloads, navigation)
//! lives here so pages and components rarely touch `web_sys` directly.

pub mod auth;
pub mod clipboard;
pub mod download;
pub mod files;
pub mod notify;
pub mod storage;
