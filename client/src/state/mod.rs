//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `toast`, `review`, etc.) so pages and
//! components depend on small focused models. `auth` and `toast` are app-wide
//! contexts; the rest are created per page.

pub mod auth;
pub mod catalog;
pub mod chunks;
pub mod review;
pub mod task;
pub mod toast;
