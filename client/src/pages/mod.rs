//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches, submissions, toasts)
//! and delegates rendering details to `components`.

pub mod analysis;
pub mod chunk_analysis;
pub mod chunks;
pub mod fresh_load;
pub mod generate_image;
pub mod home;
pub mod login;
pub mod model_test;
pub mod regression_load;
pub(crate) mod review_actions;
pub mod signup;
pub mod task;
