//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and the shared review/selection widgets while
//! reading and writing state from Leptos context providers or signal props.

pub mod analysis_card;
pub mod header;
pub mod image_preview;
pub mod model_version_picker;
pub mod sidebar;
pub mod tag_input;
pub mod toast_host;
