//! Rendering of the run result into the outbound notification.
//!
//! # Submodules
//!
//! - [`email`]: builds the subject line and the self-contained HTML body
//!   handed to the SMTP transport (or printed on `--dry-run`)

pub mod email;
