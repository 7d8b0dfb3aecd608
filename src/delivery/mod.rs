//! Delivery adapter
//!
//! The only part of the export pipeline that performs I/O: persisting the
//! artifact and handing it to share or email facilities, either of which may
//! be missing on a given device.

pub mod email;
pub mod share;
pub mod writer;

pub use email::{EmailCapability, EmailDraft, OutboxMailer, EMAIL_SUBJECT};
pub use share::{CommandShare, ShareCapability, ShareRequest, SHARE_DIALOG_TITLE};
pub use writer::ArtifactWriter;
