//! Core domain logic for Playground.
//!
//! - [`catalog`]: TTL cache over the live model listing
//! - [`session`]: per-session model enablement and sampling settings
//! - [`controller`]: one submission from transcript append to outcome
//! - [`errors`]: provider failure classification
//! - [`attachment`]: image loading and PNG normalization
//! - [`guide`]: model comparison guide

pub mod attachment;
pub mod catalog;
pub mod controller;
pub mod errors;
pub mod guide;
pub mod session;

pub use attachment::{ImageError, load_attachment, png_data_url};
pub use catalog::{CatalogCache, CatalogSource, Clock, SystemClock};
pub use controller::{
    ChatBackend, Notice, SessionContext, SubmitError, SubmitOutcome, Submission, build_request,
    submit, system_directive,
};
pub use errors::{FailureKind, extract_error_message, user_facing_message};
pub use guide::{Category, GuideSection, ModelGuide, QuickPick, build_guide};
pub use session::{Reselection, SessionError, SessionState, SessionStats};
