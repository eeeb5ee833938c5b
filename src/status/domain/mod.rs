//! Domain model for build statuses.

mod label;
mod status;

pub use label::{PENDING_LABEL, ParseStatusLabelError, StatusLabel};
pub use status::{BuildRecord, BuildStatus, PersistedStatusData};
