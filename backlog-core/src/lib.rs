//! Data model for the game backlog: platforms, play statuses, library records,
//! and the store contract shared by the reconciler and its store adapters.
//!
//! Nothing here performs I/O. Store adapters implement [`RecordView`]; the
//! in-memory [`LibrarySnapshot`] is the implementation the reconciler runs on.

pub mod platform;
pub mod record;
pub mod snapshot;
pub mod status;
pub mod util;

pub use platform::{Platform, PlatformGroup, PlatformParseError};
pub use record::{ExternalRecord, Mutation, Record, RecordKey, RecordRef, RecordView};
pub use snapshot::LibrarySnapshot;
pub use status::{PlayStatus, decide};
