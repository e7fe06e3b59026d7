//! Remote bracket access: the client contract, its backends and their models.

/// Client contract shared by every remote backend.
pub mod bracket;
/// Challonge v1 REST backend.
#[cfg(feature = "challonge")]
pub mod challonge;
/// In-memory backend for tests and demo sessions.
pub mod memory;
/// Bracket models independent of any wire format.
pub mod models;
