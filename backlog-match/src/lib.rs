//! Approximate game-name matching.
//!
//! Exact-key lookups belong to the store; this crate handles the cases where
//! a user-typed or externally sourced name has no exact match: Levenshtein
//! distance, best-candidate selection, and the resolution outcome a caller
//! turns into a prompt or a decision.

pub mod distance;
pub mod matcher;
pub mod resolver;

pub use distance::{distance, distance_with_case};
pub use matcher::{
    DEFAULT_LIMIT, MatchCandidate, StreamingMatcher, create_matcher, match_names, ranked_matches,
};
pub use resolver::{Resolution, resolve, resolve_with_limit, suggest};
