// Core algorithm exports
pub mod error;
pub mod filters;
pub mod matcher;
pub mod partition;
pub mod preferences;
pub mod scoring;
pub mod stability;

pub use error::MatchError;
pub use filters::{accepts_identity, mutually_compatible};
pub use matcher::{deferred_acceptance, run_matching, MatchResult, Matcher};
pub use partition::RolePartition;
pub use preferences::{derive, PreferenceLists};
pub use scoring::{calculate_compatibility, score_matrix};
pub use stability::{blocking_pairs, is_stable};
