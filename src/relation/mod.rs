//! Relation Store subsystem for tabula
//!
//! Holds the one decoded relation the executor queries.
//!
//! # Lifecycle
//!
//! `NotReady` -> `Ready(relation)` on a successful load, or
//! `NotReady` -> `Failed(reason)` when the source cannot be read.
//! Both end states are terminal: the relation is never reloaded or mutated,
//! and queries only ever derive new sequences from it.

mod errors;
mod store;

pub use errors::{LoadError, LoadResult};
pub use store::{LoadState, Relation, RelationStore, DEFAULT_RELATION_NAME};
