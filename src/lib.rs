//! tabula - an interactive, deterministic explorer for small delimited datasets
//!
//! A delimited source is decoded once into an immutable relation. Queries
//! over it produce fresh result sets that can be re-sorted in place, and a
//! small set of filter inputs composes into query text.

pub mod cli;
pub mod config;
pub mod decoder;
pub mod executor;
pub mod explorer;
pub mod filter;
pub mod observability;
pub mod planner;
pub mod record;
pub mod relation;
pub mod schema;
pub mod view;
