//! In-memory relation and its load-once store

use std::fs;
use std::path::Path;

use crate::decoder::{DecodeReport, RowDecoder};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::planner::Catalog;
use crate::record::Record;
use crate::schema::Schema;

use super::errors::{LoadError, LoadResult};

/// Name the relation is registered under unless configured otherwise
pub const DEFAULT_RELATION_NAME: &str = "data";

/// A named, immutable, schema-typed sequence of records
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    name: String,
    schema: Schema,
    records: Vec<Record>,
}

impl Relation {
    /// Creates a relation. Records must be positionally aligned with `schema`.
    pub fn new(name: impl Into<String>, schema: Schema, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            schema,
            records,
        }
    }

    /// Decodes `raw` into a relation
    pub fn decode(name: impl Into<String>, schema: Schema, raw: &str) -> Self {
        let records = RowDecoder::decode(raw, &schema);
        Self::new(name, schema, records)
    }

    /// Returns the relation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the records in load order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the relation holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Catalog for Relation {
    fn relation_name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// Load state of the store
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Nothing loaded yet; queries are not meaningful
    NotReady,
    /// Relation loaded and frozen
    Ready(Relation),
    /// Load failed; the store stays unusable
    Failed(String),
}

/// Holds the single relation, loaded exactly once
#[derive(Debug)]
pub struct RelationStore {
    state: LoadState,
}

impl RelationStore {
    /// Creates an uninitialized store
    pub fn new() -> Self {
        Self {
            state: LoadState::NotReady,
        }
    }

    /// Decodes `raw` and registers it under `name`.
    pub fn load(&mut self, name: &str, schema: Schema, raw: &str) -> LoadResult<&Relation> {
        if !matches!(self.state, LoadState::NotReady) {
            return Err(LoadError::AlreadyInitialized);
        }

        let scope = ObservationScope::with_fields("LOAD", &[("relation", name)]);

        if let Err(e) = schema.validate_structure() {
            scope.fail(e.message());
            return Err(self.fail(e.into()));
        }

        if raw.trim().is_empty() {
            scope.fail("empty source");
            return Err(self.fail(LoadError::EmptySource));
        }

        let report = RowDecoder::decode_with_report(raw, &schema);
        Self::log_report(&report, &schema);

        let rows = report.records.len().to_string();
        scope.complete_with_fields(&[("relation", name), ("rows", rows.as_str())]);

        self.state = LoadState::Ready(Relation::new(name, schema, report.records));
        match &self.state {
            LoadState::Ready(relation) => Ok(relation),
            _ => Err(LoadError::AlreadyInitialized),
        }
    }

    /// Reads `path` and loads it. I/O failure leaves the store failed.
    pub fn load_file(&mut self, name: &str, schema: Schema, path: &Path) -> LoadResult<&Relation> {
        if !matches!(self.state, LoadState::NotReady) {
            return Err(LoadError::AlreadyInitialized);
        }

        match fs::read_to_string(path) {
            Ok(raw) => self.load(name, schema, &raw),
            Err(source) => {
                let err = LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                };
                log_event_with_fields(Event::LoadFailed, &[("reason", err.to_string().as_str())]);
                Err(self.fail(err))
            }
        }
    }

    /// Returns the loaded relation, if ready
    pub fn relation(&self) -> Option<&Relation> {
        match &self.state {
            LoadState::Ready(relation) => Some(relation),
            _ => None,
        }
    }

    /// Returns true once a relation is loaded
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// Returns the current load state
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    fn fail(&mut self, err: LoadError) -> LoadError {
        self.state = LoadState::Failed(err.to_string());
        err
    }

    fn log_report(report: &DecodeReport, schema: &Schema) {
        if !report.header_matches {
            let expected = schema.field_names().join(",");
            log_event_with_fields(
                Event::HeaderMismatch,
                &[
                    ("expected", expected.as_str()),
                    ("found", report.header.as_deref().unwrap_or("")),
                ],
            );
        }

        if report.nan_cells > 0 || report.short_lines > 0 || report.long_lines > 0 {
            let nan_cells = report.nan_cells.to_string();
            let short_lines = report.short_lines.to_string();
            let long_lines = report.long_lines.to_string();
            log_event_with_fields(
                Event::CellsNotANumber,
                &[
                    ("nan_cells", nan_cells.as_str()),
                    ("short_lines", short_lines.as_str()),
                    ("long_lines", long_lines.as_str()),
                ],
            );
        }
    }
}

impl Default for RelationStore {
    fn default() -> Self {
        Self::new()
    }
}
