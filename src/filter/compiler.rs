//! Filter composition
//!
//! Every present slot contributes one clause, ANDed in slot order, and the
//! query always ends in the default ORDER BY. The composed text is always
//! valid query input.

use std::collections::BTreeMap;

use crate::observability::{log_event_with_fields, Event};
use crate::planner::{quote_identifier, SortSpec};
use crate::schema::{FieldType, Schema};

use super::errors::{FilterError, FilterResult};
use super::slots::FilterSlot;

/// Raw values of the filter inputs, keyed by slot name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a slot value; an empty value clears the slot
    pub fn set(&mut self, slot: impl Into<String>, value: impl Into<String>) {
        let slot = slot.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.values.remove(&slot);
        } else {
            self.values.insert(slot, value);
        }
    }

    /// Returns the raw value of a slot
    pub fn get(&self, slot: &str) -> Option<&str> {
        self.values.get(slot).map(String::as_str)
    }

    /// Clears every slot
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns true if no slot has a value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(slot, value)` pairs in slot-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Slot bound to its column type
#[derive(Debug, Clone)]
struct BoundSlot {
    slot: FilterSlot,
    field_type: FieldType,
}

/// Composes filter state into query text
#[derive(Debug, Clone)]
pub struct FilterCompiler {
    relation: String,
    slots: Vec<BoundSlot>,
    order: SortSpec,
}

impl FilterCompiler {
    /// Creates a compiler, checking every slot against the schema.
    pub fn new(
        relation: impl Into<String>,
        schema: &Schema,
        slots: Vec<FilterSlot>,
        order: SortSpec,
    ) -> FilterResult<Self> {
        if schema.index_of(&order.field).is_none() {
            return Err(FilterError::invalid_slot(
                "ORDER BY",
                format!("column '{}' does not exist", order.field),
            ));
        }

        let mut bound: Vec<BoundSlot> = Vec::with_capacity(slots.len());
        for slot in slots {
            if bound.iter().any(|b| b.slot.name == slot.name) {
                return Err(FilterError::invalid_slot(&slot.name, "defined more than once"));
            }
            let kind = slot.kind.as_str();
            let field = schema.field(&slot.column).ok_or_else(|| {
                let reason = format!("column '{}' does not exist", slot.column);
                FilterError::invalid_slot(&slot.name, reason)
            })?;
            if slot.kind.requires_numeric() && !field.field_type.is_numeric() {
                let reason = format!("{} needs a numeric column, '{}' is text", kind, slot.column);
                return Err(FilterError::invalid_slot(&slot.name, reason));
            }
            if slot.kind.requires_text() && field.field_type.is_numeric() {
                let reason = format!("{} needs a text column, '{}' is numeric", kind, slot.column);
                return Err(FilterError::invalid_slot(&slot.name, reason));
            }
            let field_type = field.field_type;
            bound.push(BoundSlot { slot, field_type });
        }

        Ok(Self {
            relation: relation.into(),
            slots: bound,
            order,
        })
    }

    /// Metagraph explorer compiler: default slots, `alpha_price_tao DESC`
    pub fn metagraph(relation: impl Into<String>, schema: &Schema) -> FilterResult<Self> {
        Self::new(
            relation,
            schema,
            FilterSlot::metagraph_defaults(),
            SortSpec::desc("alpha_price_tao"),
        )
    }

    /// Configured slot names in clause order
    pub fn slot_names(&self) -> Vec<&str> {
        self.slots.iter().map(|b| b.slot.name.as_str()).collect()
    }

    /// Sets one slot on `state`, rejecting names no slot carries.
    pub fn set(&self, state: &mut FilterState, slot: &str, value: &str) -> FilterResult<()> {
        if !self.slots.iter().any(|b| b.slot.name == slot) {
            return Err(FilterError::unknown_slot(slot, &self.slot_names()));
        }
        state.set(slot, value);
        Ok(())
    }

    /// Query text run when every slot is empty
    pub fn default_query(&self) -> String {
        self.compose(&FilterState::new())
    }

    /// Composes the state into query text.
    pub fn compose(&self, state: &FilterState) -> String {
        let clauses: Vec<String> = self
            .slots
            .iter()
            .filter_map(|b| {
                state
                    .get(&b.slot.name)
                    .and_then(|raw| b.slot.clause(raw, b.field_type))
            })
            .collect();

        let mut text = format!("SELECT * FROM {}", quote_identifier(&self.relation));
        if !clauses.is_empty() {
            text.push_str(" WHERE ");
            text.push_str(&clauses.join(" AND "));
        }
        text.push_str(&format!(" ORDER BY {}", self.order));

        let clause_count = clauses.len().to_string();
        log_event_with_fields(
            Event::FiltersComposed,
            &[("clauses", clause_count.as_str()), ("query", text.as_str())],
        );
        text
    }
}
