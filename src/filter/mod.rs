//! Filter Compiler subsystem for tabula
//!
//! Turns a set of independent filter inputs into one query. Clause order is
//! fixed by slot order, so equal inputs always compose equal text.

mod compiler;
mod errors;
mod slots;

pub use compiler::{FilterCompiler, FilterState};
pub use errors::{FilterError, FilterErrorCode, FilterResult, Severity};
pub use slots::{FilterSlot, SlotKind};
