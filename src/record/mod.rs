//! Record model for tabula
//!
//! Every cell carries a tagged `Value` decided once at decode or query time.
//! Both the sort comparator and the display formatter consult the tag, so no
//! component inspects raw cell text to guess at its type.

mod record;
mod value;

pub use record::Record;
pub use value::Value;
