//! `efetch` XML parsing.
//!
//! [`tree`] turns the raw document into an element tree; [`record`] pulls the
//! output fields out of it.

mod record;
pub mod tree;

pub use record::{extract_record, parse_record};
pub use tree::{Element, parse_document};
