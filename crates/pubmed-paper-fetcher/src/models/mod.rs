//! Data models for PubMed entities.
//!
//! Output fields are plain strings: absent values are rendered as
//! [`NOT_AVAILABLE`] or [`NONE`] rather than kept as `Option`.

mod author;
mod record;
mod search;

pub use author::{ACADEMIC_KEYWORDS, Author, COMPANY_KEYWORDS};
pub use record::{CSV_HEADERS, NONE, NOT_AVAILABLE, ParsedRecord};
pub use search::{ESearchResponse, ESearchResult};
