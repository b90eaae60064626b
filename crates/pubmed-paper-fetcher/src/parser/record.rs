//! Field extraction from a PubMed `efetch` document.

use super::tree::{Element, parse_document};
use crate::error::ParseResult;
use crate::models::{Author, NOT_AVAILABLE, ParsedRecord};

/// Parse an `efetch` XML document into a [`ParsedRecord`].
///
/// Only the first article of the document is summarized for scalar fields;
/// every `Author` element in the document is classified.
pub fn parse_record(xml: &str) -> ParseResult<ParsedRecord> {
    let root = parse_document(xml)?;
    Ok(extract_record(&root))
}

/// Extract the output fields from an already parsed document.
#[must_use]
pub fn extract_record(root: &Element) -> ParsedRecord {
    let pmid = text_or_na(root.find("PMID"));
    let title = text_or_na(root.find("ArticleTitle"));
    let publication_date = publication_date(root.find("DateCompleted"));

    let authors: Vec<Author> = root.find_all("Author").into_iter().map(author).collect();

    tracing::trace!(%pmid, authors = authors.len(), "extracted record fields");

    ParsedRecord::new(pmid, title, publication_date, &authors)
}

/// `Year-Month-Day` of a `DateCompleted` element.
///
/// A missing or childless element gives `N/A`; a missing part gives `N/A` in
/// its slot.
fn publication_date(date: Option<&Element>) -> String {
    match date {
        Some(date) if date.has_elements() => format!(
            "{}-{}-{}",
            text_or_na(date.child("Year")),
            text_or_na(date.child("Month")),
            text_or_na(date.child("Day"))
        ),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn author(el: &Element) -> Author {
    Author {
        fore_name: text_of(el.child("ForeName")),
        last_name: text_of(el.child("LastName")),
        affiliation: text_of(el.find("Affiliation")),
    }
}

fn text_of(el: Option<&Element>) -> Option<String> {
    let text = el?.text();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn text_or_na(el: Option<&Element>) -> String {
    text_of(el).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
