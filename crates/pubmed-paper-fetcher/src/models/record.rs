//! Parsed record: one CSV row per PubMed article.

use serde::{Deserialize, Serialize};

use super::Author;

/// Placeholder for a missing scalar field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for an empty list field.
pub const NONE: &str = "None";

/// Output columns, in order.
pub const CSV_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Flat summary of one PubMed article.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    /// PubMed identifier.
    #[serde(rename = "PubmedID")]
    pub pmid: String,

    /// Article title.
    #[serde(rename = "Title")]
    pub title: String,

    /// `Year-Month-Day` of `DateCompleted`.
    #[serde(rename = "Publication Date")]
    pub publication_date: String,

    /// `; `-joined names of authors without an academic affiliation.
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,

    /// `; `-joined distinct company affiliations.
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,

    /// First email found in any affiliation.
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

impl ParsedRecord {
    /// Build a record from extracted fields, classifying the authors.
    ///
    /// Authors are visited in document order: the first email wins and
    /// company affiliations keep first-seen order.
    #[must_use]
    pub fn new(
        pmid: impl Into<String>,
        title: impl Into<String>,
        publication_date: impl Into<String>,
        authors: &[Author],
    ) -> Self {
        let mut non_academic = Vec::new();
        let mut companies: Vec<&str> = Vec::new();
        let mut email = None;

        for author in authors {
            if email.is_none() {
                email = author.email();
            }
            if !author.is_academic() {
                non_academic.push(author.full_name());
            }
            if author.is_company() {
                let affiliation = author.affiliation_or_default();
                if !companies.contains(&affiliation) {
                    companies.push(affiliation);
                }
            }
        }

        Self {
            pmid: pmid.into(),
            title: title.into(),
            publication_date: publication_date.into(),
            non_academic_authors: join_or_none(&non_academic),
            company_affiliations: join_or_none(&companies),
            corresponding_email: email.unwrap_or(NONE).to_string(),
        }
    }
}

fn join_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        NONE.to_string()
    } else {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("; ")
    }
}
