//! Author data model and affiliation classification.

use super::NOT_AVAILABLE;

/// Substrings marking an affiliation as academic (case-sensitive).
pub const ACADEMIC_KEYWORDS: &[&str] = &["University", "Institute", "College", "Research", "Academy"];

/// Substrings marking an affiliation as a company (case-sensitive).
pub const COMPANY_KEYWORDS: &[&str] = &["Pharma", "Biotech", "Pharmaceutical", "Biotechnology"];

/// One `<Author>` entry of a MEDLINE citation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    /// `<ForeName>` text.
    pub fore_name: Option<String>,

    /// `<LastName>` text.
    pub last_name: Option<String>,

    /// First `<Affiliation>` found under the author.
    pub affiliation: Option<String>,
}

impl Author {
    /// Full name as `"Fore Last"`, each missing part rendered as `N/A`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.fore_name.as_deref().unwrap_or(NOT_AVAILABLE),
            self.last_name.as_deref().unwrap_or(NOT_AVAILABLE)
        )
    }

    /// Affiliation text, or `N/A` when the author has none.
    #[must_use]
    pub fn affiliation_or_default(&self) -> &str {
        self.affiliation.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// First whitespace-separated affiliation token containing `@`.
    ///
    /// Tokens are returned as written, trailing punctuation included.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.affiliation.as_deref()?.split_whitespace().find(|word| word.contains('@'))
    }

    /// Whether the affiliation names a university or similar body.
    #[must_use]
    pub fn is_academic(&self) -> bool {
        contains_any(self.affiliation_or_default(), ACADEMIC_KEYWORDS)
    }

    /// Whether the affiliation names a pharmaceutical or biotech company.
    #[must_use]
    pub fn is_company(&self) -> bool {
        contains_any(self.affiliation_or_default(), COMPANY_KEYWORDS)
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
