use serde::{Deserialize, Serialize};

/// Collection of listed books. Listings are created outside the marketplace.
pub const BOOKS: &str = "books";

/// A listed book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Document id of the listing
    pub id: String,
    pub title: String,
    /// Asking price
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Identifier of the listing user. Listings without one cannot be
    /// requested.
    #[serde(rename = "ownerID", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Book {
    /// Case-insensitive substring match on title or author.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self
                .author
                .as_deref()
                .is_some_and(|author| author.to_lowercase().contains(&query))
    }
}

/// Query parameters of the listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    /// Free-text search over title and author
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: Option<&str>) -> Book {
        Book {
            id: "b".into(),
            title: title.into(),
            price: 10.0,
            image_url: None,
            owner_id: None,
            author: author.map(Into::into),
        }
    }

    #[test]
    fn search_matches_title_or_author_case_insensitively() {
        let dune = book("Dune", Some("Frank Herbert"));
        assert!(dune.matches("dUNe"));
        assert!(dune.matches("herbert"));
        assert!(dune.matches("  "));
        assert!(!dune.matches("emma"));
    }

    #[test]
    fn search_ignores_missing_author() {
        assert!(!book("Dune", None).matches("herbert"));
    }
}
