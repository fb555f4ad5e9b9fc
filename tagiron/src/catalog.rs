use std::collections::BTreeSet;
use std::io::Read;

use anyhow::Context;
use tracing::debug;

use crate::{QuestionCard, QuestionCardId};

/// The catalog shipped with the library.
pub const DEFAULT_CATALOG_JSON: &str = include_str!("../data/questions.json");

/// The error type for a catalog that doesn't contain every question card exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    MissingCard(QuestionCardId),
    DuplicateCard(QuestionCardId),
}

impl std::error::Error for CatalogError {}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::MissingCard(id) => write!(f, "Catalog is missing card `{}`", id),
            CatalogError::DuplicateCard(id) => {
                write!(f, "Catalog contains card `{}` more than once", id)
            }
        }
    }
}

/// Parses the [default catalog](DEFAULT_CATALOG_JSON).
pub fn default_catalog() -> anyhow::Result<Vec<QuestionCard>> {
    parse_catalog(DEFAULT_CATALOG_JSON).context("Embedded question catalog is invalid")
}

/// Reads a JSON array of `{"id", "ja", "en"}` records.
///
/// The order of the records becomes the initial order of the deck.
pub fn load_catalog<R: Read>(reader: R) -> anyhow::Result<Vec<QuestionCard>> {
    let cards: Vec<QuestionCard> = serde_json::from_reader(reader)?;
    validate_catalog(&cards)?;
    debug!(num_cards = cards.len(), "Loaded question catalog");
    Ok(cards)
}

pub fn parse_catalog(json: &str) -> anyhow::Result<Vec<QuestionCard>> {
    load_catalog(json.as_bytes())
}

/// Checks that every [`QuestionCardId`] occurs exactly once.
pub fn validate_catalog(cards: &[QuestionCard]) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for card in cards {
        if !seen.insert(card.id) {
            return Err(CatalogError::DuplicateCard(card.id));
        }
    }
    for id in QuestionCardId::ALL {
        if !seen.contains(&id) {
            return Err(CatalogError::MissingCard(id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_complete() {
        let cards = default_catalog().unwrap();
        assert_eq!(cards.len(), QuestionCardId::ALL.len());
        let ids: Vec<QuestionCardId> = cards.iter().map(|card| card.id).collect();
        assert_eq!(ids, QuestionCardId::ALL.to_vec());
        assert!(cards.iter().all(|card| !card.ja.is_empty() && !card.en.is_empty()));
    }

    #[test]
    fn ids_match_catalog_keys() {
        for id in QuestionCardId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn incomplete_catalogs_are_rejected() {
        let mut cards = default_catalog().unwrap();
        let removed = cards.remove(3);
        assert_eq!(
            validate_catalog(&cards),
            Err(CatalogError::MissingCard(removed.id))
        );
        cards.push(cards[0].clone());
        assert_eq!(
            validate_catalog(&cards),
            Err(CatalogError::DuplicateCard(cards[0].id))
        );
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let json = r#"[{"id": "where_10", "ja": "", "en": ""}]"#;
        assert!(parse_catalog(json).is_err());
    }
}
