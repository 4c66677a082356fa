//! Category and text filters, and search-term highlighting.

use crate::model::ProductWithCategory;
use serde::Serialize;

/// Label of the pseudo-category that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl From<&str> for CategoryFilter {
    fn from(name: &str) -> Self {
        if name == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(name.to_string())
        }
    }
}

impl CategoryFilter {
    pub fn matches(&self, category_name: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category_name,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }
}

/// The menu browser's current category tab and search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    pub category: CategoryFilter,
    pub search_term: String,
}

impl MenuFilter {
    pub fn new(category: impl Into<CategoryFilter>, search_term: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            search_term: search_term.into(),
        }
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Builds the predicate once, lowercasing the term a single time.
    pub fn matcher(&self) -> impl Fn(&ProductWithCategory<'_>) -> bool + '_ {
        let needle = self.search_term.to_lowercase();
        move |product| {
            self.category.matches(product.category_name)
                && (needle.is_empty() || product.searchable_text().to_lowercase().contains(&needle))
        }
    }

    pub fn matches(&self, product: &ProductWithCategory<'_>) -> bool {
        self.matcher()(product)
    }
}

/// A run of text that either matches the search term or does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Byte length of the case-insensitive match of `term` at the start of `text`.
fn match_len(text: &str, term: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    for wanted in term.chars() {
        let (_, found) = chars.next()?;
        if !found.to_lowercase().eq(wanted.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(text.len(), |(end, _)| end))
}

/// Splits `text` into matched and unmatched segments, scanning left to right
/// for non-overlapping, case-insensitive occurrences of `term`.
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    if term.is_empty() {
        return vec![Segment { text, matched: false }];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;
    while cursor < text.len() {
        match match_len(&text[cursor..], term) {
            Some(len) => {
                if plain_start < cursor {
                    segments.push(Segment {
                        text: &text[plain_start..cursor],
                        matched: false,
                    });
                }
                segments.push(Segment {
                    text: &text[cursor..cursor + len],
                    matched: true,
                });
                cursor += len;
                plain_start = cursor;
            }
            None => {
                cursor += text[cursor..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    if plain_start < text.len() || segments.is_empty() {
        segments.push(Segment {
            text: &text[plain_start..],
            matched: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    fn matched(segments: &[Segment<'_>]) -> Vec<String> {
        segments
            .iter()
            .filter(|s| s.matched)
            .map(|s| s.text.to_string())
            .collect()
    }

    #[test]
    fn test_category_filter_from_label() {
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from("Pizza"), CategoryFilter::Named("Pizza".into()));
        assert_eq!(CategoryFilter::from("Pizza").as_str(), "Pizza");
        assert!(CategoryFilter::All.matches("Dezerty"));
    }

    #[test]
    fn test_matcher_searches_name_description_and_category() {
        let product = Product::new("Calzone", "199 Kč").with_description("šunka, žampiony");
        let item = ProductWithCategory {
            product: &product,
            category_name: "Pizza",
        };
        assert!(MenuFilter::new("all", "PIZZA").matches(&item));
        assert!(MenuFilter::new("Pizza", "Šunka").matches(&item));
        assert!(MenuFilter::new("all", "ka, ža").matches(&item));
        assert!(!MenuFilter::new("Těstoviny", "").matches(&item));
        assert!(!MenuFilter::new("all", "salát").matches(&item));
    }

    #[test]
    fn test_highlight_is_case_insensitive() {
        let segments = highlight("Pizza Margherita", "pizza");
        assert_eq!(
            segments,
            vec![
                Segment { text: "Pizza", matched: true },
                Segment { text: " Margherita", matched: false },
            ]
        );
    }

    #[test]
    fn test_highlight_multiple_and_non_ascii() {
        let segments = highlight("Šunka a šunkový sýr", "ŠUNK");
        assert_eq!(matched(&segments), vec!["Šunk", "šunk"]);
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, "Šunka a šunkový sýr");
    }

    #[test]
    fn test_highlight_term_is_literal() {
        let segments = highlight("Pizza (malá)", "(malá)");
        assert_eq!(matched(&segments), vec!["(malá)"]);
    }

    #[test]
    fn test_highlight_without_term_or_match() {
        assert_eq!(highlight("Tiramisu", ""), vec![Segment { text: "Tiramisu", matched: false }]);
        assert_eq!(highlight("Tiramisu", "pizza"), vec![Segment { text: "Tiramisu", matched: false }]);
        assert_eq!(highlight("", "pizza"), vec![Segment { text: "", matched: false }]);
    }
}
