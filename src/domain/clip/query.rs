//! Search query grammar.
//!
//! ```text
//! query    ::= selector keyword*
//! selector ::= pack-name | "-"
//! ```
//!
//! Tokens are separated by runs of whitespace. `-` selects every pack the
//! searching user is subscribed to; any other selector is a literal pack
//! name. Keywords are OR-combined with each other and AND-combined with the
//! pack filter. An empty query means `-`.

use std::collections::HashSet;
use std::fmt;

use crate::domain::pack::PackName;

use super::Clip;

/// Selector token meaning "all my subscribed packs".
pub const SUBSCRIBED_SELECTOR: &str = "-";

/// Which packs a search covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every pack the user is subscribed to.
    Subscribed,
    /// A literal pack name, not yet validated.
    Pack(String),
}

/// A parsed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub selector: Selector,
    /// Normalized keyword tokens, deduplicated, in query order.
    pub keywords: Vec<String>,
    /// Keyword terms were given but none contained a letter or digit.
    pub unsearchable: bool,
}

impl SearchQuery {
    /// True when no clip can match, whatever the index holds.
    pub fn matches_nothing(&self) -> bool {
        self.unsearchable
    }
}

/// A single-pack query against the clip index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    pub pack_key: String,
    pub keywords: Vec<String>,
}

/// Parses search strings and expands them into per-pack index queries.
pub struct QueryBuilder;

impl QueryBuilder {
    /// Parses the raw query. Never fails; odd input just matches nothing.
    pub fn parse(raw: &str) -> SearchQuery {
        let mut tokens = raw.split_whitespace();

        let selector = match tokens.next() {
            None => Selector::Subscribed,
            Some(SUBSCRIBED_SELECTOR) => Selector::Subscribed,
            Some(name) => Selector::Pack(name.to_string()),
        };

        let terms: Vec<&str> = tokens.collect();
        let mut seen = HashSet::new();
        let keywords: Vec<String> = terms
            .iter()
            .flat_map(|t| tokenize(t))
            .filter(|k| seen.insert(k.clone()))
            .collect();

        SearchQuery {
            selector,
            unsearchable: !terms.is_empty() && keywords.is_empty(),
            keywords,
        }
    }

    /// Builds the index query scoping `query`'s keywords to one pack.
    pub fn for_pack(pack: &PackName, query: &SearchQuery) -> IndexQuery {
        IndexQuery {
            pack_key: pack.key(),
            keywords: query.keywords.clone(),
        }
    }
}

impl IndexQuery {
    /// In-process evaluation, used by the in-memory index.
    pub fn matches(&self, clip: &Clip) -> bool {
        if clip.pack.key() != self.pack_key {
            return false;
        }
        if self.keywords.is_empty() {
            return true;
        }
        let tokens = clip.tokens();
        self.keywords.iter().any(|k| tokens.contains(k))
    }
}

/// Canonical query string, used as the query's identity in logs.
impl fmt::Display for IndexQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keywords.is_empty() {
            write!(f, "Pack = {}", self.pack_key)
        } else {
            write!(
                f,
                "Pack = {} AND Keywords = ({})",
                self.pack_key,
                self.keywords.join(" OR ")
            )
        }
    }
}

/// Splits free text into lower-cased alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Drops repeated clip ids, keeping the first occurrence and the order.
pub fn dedupe_by_clip_id(clips: Vec<Clip>) -> Vec<Clip> {
    let mut seen = HashSet::new();
    clips
        .into_iter()
        .filter(|c| seen.insert(c.clip_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ClipId;
    use proptest::prelude::*;

    fn clip(pack: &str, id: &str, keywords: &str) -> Clip {
        Clip::new(
            PackName::parse(pack).unwrap(),
            ClipId::new(id).unwrap(),
            keywords,
        )
    }

    #[test]
    fn empty_query_selects_subscriptions() {
        let q = QueryBuilder::parse("");
        assert_eq!(q.selector, Selector::Subscribed);
        assert!(q.keywords.is_empty());

        assert_eq!(QueryBuilder::parse("   ").selector, Selector::Subscribed);
    }

    #[test]
    fn dash_selects_subscriptions_with_keywords() {
        let q = QueryBuilder::parse("- funny  cat");
        assert_eq!(q.selector, Selector::Subscribed);
        assert_eq!(q.keywords, vec!["funny", "cat"]);
    }

    #[test]
    fn first_token_is_literal_pack_name() {
        let q = QueryBuilder::parse("CATS funny");
        assert_eq!(q.selector, Selector::Pack("CATS".to_string()));
        assert_eq!(q.keywords, vec!["funny"]);
    }

    #[test]
    fn invalid_pack_token_is_kept_for_later_resolution() {
        let q = QueryBuilder::parse("!!! funny");
        assert_eq!(q.selector, Selector::Pack("!!!".to_string()));
    }

    #[test]
    fn keywords_are_normalized_and_deduplicated() {
        let q = QueryBuilder::parse("- Funny FUNNY! cat-video");
        assert_eq!(q.keywords, vec!["funny", "cat", "video"]);
    }

    #[test]
    fn symbol_only_keywords_match_nothing() {
        let q = QueryBuilder::parse("cats ???");
        assert!(q.keywords.is_empty());
        assert!(q.matches_nothing());

        assert!(!QueryBuilder::parse("cats").matches_nothing());
        assert!(!QueryBuilder::parse("cats ??? funny").matches_nothing());
        assert!(!QueryBuilder::parse("-").matches_nothing());
    }

    #[test]
    fn index_query_renders_canonical_string() {
        let pack = PackName::parse("cats").unwrap();
        let bare = QueryBuilder::for_pack(&pack, &QueryBuilder::parse("cats"));
        assert_eq!(bare.to_string(), "Pack = CATS");

        let with_keywords = QueryBuilder::for_pack(&pack, &QueryBuilder::parse("cats a b"));
        assert_eq!(with_keywords.to_string(), "Pack = CATS AND Keywords = (a OR b)");
    }

    #[test]
    fn index_query_matches_pack_and_any_keyword() {
        let pack = PackName::parse("cats").unwrap();
        let q = QueryBuilder::for_pack(&pack, &QueryBuilder::parse("cats funny serious"));

        assert!(q.matches(&clip("cats", "1", "very funny")));
        assert!(q.matches(&clip("CATS", "2", "Serious business")));
        assert!(!q.matches(&clip("cats", "3", "boring")));
        assert!(!q.matches(&clip("dogs", "4", "funny")));
    }

    #[test]
    fn index_query_without_keywords_matches_whole_pack() {
        let pack = PackName::parse("cats").unwrap();
        let q = QueryBuilder::for_pack(&pack, &QueryBuilder::parse("cats"));
        assert!(q.matches(&clip("cats", "1", "")));
    }

    #[test]
    fn dedupe_keeps_first_occurrence_in_order() {
        let clips = vec![
            clip("a", "1", "x"),
            clip("b", "2", "y"),
            clip("b", "1", "z"),
        ];
        let deduped = dedupe_by_clip_id(clips);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].pack.as_str(), "a");
        assert_eq!(deduped[1].clip_id.as_str(), "2");
    }

    proptest! {
        #[test]
        fn parse_never_panics(raw in ".*") {
            let _ = QueryBuilder::parse(&raw);
        }

        #[test]
        fn keywords_are_lowercase_alphanumeric(raw in "- [a-zA-Z0-9 ,.!-]{0,60}") {
            let q = QueryBuilder::parse(&raw);
            for k in q.keywords {
                prop_assert!(!k.is_empty());
                prop_assert!(k.chars().all(|c| c.is_alphanumeric()));
                prop_assert_eq!(k.clone(), k.to_lowercase());
            }
        }
    }
}
