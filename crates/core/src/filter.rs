//! Project listing filters.
//!
//! The literal value `all` (any case) is a sentinel meaning "no filtering",
//! never a category or tag to match against. Empty values behave the same.

use serde::Deserialize;

/// Sentinel that disables a filter.
pub const ALL: &str = "all";

/// One filter dimension: either everything or a single exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    /// Build a selector from an optional query parameter value.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Selector::All,
            Some(v) if v.eq_ignore_ascii_case(ALL) => Selector::All,
            Some(v) => Selector::Only(v.to_string()),
        }
    }

    /// The value to match, or `None` when unfiltered.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selector::All => None,
            Selector::Only(v) => Some(v),
        }
    }
}

/// Query parameters accepted by `GET /api/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// Predicate applied to projects, by the database or in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub category: Selector,
    pub tag: Selector,
}

impl ProjectFilter {
    /// A filter that matches every project.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a single category.
    pub fn category(category: &str) -> Self {
        Self {
            category: Selector::from_param(Some(category)),
            tag: Selector::All,
        }
    }

    /// Whether a project with the given category and tags passes the filter.
    pub fn matches(&self, category: &str, tags: &[String]) -> bool {
        let category_ok = self.category.value().map_or(true, |c| c == category);
        let tag_ok = self.tag.value().map_or(true, |t| tags.iter().any(|x| x == t));
        category_ok && tag_ok
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category == Selector::All && self.tag == Selector::All
    }
}

impl From<&ProjectQuery> for ProjectFilter {
    fn from(query: &ProjectQuery) -> Self {
        Self {
            category: Selector::from_param(query.category.as_deref()),
            tag: Selector::from_param(query.tag.as_deref()),
        }
    }
}
