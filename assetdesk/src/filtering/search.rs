use sea_orm::{Condition, sea_query::SimpleExpr};

use super::clause::{FieldPath, FilterCondition};
use super::conditions::build_path_predicate;
use super::relations::QueryScope;

// Basic safety limit
const MAX_SEARCH_TERM_LENGTH: usize = 10_000;

/// Free-text search over a resource's searchable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    pub term: Option<String>,
    pub exact_match: bool,
    /// Column names or `relation.column` dot paths, in display order
    pub searchable_fields: Vec<String>,
}

impl SearchSpec {
    pub fn new(term: Option<String>, exact_match: bool, searchable_fields: &[&str]) -> Self {
        Self {
            term,
            exact_match,
            searchable_fields: searchable_fields.iter().map(ToString::to_string).collect(),
        }
    }

    /// The term to search for. An empty term counts as no search.
    #[must_use]
    pub fn active_term(&self) -> Option<&str> {
        self.term
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(truncate_term)
    }
}

fn truncate_term(term: &str) -> &str {
    if term.len() <= MAX_SEARCH_TERM_LENGTH {
        return term;
    }
    let mut end = MAX_SEARCH_TERM_LENGTH;
    while !term.is_char_boundary(end) {
        end -= 1;
    }
    &term[..end]
}

/// One OR group across all searchable fields, or `None` when there is
/// nothing to search for.
#[must_use]
pub fn build_search_condition(search: &SearchSpec, scope: &QueryScope) -> Option<Condition> {
    let term = search.active_term()?;
    let condition = if search.exact_match {
        FilterCondition::Equals
    } else {
        FilterCondition::Like
    };

    let predicates: Vec<SimpleExpr> = search
        .searchable_fields
        .iter()
        .filter_map(|field| build_path_predicate(scope, &FieldPath::parse(field), &condition, term))
        .collect();

    if predicates.is_empty() {
        return None;
    }

    Some(
        predicates
            .into_iter()
            .fold(Condition::any(), |group, predicate| group.add(predicate)),
    )
}
