//! # Dynamic Filtering & Search
//!
//! Turns the list-screen request (structured filter clauses, a free-text
//! search term, a sort column and a page) into one database query and returns
//! a page of rows with pagination metadata.
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Structured filters (JSON array, AND-ed in list order)
//! GET /api/fixtures?filters=[{"field":"status","condition":"in","value":"Assigned,Unassigned"}]
//!
//! // Filter through a relation (EXISTS subquery on rooms)
//! GET /api/fixtures?filters=[{"field":"room.name","condition":"like","value":"Lab"}]
//!
//! // Free-text search across every searchable field of the resource
//! GET /api/institutions?search=Ankara
//! GET /api/institutions?search=Turkey&exact_match=true
//!
//! // Sorting and pagination
//! GET /api/rooms?sort_column=name&sort_direction=desc&page_size=25&page=2
//! ```
//!
//! ## Processing Order
//!
//! 1. Search adds one OR group across the searchable fields.
//! 2. Filters are AND-ed on in list order; unsupported conditions are skipped.
//! 3. Sort applies when both column and direction are present.
//! 4. The query is counted and the requested page fetched.
//!
//! Supported conditions are `=`, `!=`, `like`, `in` and `not in`. A `like`
//! value is matched as a literal substring.

pub mod clause;
pub mod conditions;
pub mod engine;
pub mod pagination;
pub mod relations;
pub mod search;
pub mod sort;

// Re-export commonly used items
pub use clause::{FieldPath, FilterClause, FilterCondition, parse_filters_json};
pub use conditions::{build_comparison, build_filter_predicate, build_path_predicate, column_ref, contains_pattern};
pub use engine::{ListQuery, apply_list_query, filter_and_paginate};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, PageMeta, PageRequest};
pub use relations::{QueryScope, RelationLink};
pub use search::{SearchSpec, build_search_condition};
pub use sort::{SortDirection, SortSpec};
