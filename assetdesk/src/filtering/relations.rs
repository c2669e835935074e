//! Relation-existence predicates for one-level `relation.column` paths.
//!
//! A resource declares the relations a list screen may reach through
//! [`RelationLink`]s. A predicate on a related column becomes
//!
//! ```sql
//! EXISTS (SELECT 1 FROM related
//!         WHERE related.foreign_key = main.local_key AND <predicate>)
//! ```
//!
//! which works the same for belongs-to (`fixture.room`) and has-many
//! (`room.fixtures`) links.

use sea_orm::sea_query::{Alias, Expr, Query, SimpleExpr};

use super::conditions::column_ref;

/// How the main table reaches a related table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationLink {
    /// Name used in dot paths (e.g. `country`)
    pub name: &'static str,
    /// Related table (e.g. `countries`)
    pub table: &'static str,
    /// Column on the main table
    pub local_key: &'static str,
    /// Column on the related table
    pub foreign_key: &'static str,
}

impl RelationLink {
    /// Belongs-to: `main.<local_key>` points at `related.id`.
    #[must_use]
    pub const fn belongs_to(name: &'static str, table: &'static str, local_key: &'static str) -> Self {
        Self {
            name,
            table,
            local_key,
            foreign_key: "id",
        }
    }

    /// Has-many: `related.<foreign_key>` points at `main.id`.
    #[must_use]
    pub const fn has_many(name: &'static str, table: &'static str, foreign_key: &'static str) -> Self {
        Self {
            name,
            table,
            local_key: "id",
            foreign_key,
        }
    }
}

/// The main table of a list query and the relations reachable from it.
#[derive(Debug, Clone)]
pub struct QueryScope {
    pub table: String,
    pub relations: Vec<RelationLink>,
}

impl QueryScope {
    pub fn new(table: impl Into<String>, relations: Vec<RelationLink>) -> Self {
        Self {
            table: table.into(),
            relations,
        }
    }

    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&RelationLink> {
        self.relations.iter().find(|link| link.name == name)
    }

    /// Wrap a predicate on the related table into an `EXISTS` subquery.
    #[must_use]
    pub fn relation_exists(&self, link: &RelationLink, predicate: SimpleExpr) -> SimpleExpr {
        let subquery = Query::select()
            .expr(Expr::cust("1"))
            .from(Alias::new(link.table))
            .and_where(
                Expr::col(column_ref(link.table, link.foreign_key))
                    .equals(column_ref(&self.table, link.local_key)),
            )
            .and_where(predicate)
            .to_owned();
        Expr::exists(subquery)
    }
}
