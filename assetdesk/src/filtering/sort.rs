use sea_orm::{Order, sea_query::ColumnRef};

use super::conditions::column_ref;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive `asc` / `desc`; anything else is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    #[must_use]
    pub fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

/// Requested ordering. Applied only when both parts are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortSpec {
    #[must_use]
    pub fn new(column: Option<String>, direction: Option<&str>) -> Self {
        Self {
            column: column.filter(|c| !c.is_empty()),
            direction: direction.and_then(SortDirection::parse),
        }
    }

    /// Column reference and order for the main table. The column is not
    /// checked against the table; an unknown one fails in the database.
    #[must_use]
    pub fn resolve(&self, table: &str) -> Option<(ColumnRef, Order)> {
        let column = self.column.as_deref()?;
        let direction = self.direction?;
        Some((column_ref(table, column), direction.order()))
    }
}
