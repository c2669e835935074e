use sea_orm::{EntityName, EntityTrait, Select};

use crate::filtering::{QueryScope, RelationLink};

/// A resource that list screens and bulk-edit screens can work on.
///
/// Implemented on the SeaORM `Entity` of each table:
///
/// ```rust,ignore
/// impl Filterable for Entity {
///     const RESOURCE_NAME_SINGULAR: &'static str = "fixture";
///     const RESOURCE_NAME_PLURAL: &'static str = "fixtures";
///
///     fn id_column() -> Column { Column::Id }
///
///     fn searchable_fields() -> Vec<&'static str> {
///         vec!["name", "barcode", "room.name"]
///     }
///
///     fn relations() -> Vec<RelationLink> {
///         vec![RelationLink::belongs_to("room", "rooms", "room_id")]
///     }
/// }
/// ```
pub trait Filterable: EntityTrait<Model: Sync> {
    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    const RESOURCE_DESCRIPTION: &'static str = "";

    fn id_column() -> Self::Column;

    /// Fields searched by the free-text `search` parameter, in order.
    /// Dot paths (`room.name`) search through a declared relation.
    fn searchable_fields() -> Vec<&'static str>;

    /// Relations reachable from filter and search dot paths.
    #[must_use]
    fn relations() -> Vec<RelationLink> {
        vec![]
    }

    /// Query every list request starts from.
    #[must_use]
    fn base_query() -> Select<Self> {
        Self::find()
    }

    #[must_use]
    fn table() -> String {
        Self::default().table_name().to_string()
    }

    #[must_use]
    fn scope() -> QueryScope {
        QueryScope::new(Self::table(), Self::relations())
    }
}
