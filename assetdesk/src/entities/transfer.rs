use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

/// A request to hand a fixture over from one user to another.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fixture_id: i32,
    pub from_user: String,
    pub to_user: String,
    /// `Pending`, `Approved` or `Rejected`
    pub status: String,
    pub requested_at: DateTime,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fixture::Entity",
        from = "Column::FixtureId",
        to = "super::fixture::Column::Id"
    )]
    Fixture,
}

impl Related<super::fixture::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fixture.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "transfer";
    const RESOURCE_NAME_PLURAL: &'static str = "transfers";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["from_user", "to_user", "fixture.name", "fixture.barcode"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![RelationLink::belongs_to("fixture", "fixtures", "fixture_id")]
    }
}
