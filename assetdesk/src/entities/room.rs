use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub floor_id: i32,
    pub name: String,
    /// `Office`, `Laboratory`, `Classroom` or `Storage`
    pub room_type: String,
    pub capacity: Option<i32>,
    pub is_accessible: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::floor::Entity",
        from = "Column::FloorId",
        to = "super::floor::Column::Id"
    )]
    Floor,

    #[sea_orm(has_many = "super::fixture::Entity")]
    Fixtures,

    #[sea_orm(has_many = "super::material::Entity")]
    Materials,
}

impl Related<super::floor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Floor.def()
    }
}

impl Related<super::fixture::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fixtures.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "room";
    const RESOURCE_NAME_PLURAL: &'static str = "rooms";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["name", "room_type", "floor.name"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![
            RelationLink::belongs_to("floor", "floors", "floor_id"),
            RelationLink::has_many("fixtures", "fixtures", "room_id"),
            RelationLink::has_many("materials", "materials", "room_id"),
        ]
    }
}
