use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "floors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub building_id: i32,
    pub name: String,
    /// 0 is the ground floor, negative levels are basements
    pub level: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::building::Entity",
        from = "Column::BuildingId",
        to = "super::building::Column::Id"
    )]
    Building,

    #[sea_orm(has_many = "super::room::Entity")]
    Rooms,
}

impl Related<super::building::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Building.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "floor";
    const RESOURCE_NAME_PLURAL: &'static str = "floors";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["name", "building.name"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![
            RelationLink::belongs_to("building", "buildings", "building_id"),
            RelationLink::has_many("rooms", "rooms", "floor_id"),
        ]
    }
}
