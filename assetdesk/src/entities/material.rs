use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

/// Educational material: books, lab kits, devices and licences.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub room_id: Option<i32>,
    pub name: String,
    /// `Book`, `Device`, `Kit` or `Software`
    pub kind: String,
    pub quantity: i32,
    pub is_consumable: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "material";
    const RESOURCE_NAME_PLURAL: &'static str = "materials";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["name", "kind", "room.name"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![RelationLink::belongs_to("room", "rooms", "room_id")]
    }
}
