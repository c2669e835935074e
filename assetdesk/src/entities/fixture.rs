use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

/// A tagged piece of equipment or furniture assigned to a room.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fixtures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub room_id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub barcode: String,
    /// `Assigned` or `Unassigned`
    pub status: String,
    pub quantity: i32,
    pub purchased_on: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,

    #[sea_orm(has_many = "super::transfer::Entity")]
    Transfers,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::transfer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "fixture";
    const RESOURCE_NAME_PLURAL: &'static str = "fixtures";
    const RESOURCE_DESCRIPTION: &'static str = "Barcoded equipment and furniture, assigned to rooms.";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["name", "barcode", "room.name"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![
            RelationLink::belongs_to("room", "rooms", "room_id"),
            RelationLink::has_many("transfers", "transfers", "fixture_id"),
        ]
    }
}
