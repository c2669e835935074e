use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "buildings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campus_id: i32,
    pub name: String,
    pub code: Option<String>,
    pub built_on: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::campus::Entity",
        from = "Column::CampusId",
        to = "super::campus::Column::Id"
    )]
    Campus,

    #[sea_orm(has_many = "super::floor::Entity")]
    Floors,
}

impl Related<super::campus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campus.def()
    }
}

impl Related<super::floor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Floors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "building";
    const RESOURCE_NAME_PLURAL: &'static str = "buildings";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["name", "code", "campus.name"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![
            RelationLink::belongs_to("campus", "campuses", "campus_id"),
            RelationLink::has_many("floors", "floors", "building_id"),
        ]
    }
}
