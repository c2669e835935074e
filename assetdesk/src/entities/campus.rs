use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "campuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub institution_id: i32,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::institution::Entity",
        from = "Column::InstitutionId",
        to = "super::institution::Column::Id"
    )]
    Institution,

    #[sea_orm(has_many = "super::building::Entity")]
    Buildings,
}

impl Related<super::institution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institution.def()
    }
}

impl Related<super::building::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buildings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "campus";
    const RESOURCE_NAME_PLURAL: &'static str = "campuses";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["name", "address", "institution.name"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![
            RelationLink::belongs_to("institution", "institutions", "institution_id"),
            RelationLink::has_many("buildings", "buildings", "campus_id"),
        ]
    }
}
