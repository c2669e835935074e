use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// ISO 3166-1 alpha-2
    #[sea_orm(unique)]
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::institution::Entity")]
    Institutions,
}

impl Related<super::institution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institutions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "country";
    const RESOURCE_NAME_PLURAL: &'static str = "countries";
    const RESOURCE_DESCRIPTION: &'static str = "Countries institutions are located in.";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["name", "code"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![RelationLink::has_many("institutions", "institutions", "country_id")]
    }
}
