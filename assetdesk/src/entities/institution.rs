use sea_orm::entity::prelude::*;

use crate::core::Filterable;
use crate::filtering::RelationLink;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "institutions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub city: Option<String>,
    /// `Active` or `Passive`
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id"
    )]
    Country,

    #[sea_orm(has_many = "super::campus::Entity")]
    Campuses,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::campus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campuses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Filterable for Entity {
    const RESOURCE_NAME_SINGULAR: &'static str = "institution";
    const RESOURCE_NAME_PLURAL: &'static str = "institutions";
    const RESOURCE_DESCRIPTION: &'static str = "Universities, schools and other organisations owning campuses.";

    fn id_column() -> Column {
        Column::Id
    }

    fn searchable_fields() -> Vec<&'static str> {
        vec!["name", "code", "city", "country.name"]
    }

    fn relations() -> Vec<RelationLink> {
        vec![
            RelationLink::belongs_to("country", "countries", "country_id"),
            RelationLink::has_many("campuses", "campuses", "institution_id"),
        ]
    }
}
