//! Compile-time registry of the resources served by the API.

use axum::Router;

use crate::core::Filterable;
use crate::entities::{building, campus, country, fixture, floor, institution, material, room, transfer};
use crate::models::ResourceInfo;
use crate::routes::{AppState, resource_router};

/// Run a generic function with the entity type behind an [`EntityKind`].
macro_rules! with_entity {
    ($kind:expr, $fun:ident) => {
        match $kind {
            EntityKind::Country => $fun::<country::Entity>(),
            EntityKind::Institution => $fun::<institution::Entity>(),
            EntityKind::Campus => $fun::<campus::Entity>(),
            EntityKind::Building => $fun::<building::Entity>(),
            EntityKind::Floor => $fun::<floor::Entity>(),
            EntityKind::Room => $fun::<room::Entity>(),
            EntityKind::Fixture => $fun::<fixture::Entity>(),
            EntityKind::Material => $fun::<material::Entity>(),
            EntityKind::Transfer => $fun::<transfer::Entity>(),
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Country,
    Institution,
    Campus,
    Building,
    Floor,
    Room,
    Fixture,
    Material,
    Transfer,
}

impl EntityKind {
    pub const ALL: [Self; 9] = [
        Self::Country,
        Self::Institution,
        Self::Campus,
        Self::Building,
        Self::Floor,
        Self::Room,
        Self::Fixture,
        Self::Material,
        Self::Transfer,
    ];

    /// URL segment, e.g. `fixtures`
    #[must_use]
    pub fn plural(self) -> &'static str {
        with_entity!(self, plural_of)
    }

    #[must_use]
    pub fn info(self) -> ResourceInfo {
        with_entity!(self, info_of)
    }

    #[must_use]
    pub fn router(self) -> Router<AppState> {
        with_entity!(self, resource_router)
    }
}

fn plural_of<R: Filterable>() -> &'static str {
    R::RESOURCE_NAME_PLURAL
}

fn info_of<R: Filterable>() -> ResourceInfo {
    ResourceInfo {
        name: R::RESOURCE_NAME_SINGULAR,
        path: format!("/api/{}", R::RESOURCE_NAME_PLURAL),
        description: R::RESOURCE_DESCRIPTION,
        searchable_fields: R::searchable_fields(),
        relations: R::relations().iter().map(|link| link.name).collect(),
    }
}
