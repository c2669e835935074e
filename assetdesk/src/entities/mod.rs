// SeaORM entities for the back office tables

pub mod bootstrap;
pub mod building;
pub mod campus;
pub mod country;
pub mod fixture;
pub mod floor;
pub mod institution;
pub mod material;
pub mod room;
pub mod transfer;

pub use bootstrap::create_sqlite_schema;
