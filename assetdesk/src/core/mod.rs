// Resource trait and the bulk operations every resource gets

pub mod bulk;
pub mod traits;

// Re-export commonly used items
pub use bulk::{bulk_delete, bulk_update};
pub use traits::Filterable;
