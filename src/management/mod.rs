mod catalog;
mod reconcile;

pub use catalog::CatalogError;
pub use catalog::CatalogManager;
pub use catalog::SearchField;
pub use reconcile::repair_missing_covers;
pub use reconcile::update_record;
