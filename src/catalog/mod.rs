pub mod models;
pub mod ncname;
pub mod seed;
pub mod store;

pub use models::{DataStoreInfo, FeatureTypeInfo, Scope, StoreRef, WorkspaceInfo};
pub use seed::CatalogSeed;
pub use store::Catalog;
