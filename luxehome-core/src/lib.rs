//! luxehome-core: domain layer for the LuxeHome listings service
//!
//! Apart from config loading everything here is pure: validation of submitted forms, the amenity
//! catalogue, gallery padding, the mapping from listing filters to query
//! predicates, AI prompt/response handling and mortgage maths.
//! Database, storage and model calls live in `luxehome-server`.

pub mod amenities;
pub mod config;
pub mod error;
pub mod filters;
pub mod gallery;
pub mod models;
pub mod mortgage;
pub mod scoring;

pub use amenities::{Amenities, Amenity, AmenityCategory, MASTER_AMENITIES};
pub use config::LuxeConfig;
pub use error::LuxeError;
pub use filters::{ListingQuery, Predicate, PropertyFilters, RowRange, SortOrder};
pub use models::ValidationError;

/// Result type alias for luxehome-core operations
pub type Result<T> = std::result::Result<T, LuxeError>;
