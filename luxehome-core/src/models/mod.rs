//! Domain models with validation at construction
//!
//! All submitted input is validated into these types before any
//! database, storage or model call. Invalid input returns
//! `ValidationError`, not panic.

pub mod lead;
pub mod profile;
pub mod property;
pub mod status;
pub mod validation;

pub use lead::{LeadForm, LeadInput};
pub use profile::{ProfileForm, ProfileInput};
pub use property::{PropertyForm, PropertyInput, DEFAULT_ADDRESS};
pub use status::{LeadStatus, ListingType, PropertyStatus, PropertyType};
pub use validation::ValidationError;
