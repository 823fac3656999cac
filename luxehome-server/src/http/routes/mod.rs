//! Route handlers organized by resource

pub mod ai;
pub mod amenities;
pub mod dashboard;
pub mod demo;
pub mod health;
pub mod leads;
pub mod mortgage;
pub mod profiles;
pub mod properties;
