//! Property form validation
//!
//! Drafts only need a title. Publishing (`Active`) needs every field a
//! listing page shows, and all the gaps are reported in one error.

use serde::Deserialize;

use super::validation::{optional_text, Missing};
use super::{ListingType, PropertyStatus, PropertyType, ValidationError};
use crate::amenities::{self, Amenities};

const MAX_TITLE_LEN: usize = 200;
const MAX_ADDRESS_LEN: usize = 300;
const MAX_DESCRIPTION_LEN: usize = 10_000;

/// Address stored when a property is saved without one
pub const DEFAULT_ADDRESS: &str = "123 Luxury Lane, Beverly Hills, CA";

/// Raw property fields as submitted (multipart text parts)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub sqft: Option<String>,
    /// JSON object text, e.g. `{"pool":true}`
    pub amenities: Option<String>,
    pub listing_type: Option<String>,
    pub address: Option<String>,
}

/// Validated property ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInput {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub beds: i32,
    pub baths: i32,
    pub sqft: i32,
    pub amenities: Amenities,
    pub listing_type: ListingType,
    pub address: String,
}

fn parse_f64(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_i32(value: Option<&str>) -> Option<i32> {
    // "3.0" from number inputs still counts as 3
    value.map(str::trim).and_then(|v| {
        v.parse::<i32>()
            .ok()
            .or_else(|| v.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i32))
    })
}

fn non_negative<T: PartialOrd + Default>(
    value: Option<T>,
    field: &'static str,
) -> Result<T, ValidationError> {
    match value {
        Some(v) if v < T::default() => Err(ValidationError::OutOfRange {
            field,
            reason: "cannot be negative",
        }),
        Some(v) => Ok(v),
        None => Ok(T::default()),
    }
}

impl PropertyForm {
    /// Set a field by its form name; unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "price" => &mut self.price,
            "type" => &mut self.property_type,
            "status" => &mut self.status,
            "beds" => &mut self.beds,
            "baths" => &mut self.baths,
            "sqft" => &mut self.sqft,
            "amenities" => &mut self.amenities,
            "listing_type" => &mut self.listing_type,
            "address" => &mut self.address,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Requested status; blank means draft.
    pub fn status(&self) -> Result<PropertyStatus, ValidationError> {
        match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.parse(),
            None => Ok(PropertyStatus::Draft),
        }
    }

    /// Validate the form.
    ///
    /// `image_count` is the number of images the property will have after
    /// this save (new uploads, or the existing gallery on update).
    ///
    /// # Example
    /// ```
    /// use luxehome_core::models::PropertyForm;
    ///
    /// let mut form = PropertyForm::default();
    /// form.set("title", "Glass Cube".into());
    /// assert!(form.validate(0).is_ok());          // draft
    ///
    /// form.set("status", "Active".into());
    /// assert!(form.validate(0).is_err());         // publishing needs more
    /// ```
    pub fn validate(&self, image_count: usize) -> Result<PropertyInput, ValidationError> {
        let status = self.status()?;

        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        let address = self.address.as_deref().map(str::trim).unwrap_or_default();
        let price = parse_f64(self.price.as_deref());
        let beds = parse_i32(self.beds.as_deref());
        let baths = parse_i32(self.baths.as_deref());
        let sqft = parse_i32(self.sqft.as_deref());

        let mut missing = Missing::default();
        missing.check(!title.is_empty(), "Title");
        if status == PropertyStatus::Active {
            missing.check(!address.is_empty(), "Location");
            missing.check(price.is_some_and(|p| p > 0.0), "Price (must be > 0)");
            missing.check(beds.is_some_and(|b| b >= 0), "Bedrooms");
            missing.check(baths.is_some_and(|b| b >= 0), "Bathrooms");
            missing.check(sqft.is_some_and(|s| s > 0), "Square Footage");
            missing.check(image_count > 0, "At least 1 image");
        }
        missing.finish()?;

        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        let address = match optional_text(Some(address), "address", MAX_ADDRESS_LEN)? {
            Some(a) => a,
            None => DEFAULT_ADDRESS.to_string(),
        };
        let description =
            optional_text(self.description.as_deref(), "description", MAX_DESCRIPTION_LEN)?
                .unwrap_or_default();

        let property_type = match self.property_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.parse()?,
            _ => PropertyType::default(),
        };
        let listing_type = match self.listing_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.parse()?,
            _ => ListingType::default(),
        };

        Ok(PropertyInput {
            title: title.to_owned(),
            description,
            price: non_negative(price, "price")?,
            property_type,
            status,
            beds: non_negative(beds, "beds")?,
            baths: non_negative(baths, "baths")?,
            sqft: non_negative(sqft, "sqft")?,
            amenities: self.parse_amenities()?,
            listing_type,
            address,
        })
    }

    /// Full catalogue map with submitted flags applied.
    fn parse_amenities(&self) -> Result<Amenities, ValidationError> {
        let mut map = amenities::empty();
        let Some(raw) = self.amenities.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(map);
        };

        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|_| ValidationError::InvalidFormat {
                field: "amenities",
                reason: "must be a JSON object",
            })?;
        if !value.is_object() {
            return Err(ValidationError::InvalidFormat {
                field: "amenities",
                reason: "must be a JSON object",
            });
        }
        map.extend(amenities::from_json_object(&value));
        Ok(map)
    }
}
