//! Closed string sets stored as text columns

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            /// Case-insensitive match on the stored text.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err(ValidationError::InvalidVariant {
                    field: $field,
                    value: s.to_owned(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(
    /// Publication state of a property. Only `Active` rows are public listings.
    PropertyStatus, "status", {
        Draft => "Draft",
        Active => "Active",
        Archived => "Archived",
    }
);

text_enum!(
    PropertyType, "type", {
        House => "House",
        Condo => "Condo",
        Villa => "Villa",
        Apartment => "Apartment",
        Land => "Land",
    }
);

text_enum!(
    /// Buy vs rent. Rows written before this column existed hold NULL and
    /// count as `Sale`.
    ListingType, "listing type", {
        Sale => "Sale",
        Rent => "Rent",
    }
);

text_enum!(
    /// Lead pipeline: New → Contacted → Qualified → Closed
    LeadStatus, "lead status", {
        New => "New",
        Contacted => "Contacted",
        Qualified => "Qualified",
        Closed => "Closed",
    }
);

impl Default for PropertyStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl Default for PropertyType {
    fn default() -> Self {
        Self::House
    }
}

impl Default for ListingType {
    fn default() -> Self {
        Self::Sale
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::New
    }
}

impl ListingType {
    /// Interpret a nullable column value; NULL and unknown text are legacy sales.
    pub fn from_column(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("active".parse::<PropertyStatus>(), Ok(PropertyStatus::Active));
        assert_eq!(" Rent ".parse::<ListingType>(), Ok(ListingType::Rent));
        assert_eq!("CONDO".parse::<PropertyType>(), Ok(PropertyType::Condo));
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = "Sold".parse::<LeadStatus>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidVariant {
                field: "lead status",
                value: "Sold".into()
            }
        );
    }

    #[test]
    fn legacy_listing_type_is_sale() {
        assert_eq!(ListingType::from_column(None), ListingType::Sale);
        assert_eq!(ListingType::from_column(Some("Rent")), ListingType::Rent);
    }

    #[test]
    fn lead_pipeline_order() {
        assert_eq!(
            LeadStatus::ALL,
            [
                LeadStatus::New,
                LeadStatus::Contacted,
                LeadStatus::Qualified,
                LeadStatus::Closed
            ]
        );
    }

    #[test]
    fn serde_uses_stored_text() {
        let json = serde_json::to_string(&PropertyStatus::Active).unwrap();
        assert_eq!(json, "\"Active\"");
        let back: LeadStatus = serde_json::from_str("\"Qualified\"").unwrap();
        assert_eq!(back, LeadStatus::Qualified);
    }
}
