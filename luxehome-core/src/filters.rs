//! Listing filters → query predicates
//!
//! The listings page sends UI filter state; this module turns it into a
//! flat list of predicates over the `properties` table plus sort order and
//! row range. The mapping is pure so it can be asserted without a database.
//! `luxehome-server` renders the predicates to SQL.

use serde::Deserialize;
use serde_json::{Map, Value as Json};
use uuid::Uuid;

use crate::amenities;
use crate::models::{ListingType, PropertyStatus, PropertyType, ValidationError};

/// Largest page a single request may ask for
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filter value meaning "no status filter" (admin views)
pub const ALL_STATUSES: &str = "All";

/// Filterable columns of `properties`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Status,
    Price,
    Beds,
    Baths,
    Type,
    ListingType,
    Address,
    Title,
    Amenities,
    UserId,
    CreatedAt,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Price => "price",
            Self::Beds => "beds",
            Self::Baths => "baths",
            Self::Type => "type",
            Self::ListingType => "listing_type",
            Self::Address => "address",
            Self::Title => "title",
            Self::Amenities => "amenities",
            Self::UserId => "user_id",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Bound value of a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Float(f64),
    Int(i32),
    Uuid(Uuid),
}

/// One WHERE clause term; all terms are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(Column, Value),
    Gte(Column, Value),
    Lte(Column, Value),
    /// `col = v OR col IS NULL`
    EqOrNull(Column, Value),
    /// `a ILIKE p OR b ILIKE p ...`
    ILikeAny { columns: Vec<Column>, pattern: String },
    /// jsonb containment, `col @> v`
    Contains(Column, Json),
}

/// Result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOrder {
    /// Parse the sort dropdown text. Unknown text sorts newest first.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Price: Low to High" | "price_asc" => Self::PriceLowToHigh,
            "Price: High to Low" | "price_desc" => Self::PriceHighToLow,
            _ => Self::Newest,
        }
    }

    pub fn column(&self) -> Column {
        match self {
            Self::Newest => Column::CreatedAt,
            Self::PriceLowToHigh | Self::PriceHighToLow => Column::Price,
        }
    }

    pub fn ascending(&self) -> bool {
        matches!(self, Self::PriceLowToHigh)
    }
}

/// Inclusive row window, `from..=to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

impl RowRange {
    /// Window for `limit` rows starting at `offset`; limit clamped to 1..=100.
    pub fn new(offset: u32, limit: u32) -> Self {
        let limit = limit.clamp(1, MAX_PAGE_SIZE) as u64;
        let from = offset as u64;
        Self {
            from,
            to: from + limit - 1,
        }
    }

    pub fn offset(&self) -> u64 {
        self.from
    }

    pub fn limit(&self) -> u64 {
        self.to - self.from + 1
    }
}

/// Predicates, order and window for one listings query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub predicates: Vec<Predicate>,
    pub sort: SortOrder,
    pub range: Option<RowRange>,
}

impl ListingQuery {
    /// Everything one agent owns, any status, newest first.
    pub fn owned_by(agent: Uuid) -> Self {
        Self::default().with_owner(agent)
    }

    /// Add an owner restriction to an existing query.
    pub fn with_owner(mut self, agent: Uuid) -> Self {
        self.predicates
            .push(Predicate::Eq(Column::UserId, Value::Uuid(agent)));
        self
    }
}

/// Listing filter state as sent by the listings page.
///
/// Query-string friendly: `beds`/`baths` accept a number or `Any`,
/// `amenities` is comma separated (keys or labels).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFilters {
    #[serde(alias = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(alias = "maxPrice")]
    pub max_price: Option<f64>,
    pub beds: Option<String>,
    pub baths: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub search: Option<String>,
    pub amenities: Option<String>,
    pub sort: Option<String>,
    #[serde(alias = "listingType")]
    pub listing_type: Option<String>,
    pub status: Option<String>,
}

fn blank_or(value: &Option<String>, any: &str) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(any))
        .map(str::to_owned)
}

/// Stored spelling of a known value; anything else is matched verbatim
/// and simply finds no rows.
fn canonical_or_raw<F>(raw: &str, parse: F) -> String
where
    F: Fn(&str) -> Result<&'static str, ValidationError>,
{
    parse(raw).map(str::to_owned).unwrap_or_else(|_| raw.to_string())
}

fn min_rooms(value: &Option<String>, field: &'static str) -> Result<Option<i32>, ValidationError> {
    match blank_or(value, "Any") {
        None => Ok(None),
        Some(raw) => {
            let raw = raw.trim_end_matches('+');
            raw.parse::<i32>()
                .map(|n| Some(n).filter(|n| *n > 0))
                .map_err(|_| ValidationError::InvalidFormat {
                    field,
                    reason: "must be a number or 'Any'",
                })
        }
    }
}

/// Escape LIKE metacharacters and wrap in `%...%`.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl PropertyFilters {
    /// Requested amenities as catalogue keys.
    ///
    /// Labels ("Ocean View") and keys ("oceanView") both resolve; unknown
    /// names are kept lowercased and simply match nothing.
    pub fn amenity_keys(&self) -> Vec<String> {
        self.amenities
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(|a| match amenities::resolve(a) {
                Some(key) => key.to_string(),
                None => a.to_lowercase(),
            })
            .collect()
    }

    /// Build the query.
    ///
    /// Status defaults to `Active` (public listings); `All` drops the
    /// status predicate. `Sale` also matches legacy rows whose listing
    /// type is NULL, `Rent` does not.
    pub fn to_query(&self) -> Result<ListingQuery, ValidationError> {
        let mut predicates = Vec::new();

        match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => predicates.push(Predicate::Eq(
                Column::Status,
                Value::Text(PropertyStatus::Active.as_str().into()),
            )),
            Some(s) if s.eq_ignore_ascii_case(ALL_STATUSES) => {}
            Some(s) => {
                let status = canonical_or_raw(s, |v| v.parse::<PropertyStatus>().map(|k| k.as_str()));
                predicates.push(Predicate::Eq(Column::Status, Value::Text(status)));
            }
        }

        if let Some(min) = self.min_price.filter(|p| *p > 0.0) {
            predicates.push(Predicate::Gte(Column::Price, Value::Float(min)));
        }
        if let Some(max) = self.max_price.filter(|p| *p > 0.0) {
            predicates.push(Predicate::Lte(Column::Price, Value::Float(max)));
        }
        if let Some(beds) = min_rooms(&self.beds, "beds")? {
            predicates.push(Predicate::Gte(Column::Beds, Value::Int(beds)));
        }
        if let Some(baths) = min_rooms(&self.baths, "baths")? {
            predicates.push(Predicate::Gte(Column::Baths, Value::Int(baths)));
        }
        if let Some(kind) = blank_or(&self.property_type, "All") {
            let kind = canonical_or_raw(&kind, |v| v.parse::<PropertyType>().map(|k| k.as_str()));
            predicates.push(Predicate::Eq(Column::Type, Value::Text(kind)));
        }

        if let Some(term) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            predicates.push(Predicate::ILikeAny {
                columns: vec![Column::Address, Column::Title],
                pattern: contains_pattern(term),
            });
        }

        if let Some(kind) = blank_or(&self.listing_type, "All") {
            let kind: ListingType = kind.parse()?;
            let value = Value::Text(kind.as_str().into());
            predicates.push(match kind {
                ListingType::Sale => Predicate::EqOrNull(Column::ListingType, value),
                ListingType::Rent => Predicate::Eq(Column::ListingType, value),
            });
        }

        let keys = self.amenity_keys();
        if !keys.is_empty() {
            let object: Map<String, Json> =
                keys.into_iter().map(|k| (k, Json::Bool(true))).collect();
            predicates.push(Predicate::Contains(Column::Amenities, Json::Object(object)));
        }

        let range = self
            .limit
            .filter(|limit| *limit > 0)
            .map(|limit| RowRange::new(self.offset.unwrap_or(0), limit));
        let sort = self.sort.as_deref().map(SortOrder::parse).unwrap_or_default();

        Ok(ListingQuery {
            predicates,
            sort,
            range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn active() -> Predicate {
        Predicate::Eq(Column::Status, Value::Text("Active".into()))
    }

    #[test]
    fn no_filters_means_active_newest() {
        let query = PropertyFilters::default().to_query().unwrap();
        assert_eq!(query.predicates, vec![active()]);
        assert_eq!(query.sort, SortOrder::Newest);
        assert_eq!(query.range, None);
    }

    #[test]
    fn status_all_drops_status_predicate() {
        let filters = PropertyFilters {
            status: Some("All".into()),
            ..Default::default()
        };
        assert!(filters.to_query().unwrap().predicates.is_empty());

        let filters = PropertyFilters {
            status: Some("Draft".into()),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query().unwrap().predicates,
            vec![Predicate::Eq(Column::Status, Value::Text("Draft".into()))]
        );
    }

    #[test]
    fn sale_includes_legacy_nulls_rent_does_not() {
        let sale = PropertyFilters {
            listing_type: Some("Sale".into()),
            ..Default::default()
        };
        assert_eq!(
            sale.to_query().unwrap().predicates[1],
            Predicate::EqOrNull(Column::ListingType, Value::Text("Sale".into()))
        );

        let rent = PropertyFilters {
            listing_type: Some("Rent".into()),
            ..Default::default()
        };
        let predicates = rent.to_query().unwrap().predicates;
        assert_eq!(
            predicates[1],
            Predicate::Eq(Column::ListingType, Value::Text("Rent".into()))
        );
        assert!(!predicates
            .iter()
            .any(|p| matches!(p, Predicate::EqOrNull(..))));
    }

    #[test]
    fn any_and_all_are_ignored() {
        let filters = PropertyFilters {
            beds: Some("Any".into()),
            baths: Some("Any".into()),
            property_type: Some("All".into()),
            min_price: Some(0.0),
            ..Default::default()
        };
        assert_eq!(filters.to_query().unwrap().predicates, vec![active()]);
    }

    #[test]
    fn full_filter_set_in_order() {
        let filters = PropertyFilters {
            min_price: Some(1_000_000.0),
            max_price: Some(5_000_000.0),
            beds: Some("3".into()),
            baths: Some("2+".into()),
            property_type: Some("Villa".into()),
            search: Some("Aspen".into()),
            amenities: Some("Ocean View, pool".into()),
            ..Default::default()
        };
        let query = filters.to_query().unwrap();
        assert_eq!(
            query.predicates,
            vec![
                active(),
                Predicate::Gte(Column::Price, Value::Float(1_000_000.0)),
                Predicate::Lte(Column::Price, Value::Float(5_000_000.0)),
                Predicate::Gte(Column::Beds, Value::Int(3)),
                Predicate::Gte(Column::Baths, Value::Int(2)),
                Predicate::Eq(Column::Type, Value::Text("Villa".into())),
                Predicate::ILikeAny {
                    columns: vec![Column::Address, Column::Title],
                    pattern: "%Aspen%".into(),
                },
                Predicate::Contains(Column::Amenities, json!({"oceanView": true, "pool": true})),
            ]
        );
    }

    #[test]
    fn search_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("100%_off\\"), "%100\\%\\_off\\\\%");
    }

    #[test]
    fn range_from_limit_and_offset() {
        let filters = PropertyFilters {
            limit: Some(9),
            offset: Some(18),
            ..Default::default()
        };
        let range = filters.to_query().unwrap().range.unwrap();
        assert_eq!(range, RowRange { from: 18, to: 26 });
        assert_eq!(range.limit(), 9);

        assert_eq!(RowRange::new(0, 0).limit(), 1);
        assert_eq!(RowRange::new(0, 5_000).limit(), 100);
    }

    #[test]
    fn sort_labels() {
        assert_eq!(SortOrder::parse("Price: Low to High"), SortOrder::PriceLowToHigh);
        assert!(SortOrder::PriceLowToHigh.ascending());
        assert_eq!(SortOrder::parse("Price: High to Low").column(), Column::Price);
        assert!(!SortOrder::parse("Price: High to Low").ascending());
        assert_eq!(SortOrder::parse("Newest First"), SortOrder::Newest);
        assert_eq!(SortOrder::parse("whatever"), SortOrder::Newest);
    }

    #[test]
    fn unlisted_type_and_status_match_verbatim() {
        let filters = PropertyFilters {
            property_type: Some("Townhome".into()),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query().unwrap().predicates,
            vec![active(), Predicate::Eq(Column::Type, Value::Text("Townhome".into()))]
        );

        let filters = PropertyFilters {
            property_type: Some("villa".into()),
            status: Some("Pending".into()),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query().unwrap().predicates,
            vec![
                Predicate::Eq(Column::Status, Value::Text("Pending".into())),
                Predicate::Eq(Column::Type, Value::Text("Villa".into())),
            ]
        );
    }

    #[test]
    fn rejects_unreadable_room_count() {
        let filters = PropertyFilters {
            beds: Some("lots".into()),
            ..Default::default()
        };
        assert!(filters.to_query().is_err());
    }

    #[test]
    fn zero_limit_means_no_range() {
        let filters = PropertyFilters {
            limit: Some(0),
            offset: Some(9),
            ..Default::default()
        };
        assert_eq!(filters.to_query().unwrap().range, None);
    }

    #[test]
    fn owner_scoping() {
        let agent = Uuid::new_v4();
        let query = ListingQuery::owned_by(agent);
        assert_eq!(
            query.predicates,
            vec![Predicate::Eq(Column::UserId, Value::Uuid(agent))]
        );
        let scoped = PropertyFilters::default().to_query().unwrap().with_owner(agent);
        assert_eq!(scoped.predicates.len(), 2);
    }
}
