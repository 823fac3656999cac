//! Property repository
//!
//! - list: predicates from `ListingQuery` rendered with `QueryBuilder`,
//!   exact total via `COUNT(*) OVER()`
//! - create/update/delete: scoped by `user_id`

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use luxehome_core::filters::{ListingQuery, Predicate, SortOrder, Value};
use luxehome_core::models::{PropertyInput, PropertyStatus};

use super::DbError;

const COLUMNS: &str = "id, title, description, price, address, beds, baths, sqft, image, \
                       status, type, listing_type, amenities, created_at, user_id";

/// Property record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub address: Option<String>,
    pub beds: Option<i32>,
    pub baths: Option<i32>,
    pub sqft: Option<i32>,
    /// JSON array string of gallery URLs
    pub image: Option<String>,
    pub status: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub amenities: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<Uuid>,
}

#[derive(FromRow)]
struct CountedRow {
    #[sqlx(flatten)]
    property: Property,
    total: i64,
}

/// One page of listings and the match count before paging
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyPage {
    pub data: Vec<Property>,
    pub count: i64,
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &Value) {
    match value {
        Value::Text(s) => builder.push_bind(s.clone()),
        Value::Float(f) => builder.push_bind(*f),
        Value::Int(i) => builder.push_bind(*i),
        Value::Uuid(u) => builder.push_bind(*u),
    };
}

/// Append `WHERE a AND b ...` for the predicates; nothing when empty.
pub(crate) fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            Predicate::Eq(col, value) => {
                builder.push(col.as_str()).push(" = ");
                push_value(builder, value);
            }
            Predicate::Gte(col, value) => {
                builder.push(col.as_str()).push(" >= ");
                push_value(builder, value);
            }
            Predicate::Lte(col, value) => {
                builder.push(col.as_str()).push(" <= ");
                push_value(builder, value);
            }
            Predicate::EqOrNull(col, value) => {
                builder.push("(").push(col.as_str()).push(" = ");
                push_value(builder, value);
                builder.push(" OR ").push(col.as_str()).push(" IS NULL)");
            }
            Predicate::ILikeAny { columns, pattern } => {
                builder.push("(");
                for (j, col) in columns.iter().enumerate() {
                    if j > 0 {
                        builder.push(" OR ");
                    }
                    builder
                        .push(col.as_str())
                        .push(" ILIKE ")
                        .push_bind(pattern.clone());
                }
                builder.push(")");
            }
            Predicate::Contains(col, json) => {
                builder
                    .push(col.as_str())
                    .push(" @> ")
                    .push_bind(Json(json.clone()));
            }
        }
    }
}

pub(crate) fn push_order(builder: &mut QueryBuilder<'_, Postgres>, sort: SortOrder) {
    builder
        .push(" ORDER BY ")
        .push(sort.column().as_str())
        .push(if sort.ascending() { " ASC" } else { " DESC" })
        .push(", id");
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Listings matching the query, with the exact count before paging.
    pub async fn list(&self, query: &ListingQuery) -> Result<PropertyPage, DbError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {COLUMNS}, COUNT(*) OVER() AS total FROM properties"
        ));
        push_filters(&mut builder, &query.predicates);
        push_order(&mut builder, query.sort);
        if let Some(range) = query.range {
            builder.push(" LIMIT ").push_bind(range.limit() as i64);
            builder.push(" OFFSET ").push_bind(range.offset() as i64);
        }

        let rows: Vec<CountedRow> = builder.build_query_as().fetch_all(self.pool).await?;

        let count = match rows.first() {
            Some(row) => row.total,
            // Window count is empty past the last page
            None if query.range.is_some_and(|r| r.offset() > 0) => {
                self.count(&query.predicates).await?
            }
            None => 0,
        };

        Ok(PropertyPage {
            data: rows.into_iter().map(|r| r.property).collect(),
            count,
        })
    }

    /// Rows matching the predicates.
    pub async fn count(&self, predicates: &[Predicate]) -> Result<i64, DbError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM properties");
        push_filters(&mut builder, predicates);
        let (count,): (i64,) = builder.build_query_as().fetch_one(self.pool).await?;
        Ok(count)
    }

    /// Get a single property by id.
    pub async fn get(&self, id: Uuid) -> Result<Property, DbError> {
        sqlx::query_as::<_, Property>(&format!("SELECT {COLUMNS} FROM properties WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "property",
                id: id.to_string(),
            })
    }

    /// Newest active listings other than `exclude`.
    pub async fn similar(&self, exclude: Uuid, limit: i64) -> Result<Vec<Property>, DbError> {
        let rows = sqlx::query_as::<_, Property>(&format!(
            "SELECT {COLUMNS} FROM properties \
             WHERE status = $1 AND id <> $2 \
             ORDER BY created_at DESC, id LIMIT $3"
        ))
        .bind(PropertyStatus::Active.as_str())
        .bind(exclude)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a property owned by `agent`.
    pub async fn create(
        &self,
        agent: Uuid,
        input: &PropertyInput,
        image: &str,
    ) -> Result<Property, DbError> {
        let row = sqlx::query_as::<_, Property>(&format!(
            r#"
            INSERT INTO properties
                (title, description, price, address, beds, baths, sqft, image,
                 status, type, listing_type, amenities, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.address)
        .bind(input.beds)
        .bind(input.baths)
        .bind(input.sqft)
        .bind(image)
        .bind(input.status.as_str())
        .bind(input.property_type.as_str())
        .bind(input.listing_type.as_str())
        .bind(Json(&input.amenities))
        .bind(agent)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// Update a property owned by `agent`.
    ///
    /// `image` replaces the gallery when set; otherwise the stored one stays.
    pub async fn update(
        &self,
        agent: Uuid,
        id: Uuid,
        input: &PropertyInput,
        image: Option<&str>,
    ) -> Result<Property, DbError> {
        sqlx::query_as::<_, Property>(&format!(
            r#"
            UPDATE properties SET
                title = $3, description = $4, price = $5, address = $6,
                beds = $7, baths = $8, sqft = $9,
                image = COALESCE($10, image),
                status = $11, type = $12, listing_type = $13, amenities = $14
            WHERE id = $1 AND user_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(agent)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.address)
        .bind(input.beds)
        .bind(input.baths)
        .bind(input.sqft)
        .bind(image)
        .bind(input.status.as_str())
        .bind(input.property_type.as_str())
        .bind(input.listing_type.as_str())
        .bind(Json(&input.amenities))
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "property",
            id: id.to_string(),
        })
    }

    /// Delete a property owned by `agent`.
    pub async fn delete(&self, agent: Uuid, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(agent)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "property",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Active listings owned by `agent`.
    pub async fn count_active(&self, agent: Uuid) -> Result<i64, DbError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM properties WHERE user_id = $1 AND status = $2")
                .bind(agent)
                .bind(PropertyStatus::Active.as_str())
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }

    /// Every property's id, gallery and amenities, for the sanitize pass.
    pub async fn raw_media(&self) -> Result<Vec<(Uuid, Option<String>, Option<serde_json::Value>)>, DbError> {
        let rows = sqlx::query_as("SELECT id, image, amenities FROM properties ORDER BY created_at")
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Overwrite gallery and amenities without touching anything else.
    pub async fn write_media(
        &self,
        id: Uuid,
        image: &str,
        amenities: &luxehome_core::Amenities,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE properties SET image = $2, amenities = $3 WHERE id = $1")
            .bind(id)
            .bind(image)
            .bind(Json(amenities))
            .execute(self.pool)
            .await?;
        Ok(())
    }
}
