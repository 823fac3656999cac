//! Agent profile repository

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use luxehome_core::models::ProfileInput;

use super::DbError;

const COLUMNS: &str = "id, full_name, job_title, email, phone, bio, avatar_url, updated_at";

/// Profile record; `id` is the auth user id
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Placeholder for a user who has not saved a profile yet.
    pub fn blank(id: Uuid, email: Option<String>) -> Self {
        Self {
            id,
            email,
            ..Self::default()
        }
    }
}

/// Profile repository
pub struct ProfileRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Profile>, DbError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(profile)
    }

    /// First profile with exactly this display name.
    pub async fn find_by_name(&self, full_name: &str) -> Result<Option<Profile>, DbError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {COLUMNS} FROM profiles WHERE full_name = $1 ORDER BY id LIMIT 1"
        ))
        .bind(full_name)
        .fetch_optional(self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn get(&self, id: Uuid) -> Result<Profile, DbError> {
        self.find(id).await?.ok_or_else(|| DbError::NotFound {
            resource: "profile",
            id: id.to_string(),
        })
    }

    /// Insert or replace the user's profile, stamping `updated_at`.
    pub async fn upsert(&self, id: Uuid, input: &ProfileInput) -> Result<Profile, DbError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (id, full_name, job_title, email, phone, bio, avatar_url, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                job_title = EXCLUDED.job_title,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                bio = EXCLUDED.bio,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = EXCLUDED.updated_at
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.full_name)
        .bind(&input.job_title)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.bio)
        .bind(&input.avatar_url)
        .fetch_one(self.pool)
        .await?;
        Ok(profile)
    }
}
