//! Lead repository
//!
//! Reads and writes other than `create` are scoped by `agent_id`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use luxehome_core::models::{LeadInput, LeadStatus};

use super::DbError;

const COLUMNS: &str =
    "id, name, email, phone, message, status, score, property_id, agent_id, created_at";

/// Lead record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: String,
    pub score: Option<i32>,
    pub property_id: Option<Uuid>,
    pub agent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Pipeline totals for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct LeadCounts {
    pub total: i64,
    #[sqlx(rename = "new_leads")]
    pub new: i64,
}

/// Lead repository
pub struct LeadRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LeadRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a scored lead with status `New`.
    pub async fn create(&self, input: &LeadInput, score: i32) -> Result<Lead, DbError> {
        let lead = sqlx::query_as::<_, Lead>(&format!(
            r#"
            INSERT INTO leads (name, email, phone, message, status, score, property_id, agent_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.message)
        .bind(LeadStatus::New.as_str())
        .bind(score)
        .bind(input.property_id)
        .bind(input.agent_id)
        .fetch_one(self.pool)
        .await?;
        Ok(lead)
    }

    /// The agent's leads, newest first.
    pub async fn list_for_agent(&self, agent: Uuid) -> Result<Vec<Lead>, DbError> {
        let leads = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {COLUMNS} FROM leads WHERE agent_id = $1 ORDER BY created_at DESC"
        ))
        .bind(agent)
        .fetch_all(self.pool)
        .await?;
        Ok(leads)
    }

    /// Move a lead to `status`. Returns false when no lead of this agent matched.
    pub async fn update_status(
        &self,
        agent: Uuid,
        id: Uuid,
        status: LeadStatus,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE leads SET status = $3 WHERE id = $1 AND agent_id = $2")
            .bind(id)
            .bind(agent)
            .bind(status.as_str())
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one of the agent's leads.
    pub async fn delete(&self, agent: Uuid, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND agent_id = $2")
            .bind(id)
            .bind(agent)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "lead",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// All and `New` leads for the agent, in one pass.
    pub async fn counts(&self, agent: Uuid) -> Result<LeadCounts, DbError> {
        let counts = sqlx::query_as::<_, LeadCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = $2) AS new_leads
            FROM leads
            WHERE agent_id = $1
            "#,
        )
        .bind(agent)
        .bind(LeadStatus::New.as_str())
        .fetch_one(self.pool)
        .await?;
        Ok(counts)
    }
}
