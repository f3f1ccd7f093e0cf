use crate::error::{Error, Result};
use crate::models::hiring_request::{HiringRequest, RequestStatus};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Request row enriched with the hirer's public display fields, for the
/// talent-side listing. Joined fields are nullable: a missing principal
/// falls back to literals at the view layer.
#[derive(Debug, Clone, FromRow)]
pub struct TalentRequestRow {
    pub id: Uuid,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub hirer_id: Uuid,
    pub hirer_name: Option<String>,
    pub hirer_profile_pic: Option<String>,
    pub hirer_role: Option<String>,
}

/// Request row enriched both sides, for the hirer-side listing.
#[derive(Debug, Clone, FromRow)]
pub struct HirerRequestRow {
    pub id: Uuid,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub hirer_id: Uuid,
    pub hirer_name: Option<String>,
    pub hirer_profile_pic: Option<String>,
    pub hirer_role: Option<String>,
    pub talent_id: Uuid,
    pub talent_name: Option<String>,
    pub talent_profile_pic: Option<String>,
    pub talent_role: Option<String>,
}

#[derive(Clone)]
pub struct HiringService {
    pool: PgPool,
}

impl HiringService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a Pending request from a hirer to a talent. The pair
    /// uniqueness lives in the unique index: the conditional insert
    /// returns no row on conflict, which maps to 409. No check-then-act.
    pub async fn send_request(
        &self,
        hirer_id: Uuid,
        talent_id: Uuid,
        message: Option<String>,
    ) -> Result<HiringRequest> {
        let talent_exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM principals WHERE id = $1 AND kind = 'Talent'")
                .bind(talent_id)
                .fetch_optional(&self.pool)
                .await?;
        if talent_exists.is_none() {
            return Err(Error::NotFound("Talent not found".to_string()));
        }

        let created = sqlx::query_as::<_, HiringRequest>(
            r#"
            INSERT INTO hiring_requests (hirer_id, talent_id, message)
            VALUES ($1, $2, $3)
            ON CONFLICT (hirer_id, talent_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(hirer_id)
        .bind(talent_id)
        .bind(message)
        .fetch_optional(&self.pool)
        .await?;

        created.ok_or_else(|| {
            Error::Conflict("You have already sent a request to this talent".to_string())
        })
    }

    pub async fn requests_for_talent(&self, talent_id: Uuid) -> Result<Vec<TalentRequestRow>> {
        let rows = sqlx::query_as::<_, TalentRequestRow>(
            r#"
            SELECT hr.id, hr.message, hr.status, hr.created_at,
                   hr.hirer_id,
                   h.name AS hirer_name,
                   h.profile_pic_url AS hirer_profile_pic,
                   h.role AS hirer_role
            FROM hiring_requests hr
            LEFT JOIN principals h ON h.id = hr.hirer_id
            WHERE hr.talent_id = $1
            ORDER BY hr.created_at DESC
            "#,
        )
        .bind(talent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn requests_for_hirer(&self, hirer_id: Uuid) -> Result<Vec<HirerRequestRow>> {
        let rows = sqlx::query_as::<_, HirerRequestRow>(
            r#"
            SELECT hr.id, hr.message, hr.status, hr.created_at,
                   hr.hirer_id,
                   h.name AS hirer_name,
                   h.profile_pic_url AS hirer_profile_pic,
                   h.role AS hirer_role,
                   hr.talent_id,
                   t.name AS talent_name,
                   t.images->'profilePic'->>'url' AS talent_profile_pic,
                   t.role AS talent_role
            FROM hiring_requests hr
            LEFT JOIN principals h ON h.id = hr.hirer_id
            LEFT JOIN principals t ON t.id = hr.talent_id
            WHERE hr.hirer_id = $1
            ORDER BY hr.created_at DESC
            "#,
        )
        .bind(hirer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Apply a talent's decision. Accepting updates the row in place and
    /// returns it; rejecting deletes the row and returns None. Only the
    /// talent named on the request may call either.
    pub async fn update_status(
        &self,
        actor_talent_id: Uuid,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<Option<HiringRequest>> {
        let request =
            sqlx::query_as::<_, HiringRequest>("SELECT * FROM hiring_requests WHERE id = $1")
                .bind(request_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound("Request not found".to_string()))?;

        if request.talent_id != actor_talent_id {
            return Err(Error::Forbidden(
                "Only the talent can accept or reject this request".to_string(),
            ));
        }

        match status {
            RequestStatus::Accepted => {
                let updated = sqlx::query_as::<_, HiringRequest>(
                    r#"
                    UPDATE hiring_requests
                    SET status = 'Accepted', updated_at = NOW()
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(request_id)
                .fetch_one(&self.pool)
                .await?;
                Ok(Some(updated))
            }
            RequestStatus::Rejected => {
                sqlx::query("DELETE FROM hiring_requests WHERE id = $1")
                    .bind(request_id)
                    .execute(&self.pool)
                    .await?;
                Ok(None)
            }
            RequestStatus::Pending => Err(Error::BadRequest("Invalid status".to_string())),
        }
    }
}
