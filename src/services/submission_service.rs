use crate::error::{Error, Result};
use crate::models::submission::Submission;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Submission enriched with the owner's display fields. The profile pic
/// coalesces the hirer column with the talent image slot, since either
/// kind may own a submission.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub principal_id: Uuid,
    pub subject: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub owner_name: Option<String>,
    pub owner_profile_pic: Option<String>,
    pub owner_role: Option<String>,
}

const ROW_SELECT: &str = r#"
    SELECT s.id, s.principal_id, s.subject, s.description, s.created_at,
           p.name AS owner_name,
           COALESCE(p.profile_pic_url, p.images->'profilePic'->>'url') AS owner_profile_pic,
           p.role AS owner_role
    FROM submissions s
    LEFT JOIN principals p ON p.id = s.principal_id
"#;

#[derive(Clone)]
pub struct SubmissionService {
    pool: PgPool,
}

impl SubmissionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        principal_id: Uuid,
        subject: &str,
        description: &str,
    ) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (principal_id, subject, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(principal_id)
        .bind(subject)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(submission)
    }

    pub async fn list_all(&self) -> Result<Vec<SubmissionRow>> {
        let sql = format!("{} ORDER BY s.created_at DESC", ROW_SELECT);
        let rows = sqlx::query_as::<_, SubmissionRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        if rows.is_empty() {
            return Err(Error::NotFound("No submissions found".to_string()));
        }
        Ok(rows)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SubmissionRow>> {
        let sql = format!(
            "{} WHERE s.principal_id = $1 ORDER BY s.created_at DESC",
            ROW_SELECT
        );
        let rows = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        if rows.is_empty() {
            return Err(Error::NotFound(
                "No submissions found for this hirer".to_string(),
            ));
        }
        Ok(rows)
    }

    pub async fn update(
        &self,
        id: Uuid,
        actor_id: Uuid,
        actor_is_admin: bool,
        subject: Option<&str>,
        description: Option<&str>,
    ) -> Result<Submission> {
        self.require_owner(id, actor_id, actor_is_admin).await?;

        let updated = sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET subject = COALESCE($2, subject),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(subject)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid, actor_id: Uuid, actor_is_admin: bool) -> Result<()> {
        self.require_owner(id, actor_id, actor_is_admin).await?;

        sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// A missing record is 404; a record owned by someone else is 403.
    /// Admin actors bypass the ownership check.
    async fn require_owner(
        &self,
        id: Uuid,
        actor_id: Uuid,
        actor_is_admin: bool,
    ) -> Result<Submission> {
        let submission =
            sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::NotFound("Submission not found".to_string()))?;

        if submission.principal_id != actor_id && !actor_is_admin {
            return Err(Error::Forbidden(
                "Not authorized to modify this submission".to_string(),
            ));
        }
        Ok(submission)
    }
}
