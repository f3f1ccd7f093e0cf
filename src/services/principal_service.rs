use crate::dto::account_dto::RegisterPayload;
use crate::error::{is_unique_violation, Error, Result};
use crate::media::StoredMedia;
use crate::models::principal::{Principal, PrincipalKind};
use crate::utils::crypto;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Partial profile update for a hirer. `None` leaves the column as is.
#[derive(Debug, Default)]
pub struct HirerProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub device_token: Option<String>,
    pub profile_pic: Option<StoredMedia>,
}

impl HirerProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.age.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.device_token.is_none()
            && self.profile_pic.is_none()
    }
}

/// Partial profile update for a talent. `images`/`video` replace the
/// whole JSONB value when set.
#[derive(Debug, Default)]
pub struct TalentProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub body_type: Option<String>,
    pub skin_tone: Option<String>,
    pub language: Option<String>,
    pub skills: Option<String>,
    pub makeover_needed: Option<bool>,
    pub willing_to_work_as_extra: Option<bool>,
    pub about_yourself: Option<String>,
    pub device_token: Option<String>,
    pub images: Option<JsonValue>,
    pub video: Option<JsonValue>,
}

impl TalentProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.age.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.body_type.is_none()
            && self.skin_tone.is_none()
            && self.language.is_none()
            && self.skills.is_none()
            && self.makeover_needed.is_none()
            && self.willing_to_work_as_extra.is_none()
            && self.about_yourself.is_none()
            && self.device_token.is_none()
            && self.images.is_none()
            && self.video.is_none()
    }
}

#[derive(Clone)]
pub struct PrincipalService {
    pool: PgPool,
}

impl PrincipalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>> {
        let principal = sqlx::query_as::<_, Principal>("SELECT * FROM principals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(principal)
    }

    pub async fn find_by_email(
        &self,
        kind: PrincipalKind,
        email: &str,
    ) -> Result<Option<Principal>> {
        let principal = sqlx::query_as::<_, Principal>(
            "SELECT * FROM principals WHERE kind = $1 AND email = $2",
        )
        .bind(kind.as_str())
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(principal)
    }

    /// Create an account, or take over an existing unverified one for the
    /// same (kind, email). A single conditional upsert: the guard on
    /// `is_verified` makes a verified duplicate produce no row, which maps
    /// to `Conflict`. No separate existence check, so no create race.
    pub async fn register(
        &self,
        kind: PrincipalKind,
        payload: &RegisterPayload,
        otp: &str,
    ) -> Result<Principal> {
        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        let created = sqlx::query_as::<_, Principal>(
            r#"
            INSERT INTO principals (kind, name, email, phone, gender, role, password_hash, otp, is_verified, device_token)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, $9)
            ON CONFLICT (kind, email) DO UPDATE SET
                name = EXCLUDED.name,
                phone = EXCLUDED.phone,
                gender = EXCLUDED.gender,
                role = EXCLUDED.role,
                password_hash = EXCLUDED.password_hash,
                otp = EXCLUDED.otp,
                is_verified = FALSE,
                device_token = EXCLUDED.device_token,
                updated_at = NOW()
            WHERE principals.is_verified = FALSE
            RETURNING *
            "#,
        )
        .bind(kind.as_str())
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.gender)
        .bind(&payload.role)
        .bind(&password_hash)
        .bind(otp)
        .bind(&payload.device_token)
        .fetch_optional(&self.pool)
        .await?;

        created.ok_or_else(|| Error::Conflict("Email already registered".to_string()))
    }

    /// Consume the stored OTP. Single-use: success clears the field, so a
    /// replay of the same value fails the comparison against NULL.
    pub async fn verify_otp(
        &self,
        kind: PrincipalKind,
        id: Uuid,
        submitted: &str,
    ) -> Result<Principal> {
        let principal = self
            .find_by_id(id)
            .await?
            .filter(|p| p.kind() == kind)
            .ok_or_else(|| Error::NotFound(format!("{} not found", kind)))?;

        let stored = principal
            .otp
            .as_deref()
            .ok_or_else(|| Error::Unauthorized("Invalid OTP".to_string()))?;

        let matches = stored.len() == submitted.len()
            && bool::from(stored.as_bytes().ct_eq(submitted.as_bytes()));
        if !matches {
            return Err(Error::Unauthorized("Invalid OTP".to_string()));
        }

        let verified = sqlx::query_as::<_, Principal>(
            r#"
            UPDATE principals
            SET otp = NULL, is_verified = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(verified)
    }

    /// Store a fresh OTP for an unverified account.
    pub async fn refresh_otp(&self, kind: PrincipalKind, id: Uuid, otp: &str) -> Result<Principal> {
        let principal = self
            .find_by_id(id)
            .await?
            .filter(|p| p.kind() == kind)
            .ok_or_else(|| Error::NotFound(format!("{} not found", kind)))?;

        if principal.is_verified {
            return Err(Error::BadRequest(format!("{} is already verified", kind)));
        }

        let updated = sqlx::query_as::<_, Principal>(
            "UPDATE principals SET otp = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(otp)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn login(
        &self,
        kind: PrincipalKind,
        email: &str,
        password: &str,
        device_token: Option<&str>,
    ) -> Result<Principal> {
        let principal = self.find_by_email(kind, email).await?;
        let Some(principal) = principal else {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        };

        let password_ok = crypto::verify_password(password, &principal.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !password_ok {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }

        if !principal.is_verified {
            return Err(Error::Forbidden(
                "Please verify your OTP before logging in".to_string(),
            ));
        }

        if let Some(token) = device_token {
            let updated = sqlx::query_as::<_, Principal>(
                "UPDATE principals SET device_token = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
            )
            .bind(token)
            .bind(principal.id)
            .fetch_one(&self.pool)
            .await?;
            return Ok(updated);
        }

        Ok(principal)
    }

    /// Store a password-reset code with a 10-minute expiry.
    pub async fn set_reset_token(
        &self,
        kind: PrincipalKind,
        email: &str,
        token: &str,
    ) -> Result<Principal> {
        let updated = sqlx::query_as::<_, Principal>(
            r#"
            UPDATE principals
            SET reset_token = $1,
                reset_token_expires_at = NOW() + INTERVAL '10 minutes',
                updated_at = NOW()
            WHERE kind = $2 AND email = $3
            RETURNING *
            "#,
        )
        .bind(token)
        .bind(kind.as_str())
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    /// Consume a reset token: the expiry guard lives in the query, and a
    /// successful update clears both reset columns.
    pub async fn reset_password(
        &self,
        kind: PrincipalKind,
        token: &str,
        new_password: &str,
    ) -> Result<Principal> {
        let password_hash = crypto::hash_password(new_password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        let updated = sqlx::query_as::<_, Principal>(
            r#"
            UPDATE principals
            SET password_hash = $1,
                reset_token = NULL,
                reset_token_expires_at = NULL,
                updated_at = NOW()
            WHERE kind = $2 AND reset_token = $3 AND reset_token_expires_at > NOW()
            RETURNING *
            "#,
        )
        .bind(&password_hash)
        .bind(kind.as_str())
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| Error::BadRequest("Invalid or expired reset token".to_string()))
    }

    pub async fn update_hirer_profile(
        &self,
        id: Uuid,
        update: HirerProfileUpdate,
    ) -> Result<Principal> {
        let (pic_url, pic_id) = match update.profile_pic {
            Some(media) => (Some(media.url), Some(media.id)),
            None => (None, None),
        };

        let updated = sqlx::query_as::<_, Principal>(
            r#"
            UPDATE principals
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                age = COALESCE($5, age),
                country = COALESCE($6, country),
                city = COALESCE($7, city),
                device_token = COALESCE($8, device_token),
                profile_pic_url = COALESCE($9, profile_pic_url),
                profile_pic_id = COALESCE($10, profile_pic_id),
                updated_at = NOW()
            WHERE id = $1 AND kind = 'Hirer'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.email)
        .bind(update.phone)
        .bind(update.age)
        .bind(update.country)
        .bind(update.city)
        .bind(update.device_token)
        .bind(pic_url)
        .bind(pic_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::map_email_conflict)?;

        updated.ok_or_else(|| Error::NotFound("Hirer not found".to_string()))
    }

    pub async fn update_talent_profile(
        &self,
        id: Uuid,
        update: TalentProfileUpdate,
    ) -> Result<Principal> {
        let updated = sqlx::query_as::<_, Principal>(
            r#"
            UPDATE principals
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                age = COALESCE($5, age),
                height = COALESCE($6, height),
                weight = COALESCE($7, weight),
                body_type = COALESCE($8, body_type),
                skin_tone = COALESCE($9, skin_tone),
                language = COALESCE($10, language),
                skills = COALESCE($11, skills),
                makeover_needed = COALESCE($12, makeover_needed),
                willing_to_work_as_extra = COALESCE($13, willing_to_work_as_extra),
                about_yourself = COALESCE($14, about_yourself),
                device_token = COALESCE($15, device_token),
                images = COALESCE($16, images),
                video = COALESCE($17, video),
                updated_at = NOW()
            WHERE id = $1 AND kind = 'Talent'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.email)
        .bind(update.phone)
        .bind(update.age)
        .bind(update.height)
        .bind(update.weight)
        .bind(update.body_type)
        .bind(update.skin_tone)
        .bind(update.language)
        .bind(update.skills)
        .bind(update.makeover_needed)
        .bind(update.willing_to_work_as_extra)
        .bind(update.about_yourself)
        .bind(update.device_token)
        .bind(update.images)
        .bind(update.video)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::map_email_conflict)?;

        updated.ok_or_else(|| Error::NotFound("Talent not found".to_string()))
    }

    /// Talents whose profile passes the completeness filter: every display
    /// field, all three pose images, the video and the bio present.
    pub async fn all_complete_talents(&self) -> Result<Vec<Principal>> {
        let talents = sqlx::query_as::<_, Principal>(
            r#"
            SELECT * FROM principals
            WHERE kind = 'Talent'
              AND name <> ''
              AND role <> ''
              AND gender <> ''
              AND age IS NOT NULL
              AND COALESCE(height, '') <> ''
              AND COALESCE(weight, '') <> ''
              AND COALESCE(body_type, '') <> ''
              AND COALESCE(skin_tone, '') <> ''
              AND COALESCE(language, '') <> ''
              AND COALESCE(skills, '') <> ''
              AND COALESCE(images->'front'->>'url', '') <> ''
              AND COALESCE(images->'left'->>'url', '') <> ''
              AND COALESCE(images->'right'->>'url', '') <> ''
              AND COALESCE(video->>'url', '') <> ''
              AND COALESCE(about_yourself, '') <> ''
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(talents)
    }

    /// Talent ids connected to this hirer by an Accepted request.
    pub async fn connected_talent_ids(&self, hirer_id: Uuid) -> Result<Vec<Uuid>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT talent_id FROM hiring_requests WHERE hirer_id = $1 AND status = 'Accepted'",
        )
        .bind(hirer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    fn map_email_conflict(err: sqlx::Error) -> Error {
        if is_unique_violation(&err) {
            Error::Conflict("Email already in use".to_string())
        } else {
            err.into()
        }
    }
}
