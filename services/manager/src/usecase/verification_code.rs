use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use tracing::{debug, info};

use cla_domain::purpose::Purpose;

use crate::domain::repository::VerificationCodeRepository;
use crate::domain::types::{VERIFICATION_CODE_LEN, VerificationCode};
use crate::error::ManagerServiceError;

/// Digits only, so codes are easy to type from an email.
const CHARSET: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..VERIFICATION_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── CreateVerificationCode ───────────────────────────────────────────────────

pub struct CreateVerificationCodeInput {
    pub recipient: String,
    pub purpose: Purpose,
    pub ttl: Duration,
}

pub struct CreateVerificationCodeUseCase<C: VerificationCodeRepository> {
    pub codes: C,
}

impl<C: VerificationCodeRepository> CreateVerificationCodeUseCase<C> {
    /// Issues a fresh code, invalidating any earlier code for the same
    /// recipient and purpose. The caller delivers it.
    pub async fn execute(
        &self,
        input: CreateVerificationCodeInput,
    ) -> Result<String, ManagerServiceError> {
        let now = Utc::now();
        let code = VerificationCode {
            recipient: input.recipient,
            purpose: input.purpose,
            code: generate_code(),
            expires_at: now + input.ttl,
            created_at: now,
        };
        self.codes.upsert(&code).await?;

        debug!(
            recipient = %code.recipient,
            purpose = %code.purpose,
            expires_at = %code.expires_at,
            "verification code issued"
        );
        Ok(code.code)
    }
}

// ── VerifyCode ───────────────────────────────────────────────────────────────

pub struct VerifyCodeInput {
    pub recipient: String,
    pub purpose: Purpose,
    pub code: String,
}

pub struct VerifyCodeUseCase<C: VerificationCodeRepository> {
    pub codes: C,
}

impl<C: VerificationCodeRepository> VerifyCodeUseCase<C> {
    /// Consumes the code on success. Failures are reported in the order
    /// `CodeNotFound`, `CodeExpired`, `CodeMismatch`.
    pub async fn execute(&self, input: VerifyCodeInput) -> Result<(), ManagerServiceError> {
        let now = Utc::now();
        if self
            .codes
            .take_matching(&input.recipient, &input.purpose, &input.code, now)
            .await?
        {
            debug!(
                recipient = %input.recipient,
                purpose = %input.purpose,
                "verification code consumed"
            );
            return Ok(());
        }

        let stored = self
            .codes
            .find(&input.recipient, &input.purpose)
            .await?
            .ok_or(ManagerServiceError::CodeNotFound)?;

        if stored.is_expired_at(now) {
            // a concurrent reissue replaces the record; leave that one alone
            self.codes
                .delete_expired(&input.recipient, &input.purpose, now)
                .await?;
            return Err(ManagerServiceError::CodeExpired);
        }
        Err(ManagerServiceError::CodeMismatch)
    }
}

// ── PurgeExpiredCodes ────────────────────────────────────────────────────────

pub struct PurgeExpiredCodesUseCase<C: VerificationCodeRepository> {
    pub codes: C,
}

impl<C: VerificationCodeRepository> PurgeExpiredCodesUseCase<C> {
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<u64, ManagerServiceError> {
        let purged = self.codes.purge_expired(now).await?;
        if purged > 0 {
            info!(purged, "expired verification codes purged");
        }
        Ok(purged)
    }
}
