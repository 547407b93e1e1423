/// Manager service error variants.
///
/// Each variant maps to a stable `kind()` string; callers translate kinds into
/// their own responses.
#[derive(Debug, thiserror::Error)]
pub enum ManagerServiceError {
    #[error("exceed {0} managers allowed")]
    QuotaExceeded(usize),
    #[error("no record found")]
    NoRecordFound,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("verification code not found")]
    CodeNotFound,
    #[error("verification code expired")]
    CodeExpired,
    #[error("verification code mismatch")]
    CodeMismatch,
    #[error("store failure")]
    StoreFailure(#[from] anyhow::Error),
}

impl ManagerServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::QuotaExceeded(_) => "QUOTA_EXCEEDED",
            Self::NoRecordFound => "NO_RECORD_FOUND",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::CodeNotFound => "CODE_NOT_FOUND",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::CodeMismatch => "CODE_MISMATCH",
            Self::StoreFailure(_) => "STORE_FAILURE",
        }
    }
}
