use actix_web::http::StatusCode;
use derive_more::Display;

use crate::attendance::PunchError;
use crate::i18n::Notice;
use crate::scanner::ScanError;
use crate::storage::StorageError;

#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    Punch(PunchError),
    #[display(fmt = "{}", _0)]
    Scan(ScanError),
    #[display(fmt = "{}", _0)]
    Storage(StorageError),
    #[display(fmt = "record {} not found", _0)]
    RecordNotFound(i64),
    #[display(fmt = "invalid admin password")]
    InvalidAdminPassword,
}

impl From<PunchError> for AppError {
    fn from(e: PunchError) -> Self {
        AppError::Punch(e)
    }
}

impl From<ScanError> for AppError {
    fn from(e: ScanError) -> Self {
        AppError::Scan(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Punch(e) => Some(e),
            AppError::Scan(e) => Some(e),
            AppError::Storage(e) => Some(e),
            AppError::RecordNotFound(_) | AppError::InvalidAdminPassword => None,
        }
    }
}

impl AppError {
    pub fn notice(&self) -> Notice {
        match self {
            AppError::Punch(PunchError::NameRequired) => Notice::NameRequired,
            AppError::Punch(PunchError::VerificationRequired) => Notice::VerificationRequired,
            AppError::Punch(PunchError::AlreadyClockedIn) => Notice::AlreadyClockedIn,
            AppError::Punch(PunchError::NotClockedIn) => Notice::NotClockedIn,
            AppError::Punch(PunchError::AlreadyClockedOut) => Notice::AlreadyClockedOut,
            AppError::Scan(ScanError::InvalidToken) => Notice::InvalidQrToken,
            AppError::Scan(ScanError::DecodeFailed) => Notice::ScanDecodeFailed,
            AppError::Scan(ScanError::CameraDenied) => Notice::CameraAccessDenied,
            AppError::Scan(ScanError::LibraryUnavailable) => Notice::ScanLibraryUnavailable,
            AppError::Storage(_) => Notice::StorageFailed,
            AppError::RecordNotFound(_) => Notice::RecordNotFound,
            AppError::InvalidAdminPassword => Notice::InvalidAdminPassword,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Punch(_) | AppError::Scan(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidAdminPassword => StatusCode::UNAUTHORIZED,
        }
    }
}
