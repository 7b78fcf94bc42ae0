use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = if status.is_server_error() {
            log::error!("{}", self);
            "internal server error".to_owned()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error })
    }
}

#[cfg(test)]
mod test {
    use super::Error;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::NotFound("question 1".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Validation("empty text".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::DatabaseError(sqlx::Error::PoolTimedOut).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
