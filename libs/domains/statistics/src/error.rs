use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Invalid date range: start is after end")]
    InvalidRange,

    #[error("Invalid year {0}, expected 1900-2100")]
    InvalidYear(i32),

    #[error("Database error: {0}")]
    Database(String),
}

pub type StatisticsResult<T> = Result<T, StatisticsError>;

impl From<StatisticsError> for AppError {
    fn from(err: StatisticsError) -> Self {
        match err {
            StatisticsError::InvalidDateFormat(_)
            | StatisticsError::InvalidRange
            | StatisticsError::InvalidYear(_) => AppError::BadRequest(err.to_string()),
            StatisticsError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StatisticsError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for StatisticsError {
    fn from(err: mongodb::error::Error) -> Self {
        StatisticsError::Database(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for StatisticsError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        StatisticsError::Database(err.to_string())
    }
}
