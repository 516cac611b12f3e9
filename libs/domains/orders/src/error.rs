use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid order id: {0}")]
    InvalidId(String),

    #[error("Caller identity required")]
    Forbidden,

    #[error("Order must contain at least one item")]
    InvalidItems,

    #[error("Invalid product reference")]
    InvalidProduct,

    #[error("Quantity must be greater than 0")]
    InvalidQuantity,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => AppError::NotFound(format!("Order {} not found", id)),
            OrderError::Forbidden => AppError::Forbidden(err.to_string()),
            OrderError::InvalidId(_)
            | OrderError::InvalidItems
            | OrderError::InvalidProduct
            | OrderError::InvalidQuantity => AppError::BadRequest(err.to_string()),
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for OrderError {
    fn from(err: mongodb::error::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for OrderError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}
