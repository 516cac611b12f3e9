use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("Wishlist item not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid product reference")]
    InvalidProduct,

    #[error("Cannot add product to wishlist: product is out of stock")]
    ProductOutOfStock,

    #[error("Product is already in the wishlist")]
    AlreadyExists,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type WishlistResult<T> = Result<T, WishlistError>;

impl From<WishlistError> for AppError {
    fn from(err: WishlistError) -> Self {
        match err {
            WishlistError::NotFound(id) => {
                AppError::NotFound(format!("Wishlist item {} not found", id))
            }
            WishlistError::InvalidProduct | WishlistError::ProductOutOfStock => {
                AppError::BadRequest(err.to_string())
            }
            WishlistError::AlreadyExists => AppError::Conflict(err.to_string()),
            WishlistError::Validation(msg) => AppError::BadRequest(msg),
            WishlistError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for WishlistError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for WishlistError {
    fn from(err: mongodb::error::Error) -> Self {
        if database::mongodb::is_duplicate_key(&err) {
            return WishlistError::AlreadyExists;
        }
        WishlistError::Database(err.to_string())
    }
}
