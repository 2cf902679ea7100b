use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Client-facing messages, one per failing route
pub mod messages {
    pub const FIELDS_REQUIRED: &str = "name, price, and quantity must be supplied";
    pub const FETCH_ALL_FAILED: &str = "An error occurred while fetching products";
    pub const FETCH_ONE_FAILED: &str = "An error occurred while fetching the product";
    pub const CREATE_FAILED: &str = "An error occurred while creating the product";
    pub const UPDATE_FAILED: &str = "An error occurred while updating the product";
    pub const DELETE_FAILED: &str = "An error occurred while deleting the product";
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Raw failure from a repository, before a route has claimed it
    #[error("Storage error: {0}")]
    Storage(String),

    /// Storage failure tagged with the message the client will see
    #[error("{message}: {detail}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Error for writing to an id the store does not hold.
    pub fn no_such_object(id: &str) -> Self {
        ProductError::Storage(format!("No object found with '_id' = '{}'", id))
    }

    /// Tag a storage failure with `message`. Other variants pass through.
    pub fn context(self, message: &'static str) -> Self {
        match self {
            ProductError::Storage(detail) => ProductError::Internal { message, detail },
            other => other,
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Storage(_) => AppError::InternalServerError(
                axum_helpers::ErrorCode::InternalError
                    .default_message()
                    .to_string(),
            ),
            ProductError::Internal { message, .. } => {
                AppError::InternalServerError(message.to_string())
            }
        }
    }
}

/// Not found is an ordinary outcome and answers with a bare 404. Storage
/// detail is logged here and never reaches the client.
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match &self {
            ProductError::NotFound(id) => {
                tracing::info!(product_id = %id, "Product not found");
                return StatusCode::NOT_FOUND.into_response();
            }
            ProductError::Storage(detail) | ProductError::Internal { detail, .. } => {
                tracing::error!(detail = %detail, "Product storage failure");
            }
            ProductError::Validation(_) => {}
        }

        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = ProductError::NotFound("42".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_context_message_replaces_detail() {
        let err = ProductError::Storage("socket closed".into()).context(messages::DELETE_FAILED);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["message"], messages::DELETE_FAILED);
        assert!(!body.to_string().contains("socket closed"));
    }

    #[test]
    fn test_context_leaves_other_errors_alone() {
        let err = ProductError::Validation(messages::FIELDS_REQUIRED.into())
            .context(messages::CREATE_FAILED);
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_validation_is_400() {
        let response = ProductError::Validation(messages::FIELDS_REQUIRED.into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["message"], messages::FIELDS_REQUIRED);
    }

    #[test]
    fn test_no_such_object_names_the_id() {
        let err = ProductError::no_such_object("abc");
        assert_eq!(
            err.to_string(),
            "Storage error: No object found with '_id' = 'abc'"
        );
    }
}
