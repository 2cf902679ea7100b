//! Product Service - request semantics on top of a repository

use observability::{RequestCounters, RequestCounts};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{ProductError, ProductResult, messages};
use crate::models::{NewProduct, Product, ProductPayload};
use crate::repository::ProductRepository;

/// Product service: validates payloads, counts requests and tags storage
/// failures with the message for the route that hit them.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    counters: RequestCounters,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_counters(repository, RequestCounters::new())
    }

    /// Use `counters` shared with the caller instead of private ones.
    pub fn with_counters(repository: R, counters: RequestCounters) -> Self {
        Self {
            repository: Arc::new(repository),
            counters,
        }
    }

    pub fn counters(&self) -> &RequestCounters {
        &self.counters
    }

    /// List every product
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        log_counts(self.counters.record_get());

        self.repository
            .find_all()
            .await
            .map_err(|e| e.context(messages::FETCH_ALL_FAILED))
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        log_counts(self.counters.record_get());
        info!(id, "Fetching product");

        self.repository
            .find_one(id)
            .await
            .map_err(|e| e.context(messages::FETCH_ONE_FAILED))?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Create a product from a request body.
    ///
    /// Counted as a POST whether or not the body passes validation.
    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: Option<ProductPayload>) -> ProductResult<Product> {
        log_counts(self.counters.record_post());
        info!(body = ?payload, "Creating product");

        let input = require_fields(payload)?;

        self.repository
            .create(input)
            .await
            .map_err(|e| e.context(messages::CREATE_FAILED))
    }

    /// Replace the fields of an existing product
    #[instrument(skip(self, payload))]
    pub async fn update_product(
        &self,
        id: &str,
        payload: Option<ProductPayload>,
    ) -> ProductResult<()> {
        log_counts(self.counters.snapshot());
        info!(id, body = ?payload, "Updating product");

        let product = require_fields(payload)?.with_id(id);

        self.repository
            .update(product)
            .await
            .map_err(|e| e.context(messages::UPDATE_FAILED))
    }

    /// Delete a product; unknown ids succeed
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        log_counts(self.counters.snapshot());
        info!(id, "Deleting product");

        self.repository
            .delete(id)
            .await
            .map_err(|e| e.context(messages::DELETE_FAILED))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            counters: self.counters.clone(),
        }
    }
}

fn log_counts(counts: RequestCounts) {
    info!(get = counts.get, post = counts.post, "Processed request count");
}

/// A missing body and a body lacking any of the three keys are the same failure.
fn require_fields(payload: Option<ProductPayload>) -> ProductResult<NewProduct> {
    let payload = payload.unwrap_or_default();

    if let Err(errors) = payload.validate() {
        let mut missing: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| field.to_string())
            .collect();
        missing.sort();
        info!(?missing, "Rejected product payload");
    }

    payload
        .into_new_product()
        .ok_or_else(|| ProductError::Validation(messages::FIELDS_REQUIRED.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use serde_json::json;

    fn full_payload() -> ProductPayload {
        serde_json::from_value(json!({"name": "Widget", "price": 9.99, "quantity": 5})).unwrap()
    }

    fn stored(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: json!("Widget"),
            price: json!(9.99),
            quantity: json!(5),
        }
    }

    fn storage_down() -> ProductError {
        ProductError::Storage("connection refused".to_string())
    }

    fn internal_message(err: ProductError) -> &'static str {
        match err {
            ProductError::Internal { message, .. } => message,
            other => panic!("expected internal error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_missing_body_without_touching_storage() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let err = service.create_product(None).await.unwrap_err();

        assert!(matches!(err, ProductError::Validation(ref m) if m == messages::FIELDS_REQUIRED));
        assert_eq!(service.counters().snapshot().post, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_each_missing_field() {
        for missing in ["name", "price", "quantity"] {
            let mut body = json!({"name": "Widget", "price": 9.99, "quantity": 5});
            body.as_object_mut().unwrap().remove(missing);
            let payload: ProductPayload = serde_json::from_value(body).unwrap();

            let mut mock_repo = MockProductRepository::new();
            mock_repo.expect_create().never();

            let service = ProductService::new(mock_repo);
            let result = service.create_product(Some(payload)).await;
            assert!(
                matches!(result, Err(ProductError::Validation(_))),
                "missing {missing}"
            );
        }
    }

    #[tokio::test]
    async fn test_create_passes_fields_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.name == json!("Widget") && input.quantity == json!(5))
            .times(1)
            .returning(|input| Ok(input.with_id("new-id")));

        let service = ProductService::new(mock_repo);
        let product = service.create_product(Some(full_payload())).await.unwrap();

        assert_eq!(product, stored("new-id"));
    }

    #[tokio::test]
    async fn test_create_storage_failure_gets_route_message() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().returning(|_| Err(storage_down()));

        let service = ProductService::new(mock_repo);
        let err = service.create_product(Some(full_payload())).await.unwrap_err();

        assert_eq!(internal_message(err), messages::CREATE_FAILED);
    }

    #[tokio::test]
    async fn test_list_failure_gets_route_message() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().returning(|| Err(storage_down()));

        let service = ProductService::new(mock_repo);
        let err = service.list_products().await.unwrap_err();

        assert_eq!(internal_message(err), messages::FETCH_ALL_FAILED);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_one()
            .with(eq("nope"))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product("nope").await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(ref id) if id == "nope"));
    }

    #[tokio::test]
    async fn test_get_failure_gets_route_message() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_one().returning(|_| Err(storage_down()));

        let service = ProductService::new(mock_repo);
        let err = service.get_product("1").await.unwrap_err();

        assert_eq!(internal_message(err), messages::FETCH_ONE_FAILED);
    }

    #[tokio::test]
    async fn test_update_sends_full_record_with_path_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .with(eq(stored("abc")))
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductService::new(mock_repo);
        service
            .update_product("abc", Some(full_payload()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rejects_partial_body_without_touching_storage() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();

        let payload: ProductPayload = serde_json::from_value(json!({"price": 1})).unwrap();
        let service = ProductService::new(mock_repo);
        let result = service.update_product("abc", Some(payload)).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_internal_error() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .returning(|p| Err(ProductError::no_such_object(&p.id)));

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product("ghost", Some(full_payload()))
            .await
            .unwrap_err();

        assert_eq!(internal_message(err), messages::UPDATE_FAILED);
    }

    #[tokio::test]
    async fn test_delete_failure_gets_route_message() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().returning(|_| Err(storage_down()));

        let service = ProductService::new(mock_repo);
        let err = service.delete_product("1").await.unwrap_err();

        assert_eq!(internal_message(err), messages::DELETE_FAILED);
    }

    #[tokio::test]
    async fn test_only_reads_and_creates_are_counted() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().returning(|| Ok(vec![]));
        mock_repo
            .expect_find_one()
            .returning(|id| Ok(Some(stored(id))));
        mock_repo.expect_update().returning(|_| Ok(()));
        mock_repo.expect_delete().returning(|_| Ok(()));

        let counters = RequestCounters::new();
        let service = ProductService::with_counters(mock_repo, counters.clone());

        service.list_products().await.unwrap();
        service.get_product("1").await.unwrap();
        service.create_product(None).await.unwrap_err();
        service
            .update_product("1", Some(full_payload()))
            .await
            .unwrap();
        service.delete_product("1").await.unwrap();

        assert_eq!(counters.snapshot(), RequestCounts { get: 2, post: 1 });
    }
}
