use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};

/// Storage for products.
///
/// Implementations report failures as [`ProductError::Storage`]; the
/// service decides what the client sees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, in insertion order where the store keeps one
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_one(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Store a new product under a freshly assigned id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Replace the stored fields of `product.id`. Fails if the id is unknown.
    async fn update(&self, product: Product) -> ProductResult<()>;

    /// Remove a product. Unknown ids are not an error.
    async fn delete(&self, id: &str) -> ProductResult<()>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_one(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = input.with_id(Uuid::now_v7().to_string());
        self.products.write().await.push(product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: Product) -> ProductResult<()> {
        let mut products = self.products.write().await;

        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| ProductError::no_such_object(&product.id))?;

        tracing::info!(product_id = %product.id, "Updated product");
        *slot = product;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ProductResult<()> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() < before {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget() -> NewProduct {
        NewProduct {
            name: json!("Widget"),
            price: json!(9.99),
            quantity: json!(5),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(widget()).await.unwrap();
        let second = repo.create(widget()).await.unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, json!("Widget"));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.find_all().await.unwrap().is_empty());

        let a = repo.create(widget()).await.unwrap();
        let b = repo.create(widget()).await.unwrap();
        let c = repo.create(widget()).await.unwrap();

        let ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn test_find_one_unknown_is_none() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.find_one("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget()).await.unwrap();

        let replacement = NewProduct {
            name: json!("Widget"),
            price: json!(12.5),
            quantity: json!(3),
        }
        .with_id(created.id.clone());
        repo.update(replacement.clone()).await.unwrap();

        let stored = repo.find_one(&created.id).await.unwrap().unwrap();
        assert_eq!(stored, replacement);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_storage_error() {
        let repo = InMemoryProductRepository::new();
        let result = repo.update(widget().with_id("ghost")).await;

        match result {
            Err(ProductError::Storage(msg)) => assert!(msg.contains("'ghost'")),
            other => panic!("expected storage error, got {:?}", other),
        }
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(widget()).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        repo.delete(&created.id).await.unwrap();
        repo.delete("never-existed").await.unwrap();

        assert!(repo.find_one(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryProductRepository::new();
        let other = repo.clone();

        let created = repo.create(widget()).await.unwrap();
        assert!(other.find_one(&created.id).await.unwrap().is_some());
    }
}
