//! Product service
//!
//! Catalog management: create, update, delete and lookup of products.

use std::sync::Arc;

use crate::domain::entities::{Product, ProductDetails, ProductId};
use crate::domain::ports::ProductRepository;
use crate::error::AppError;

/// Service for managing products
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    products: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(products: Arc<PR>) -> Self {
        Self { products }
    }

    /// Create a product with a server-assigned ID
    pub async fn create_product(&self, details: ProductDetails) -> Result<Product, AppError> {
        let product = Product::new(details);
        product.validate()?;

        self.products.create(&product).await?;
        tracing::info!("Created product {} ({})", product.id, product.name);

        Ok(product)
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, AppError> {
        Ok(self.products.get_by_id(id).await?)
    }

    /// Replace a product's attributes wholesale
    pub async fn update_product(
        &self,
        id: &ProductId,
        details: ProductDetails,
    ) -> Result<Product, AppError> {
        let existing = self.products.get_by_id(id).await?;

        let product = Product::with_id(existing.id, details);
        product.validate()?;

        self.products.update(&product).await?;
        tracing::info!("Updated product {}", product.id);

        Ok(product)
    }

    /// Delete a product. Past orders keep referencing its ID.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AppError> {
        self.products.delete(id).await?;
        tracing::info!("Deleted product {}", id);
        Ok(())
    }

    /// List all products
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.list().await?)
    }
}
