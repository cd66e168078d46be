use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, CreateProduct, Product, ProductWithCategory, UpdateProduct};

/// Repository trait for catalog persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products in a category, joined with the category row,
    /// newest first, at most `limit` rows
    async fn list_by_category(
        &self,
        category_id: i32,
        limit: u64,
    ) -> CatalogResult<Vec<ProductWithCategory>>;

    /// List all categories
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// Create a new product owned by `seller_id`
    async fn create(&self, seller_id: Uuid, input: CreateProduct) -> CatalogResult<Product>;

    /// Partially update an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Mirrors the relational behaviour, including the category foreign key:
/// a write referencing an unknown category is rejected.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    categories: Arc<RwLock<BTreeMap<i32, Category>>>,
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository preloaded with the given categories
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let map = categories.into_iter().map(|c| (c.id, c)).collect();
        Self {
            categories: Arc::new(RwLock::new(map)),
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_by_category(
        &self,
        category_id: i32,
        limit: u64,
    ) -> CatalogResult<Vec<ProductWithCategory>> {
        let categories = self.categories.read().await;
        let Some(category) = categories.get(&category_id).cloned() else {
            return Ok(vec![]);
        };

        let products = self.products.read().await;
        let mut rows: Vec<Product> = products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();

        // Newest first
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(rows
            .into_iter()
            .take(limit as usize)
            .map(|product| ProductWithCategory {
                product,
                category: category.clone(),
            })
            .collect())
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn create(&self, seller_id: Uuid, input: CreateProduct) -> CatalogResult<Product> {
        let categories = self.categories.read().await;
        if !categories.contains_key(&input.category_id) {
            return Err(CatalogError::UnknownCategory(input.category_id));
        }
        drop(categories);

        let product = Product::new(seller_id, input);
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        if let Some(category_id) = input.category_id {
            let categories = self.categories.read().await;
            if !categories.contains_key(&category_id) {
                return Err(CatalogError::UnknownCategory(category_id));
            }
        }

        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
