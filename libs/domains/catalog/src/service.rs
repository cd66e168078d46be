use axum_helpers::AuthUser;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateProduct, Product, ProductWithCategory, Role, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Fixed row cap for the category listing. Not configurable.
const CATEGORY_LIST_LIMIT: u64 = 25;

/// Service layer for catalog business logic: validation plus the role and
/// ownership gates.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products in a category.
    ///
    /// `category` is the raw query value: it must be present and numeric,
    /// otherwise the request fails with the listing's 404 contract. A numeric
    /// id with no category behind it yields an empty listing.
    pub async fn list_products(
        &self,
        category: Option<&str>,
    ) -> CatalogResult<Vec<ProductWithCategory>> {
        let raw = category.ok_or_else(|| CatalogError::InvalidCategory(String::new()))?;
        let category_id: i32 = raw
            .trim()
            .parse()
            .map_err(|_| CatalogError::InvalidCategory(raw.to_string()))?;

        self.repository
            .list_by_category(category_id, CATEGORY_LIST_LIMIT)
            .await
    }

    /// List all categories
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Create a product owned by the caller.
    ///
    /// Requires the Seller or Admin role. The owner is always the verified
    /// caller; nothing in the input can change that.
    pub async fn create_product(
        &self,
        caller: &AuthUser,
        input: CreateProduct,
    ) -> CatalogResult<Product> {
        Self::vendor_role(caller)?;

        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.create(caller.user_id, input).await
    }

    /// Update a product, enforcing the role and ownership gates.
    pub async fn update_product(
        &self,
        caller: &AuthUser,
        id: Uuid,
        input: UpdateProduct,
    ) -> CatalogResult<Product> {
        let role = Self::vendor_role(caller)?;

        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if input.is_empty() {
            return Err(CatalogError::Validation(
                "Please provide details to update".to_string(),
            ));
        }

        self.authorize_owner(caller, role, id).await?;
        self.repository.update(id, input).await
    }

    /// Delete a product, enforcing the role and ownership gates.
    pub async fn delete_product(&self, caller: &AuthUser, id: Uuid) -> CatalogResult<()> {
        let role = Self::vendor_role(caller)?;
        self.authorize_owner(caller, role, id).await?;

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            // Row disappeared between the gate lookup and the delete
            return Err(CatalogError::NotFound(id));
        }

        Ok(())
    }

    /// Role gate: the caller must be a Seller or an Admin.
    fn vendor_role(caller: &AuthUser) -> CatalogResult<Role> {
        let role = caller
            .role_name
            .parse::<Role>()
            .map_err(|_| CatalogError::Unauthorized)?;

        if !role.can_manage_products() {
            return Err(CatalogError::Unauthorized);
        }

        Ok(role)
    }

    /// Ownership gate: the product must exist, and the caller must be its
    /// recorded seller. Admins are ownership-exempt.
    async fn authorize_owner(
        &self,
        caller: &AuthUser,
        role: Role,
        id: Uuid,
    ) -> CatalogResult<Product> {
        let product = self.get_product(id).await?;

        if role != Role::Admin && product.seller_id != caller.user_id {
            return Err(CatalogError::Unauthorized);
        }

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn caller(role_name: &str) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role_name: role_name.to_string(),
        }
    }

    fn sample_product(seller_id: Uuid) -> Product {
        Product::new(
            seller_id,
            CreateProduct {
                name: "Desk lamp".to_string(),
                description: "Adjustable arm, warm light".to_string(),
                price: 24.5,
                stock_quantity: 12,
                category_id: 1,
            },
        )
    }

    #[tokio::test]
    async fn test_list_requires_category_param() {
        let service = ProductService::new(MockProductRepository::new());

        let result = service.list_products(None).await;
        assert!(matches!(result, Err(CatalogError::InvalidCategory(_))));
    }

    #[tokio::test]
    async fn test_list_rejects_non_numeric_category() {
        let service = ProductService::new(MockProductRepository::new());

        let result = service.list_products(Some("electronics")).await;
        assert!(matches!(result, Err(CatalogError::InvalidCategory(_))));
    }

    #[tokio::test]
    async fn test_list_parses_category_and_caps_rows() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list_by_category()
            .with(eq(7), eq(25u64))
            .returning(|_, _| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let rows = service.list_products(Some("7")).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_customer_cannot_create_product() {
        // No expectations on the mock: the repository must not be reached
        let service = ProductService::new(MockProductRepository::new());

        let result = service
            .create_product(
                &caller("Customer"),
                CreateProduct {
                    name: "Desk lamp".to_string(),
                    description: String::new(),
                    price: 24.5,
                    stock_quantity: 12,
                    category_id: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(CatalogError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected() {
        let service = ProductService::new(MockProductRepository::new());

        let result = service
            .delete_product(&caller("superuser"), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(CatalogError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let service = ProductService::new(MockProductRepository::new());

        let result = service
            .create_product(
                &caller("Seller"),
                CreateProduct {
                    name: String::new(), // Invalid!
                    description: String::new(),
                    price: 1.0,
                    stock_quantity: 1,
                    category_id: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let service = ProductService::new(MockProductRepository::new());

        let result = service
            .update_product(&caller("Seller"), Uuid::new_v4(), UpdateProduct::default())
            .await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_requires_ownership() {
        let other_seller = Uuid::new_v4();
        let product = sample_product(other_seller);
        let product_id = product.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(product_id))
            .returning(move |_| Ok(Some(product.clone())));

        let service = ProductService::new(mock_repo);

        let update = UpdateProduct {
            price: Some(10.0),
            ..Default::default()
        };
        let result = service
            .update_product(&caller("Seller"), product_id, update)
            .await;

        assert!(matches!(result, Err(CatalogError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);

        let update = UpdateProduct {
            price: Some(10.0),
            ..Default::default()
        };
        let result = service
            .update_product(&caller("Seller"), Uuid::new_v4(), update)
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_admin_is_ownership_exempt() {
        let product = sample_product(Uuid::new_v4());
        let product_id = product.id;
        let updated = product.clone();

        let mut mock_repo = MockProductRepository::new();
        {
            let product = product.clone();
            mock_repo
                .expect_get_by_id()
                .with(eq(product_id))
                .returning(move |_| Ok(Some(product.clone())));
        }
        mock_repo
            .expect_update()
            .returning(move |_, _| Ok(updated.clone()));

        let service = ProductService::new(mock_repo);

        let update = UpdateProduct {
            price: Some(10.0),
            ..Default::default()
        };
        let result = service
            .update_product(&caller("Admin"), product_id, update)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_vanished_row_is_not_found() {
        let owner = caller("Seller");
        let product = sample_product(owner.user_id);
        let product_id = product.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(product.clone())));
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);

        let result = service.delete_product(&owner, product_id).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }
}
