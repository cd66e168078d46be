use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Marketplace roles, as carried in the verified credential.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Customer,
    Seller,
    Admin,
}

impl Role {
    /// Whether this role may create and manage catalog products.
    pub fn can_manage_products(&self) -> bool {
        matches!(self, Role::Seller | Role::Admin)
    }
}

/// Category entity - a classification products belong to.
///
/// Read-only from this module; rows are provisioned out of band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier
    pub id: i32,
    /// Category name (unique)
    pub name: String,
    /// Category description
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Product entity - a sellable item owned by exactly one seller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    /// Owning seller. Set once at creation from the verified caller identity.
    pub seller_id: Uuid,
    /// Category the product belongs to
    pub category_id: i32,
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Current stock quantity
    pub stock_quantity: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A product row joined with its category, as returned by the listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Category,
}

/// DTO for creating a new product. All fields are required.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
    pub category_id: i32,
}

/// DTO for partially updating an existing product.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
    pub category_id: Option<i32>,
}

impl UpdateProduct {
    /// True when no field was supplied. An empty update is rejected.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
            && self.category_id.is_none()
    }
}

/// Query parameters for the product listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListProductsQuery {
    /// Category ID to list products for. Required; must be numeric.
    pub category: Option<String>,
}

/// Acknowledgment body returned by a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl Product {
    /// Create a new product owned by `seller_id` from a CreateProduct DTO
    pub fn new(seller_id: Uuid, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            seller_id,
            category_id: input.category_id,
            name: input.name,
            description: input.description,
            price: input.price,
            stock_quantity: input.stock_quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO. `seller_id` is never touched.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock_quantity) = update.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("Seller".parse::<Role>().unwrap(), Role::Seller);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("CUSTOMER".parse::<Role>().unwrap(), Role::Customer);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_gate() {
        assert!(Role::Seller.can_manage_products());
        assert!(Role::Admin.can_manage_products());
        assert!(!Role::Customer.can_manage_products());
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateProduct::default().is_empty());

        let update = UpdateProduct {
            price: Some(19.99),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_apply_update_preserves_owner_and_unset_fields() {
        let seller_id = Uuid::new_v4();
        let mut product = Product::new(
            seller_id,
            CreateProduct {
                name: "Mechanical keyboard".to_string(),
                description: "Tenkeyless, brown switches".to_string(),
                price: 89.0,
                stock_quantity: 5,
                category_id: 1,
            },
        );

        product.apply_update(UpdateProduct {
            price: Some(79.0),
            ..Default::default()
        });

        assert_eq!(product.seller_id, seller_id);
        assert_eq!(product.price, 79.0);
        assert_eq!(product.name, "Mechanical keyboard");
        assert_eq!(product.stock_quantity, 5);
    }
}
