use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{category, product},
    error::{CatalogError, CatalogResult},
    models::{Category, CreateProduct, Product, ProductWithCategory, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository.
///
/// Writes run inside explicit transactions; an uncommitted transaction rolls
/// back when dropped, and its connection returns to the pool on every exit
/// path. Category existence is the foreign key's job: a violation surfaces
/// as [`CatalogError::UnknownCategory`] without an extra lookup round-trip.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_by_category(
        &self,
        category_id: i32,
        limit: u64,
    ) -> CatalogResult<Vec<ProductWithCategory>> {
        let rows = product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .find_also_related(category::Entity)
            .order_by_desc(product::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(CatalogError::from_db)?;

        Ok(rows
            .into_iter()
            .filter_map(|(product, category)| {
                category.map(|category| ProductWithCategory {
                    product: product.into(),
                    category: category.into(),
                })
            })
            .collect())
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(CatalogError::from_db)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(CatalogError::from_db)?;

        Ok(model.map(|m| m.into()))
    }

    async fn create(&self, seller_id: Uuid, input: CreateProduct) -> CatalogResult<Product> {
        let category_id = input.category_id;
        let now = chrono::Utc::now();

        // seller_id comes from the verified identity, never from the body
        let active_model = product::ActiveModel {
            id: Set(Uuid::now_v7()),
            seller_id: Set(seller_id),
            category_id: Set(input.category_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            stock_quantity: Set(input.stock_quantity),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let txn = self.db.begin().await.map_err(CatalogError::from_db)?;

        let model = active_model
            .insert(&txn)
            .await
            .map_err(|e| CatalogError::from_db_with_category(e, Some(category_id)))?;

        txn.commit().await.map_err(CatalogError::from_db)?;

        tracing::info!(product_id = %model.id, seller_id = %seller_id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        let category_id = input.category_id;

        // Fixed enumeration of updatable columns; only supplied fields are
        // bound, each as a statement parameter.
        let mut active_model = product::ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(description) = input.description {
            active_model.description = Set(description);
        }
        if let Some(price) = input.price {
            active_model.price = Set(price);
        }
        if let Some(stock_quantity) = input.stock_quantity {
            active_model.stock_quantity = Set(stock_quantity);
        }
        if let Some(category_id) = category_id {
            active_model.category_id = Set(category_id);
        }

        let txn = self.db.begin().await.map_err(CatalogError::from_db)?;

        let model = active_model.update(&txn).await.map_err(|e| {
            if matches!(e, DbErr::RecordNotUpdated) {
                CatalogError::NotFound(id)
            } else {
                CatalogError::from_db_with_category(e, category_id)
            }
        })?;

        txn.commit().await.map_err(CatalogError::from_db)?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        // The delete statement runs on the same transactional handle that
        // begins and commits.
        let txn = self.db.begin().await.map_err(CatalogError::from_db)?;

        let result = product::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(CatalogError::from_db)?;

        txn.commit().await.map_err(CatalogError::from_db)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
