use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO categories (name, description, created_at, updated_at)
            VALUES
                ('Electronics', 'Phones, computers, and other electronic devices', NOW(), NOW()),
                ('Clothing', 'Apparel, shoes, and accessories', NOW(), NOW()),
                ('Books', 'Printed books, e-books, and audiobooks', NOW(), NOW()),
                ('Home & Garden', 'Furniture, decor, and gardening supplies', NOW(), NOW()),
                ('Sports', 'Sporting goods and outdoor equipment', NOW(), NOW()),
                ('Toys', 'Toys and games for all ages', NOW(), NOW())
            ON CONFLICT (name) DO NOTHING
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            DELETE FROM categories
            WHERE name IN ('Electronics', 'Clothing', 'Books', 'Home & Garden', 'Sports', 'Toys')
            "#,
            )
            .await?;

        Ok(())
    }
}
