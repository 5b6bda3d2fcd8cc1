use sqlx::{Connection, SqliteConnection, sqlite::SqliteConnectOptions};

use crate::{
    db::ProductTable,
    error::{AppError, Result},
    models::product::{NewProduct, Product, ProductUpdate},
};

/// Product store for database operations.
///
/// Holds no connection: each operation opens its own, runs its statements and
/// closes it again. A connection dropped on an error path is closed as well.
#[derive(Debug, Clone)]
pub struct ProductStore {
    options: SqliteConnectOptions,
}

impl ProductStore {
    /// Create a new ProductStore connecting with the provided options
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(AppError::Database)
    }

    /// Get a list of all products in storage order
    pub async fn get_all_products(&self) -> Result<Vec<Product>> {
        let mut conn = self.connect().await?;

        let query = format!("SELECT * FROM {}", ProductTable::TABLE_NAME);
        let products = sqlx::query_as::<_, Product>(&query)
            .fetch_all(&mut conn)
            .await
            .map_err(AppError::Database)?;

        conn.close().await.map_err(AppError::Database)?;
        Ok(products)
    }

    /// Insert a new, unpurchased product and return it as stored
    pub async fn insert_product(&self, product: &NewProduct) -> Result<Product> {
        let mut conn = self.connect().await?;

        let query = format!(
            "INSERT INTO {} ({}, {}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?, 0)",
            ProductTable::TABLE_NAME,
            ProductTable::COLUMN_NAME,
            ProductTable::COLUMN_CATEGORY,
            ProductTable::COLUMN_QUANTITY,
            ProductTable::COLUMN_CALORIES,
            ProductTable::COLUMN_PRICE,
            ProductTable::COLUMN_PURCHASED,
        );
        let id = sqlx::query(&query)
            .bind(&product.name)
            .bind(&product.category)
            .bind(&product.quantity)
            .bind(product.calories)
            .bind(product.price)
            .execute(&mut conn)
            .await
            .map_err(AppError::Database)?
            .last_insert_rowid();

        let created = Self::fetch_by_id(&mut conn, id)
            .await?
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;

        conn.close().await.map_err(AppError::Database)?;
        tracing::debug!("Inserted product {}", id);
        Ok(created)
    }

    /// Overwrite every mutable column of a product.
    ///
    /// Returns the row as read back after the write, `None` if no product has
    /// this id. A missing id is not an error.
    pub async fn replace_product(&self, id: i64, update: &ProductUpdate) -> Result<Option<Product>> {
        let mut conn = self.connect().await?;

        let query = format!(
            "UPDATE {} SET {} = ?, {} = ?, {} = ?, {} = ?, {} = ?, {} = ? WHERE {} = ?",
            ProductTable::TABLE_NAME,
            ProductTable::COLUMN_NAME,
            ProductTable::COLUMN_CATEGORY,
            ProductTable::COLUMN_QUANTITY,
            ProductTable::COLUMN_CALORIES,
            ProductTable::COLUMN_PRICE,
            ProductTable::COLUMN_PURCHASED,
            ProductTable::COLUMN_ID,
        );
        let rows_affected = sqlx::query(&query)
            .bind(&update.name)
            .bind(&update.category)
            .bind(&update.quantity)
            .bind(update.calories)
            .bind(update.price)
            .bind(update.purchased)
            .bind(id)
            .execute(&mut conn)
            .await
            .map_err(AppError::Database)?
            .rows_affected();

        let updated = Self::fetch_by_id(&mut conn, id).await?;

        conn.close().await.map_err(AppError::Database)?;
        tracing::debug!("Replaced product {} ({} rows)", id, rows_affected);
        Ok(updated)
    }

    /// Delete a product by ID. Deleting a missing product succeeds too.
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        let mut conn = self.connect().await?;

        let query = format!(
            "DELETE FROM {} WHERE {} = ?",
            ProductTable::TABLE_NAME,
            ProductTable::COLUMN_ID
        );
        let rows_affected = sqlx::query(&query)
            .bind(id)
            .execute(&mut conn)
            .await
            .map_err(AppError::Database)?
            .rows_affected();

        conn.close().await.map_err(AppError::Database)?;
        tracing::debug!("Deleted product {} ({} rows)", id, rows_affected);
        Ok(())
    }

    async fn fetch_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Product>> {
        let query = format!(
            "SELECT * FROM {} WHERE {} = ?",
            ProductTable::TABLE_NAME,
            ProductTable::COLUMN_ID
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(AppError::Database)
    }
}
