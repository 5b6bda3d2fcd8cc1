use anyhow::Result;
use sqlx::{
    Connection, Sqlite, SqliteConnection, migrate::MigrateDatabase,
    sqlite::SqliteConnectOptions,
};
use std::str::FromStr;

pub mod product_store;
pub mod product_table;

pub use product_store::ProductStore;
pub use product_table::ProductTable;

/// Initialize the database and return a store bound to it.
///
/// The table is only created together with a fresh database file. An existing
/// file is used as is, whatever its schema looks like.
pub async fn init_db(database_url: &str) -> Result<ProductStore> {
    let options = SqliteConnectOptions::from_str(database_url)?;

    if !Sqlite::database_exists(database_url).await? {
        Sqlite::create_database(database_url).await?;

        let mut conn = SqliteConnection::connect_with(&options).await?;
        sqlx::query(&ProductTable::create_table())
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        tracing::info!("Created database {}", database_url);
    } else {
        tracing::debug!("Using existing database {}", database_url);
    }

    Ok(ProductStore::new(options))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// A database file in the temp dir that is removed on drop.
    pub struct TestDb {
        pub path: PathBuf,
    }

    impl TestDb {
        pub fn new() -> Self {
            let path = std::env::temp_dir()
                .join(format!("products_test_{}.db", uuid::Uuid::new_v4()));
            Self { path }
        }

        pub fn url(&self) -> String {
            format!("sqlite:{}", self.path.display())
        }
    }

    impl TestDb {
        /// Creates the database with the price-less products table and one
        /// row in it, the way the older variant of the service left it.
        pub async fn with_reduced_table() -> Self {
            use sqlx::{Connection, Sqlite, SqliteConnection, migrate::MigrateDatabase};

            let db = Self::new();
            let url = db.url();
            Sqlite::create_database(&url).await.unwrap();

            let mut conn = SqliteConnection::connect(&url).await.unwrap();
            sqlx::query(
                "CREATE TABLE products (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    category TEXT,
                    quantity TEXT,
                    calories INTEGER,
                    purchased BOOLEAN DEFAULT 0
                )",
            )
            .execute(&mut conn)
            .await
            .unwrap();
            sqlx::query(
                "INSERT INTO products (name, category, quantity, calories, purchased)
                 VALUES ('Milk', 'Dairy', '2L', 120, 0)",
            )
            .execute(&mut conn)
            .await
            .unwrap();
            conn.close().await.unwrap();

            db
        }
    }

    impl Drop for TestDb {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
            for suffix in ["-wal", "-shm"] {
                let mut side = self.path.clone().into_os_string();
                side.push(suffix);
                let _ = std::fs::remove_file(side);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::TestDb;
    use super::*;

    #[tokio::test]
    async fn init_creates_file_and_table() {
        let db = TestDb::new();
        assert!(!db.path.exists());

        let store = init_db(&db.url()).await.unwrap();
        assert!(db.path.exists());
        assert!(store.get_all_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn init_leaves_existing_schema_alone() {
        let db = TestDb::new();
        let url = db.url();

        // A hand-made table without the price column
        Sqlite::create_database(&url).await.unwrap();
        let options = SqliteConnectOptions::from_str(&url).unwrap();
        let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
        sqlx::query("CREATE TABLE products (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
            .execute(&mut conn)
            .await
            .unwrap();
        conn.close().await.unwrap();

        init_db(&url).await.unwrap();

        let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
        let columns: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info('products')")
                .fetch_all(&mut conn)
                .await
                .unwrap();
        conn.close().await.unwrap();

        let columns: Vec<String> = columns.into_iter().map(|c| c.0).collect();
        assert_eq!(columns, vec!["id".to_string(), "name".to_string()]);
    }

    #[tokio::test]
    async fn init_twice_keeps_rows() {
        let db = TestDb::new();
        let store = init_db(&db.url()).await.unwrap();
        store
            .insert_product(&crate::models::product::NewProduct {
                name: "Bread".into(),
                category: "bakery".into(),
                quantity: "1".into(),
                calories: 0,
                price: 0.0,
            })
            .await
            .unwrap();

        let store = init_db(&db.url()).await.unwrap();
        assert_eq!(store.get_all_products().await.unwrap().len(), 1);
    }
}
