/// Provides constants and utilities for working with
/// the "products" database table.
pub struct ProductTable;

impl ProductTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "products";

    /// The column name for the primary key identifier of a product.
    pub const COLUMN_ID: &'static str = "id";

    /// The column name for the product's name.
    pub const COLUMN_NAME: &'static str = "name";

    /// The column name for the product's category label.
    pub const COLUMN_CATEGORY: &'static str = "category";

    /// The column name for the free-form quantity, e.g. "2L".
    pub const COLUMN_QUANTITY: &'static str = "quantity";

    /// The column name for the calorie count.
    pub const COLUMN_CALORIES: &'static str = "calories";

    /// The column name for the product's price.
    pub const COLUMN_PRICE: &'static str = "price";

    /// The column name for the purchased flag.
    pub const COLUMN_PURCHASED: &'static str = "purchased";

    /// Column definition of the price column. It is the only column the
    /// reduced (price-less) table lacks.
    const PRICE_DEFINITION: &'static str = "REAL DEFAULT 0";

    /// SQL statement for creating the products table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE {} (
                {} INTEGER PRIMARY KEY AUTOINCREMENT,
                {} TEXT NOT NULL,
                {} TEXT,
                {} TEXT,
                {} INTEGER,
                {} {},
                {} BOOLEAN DEFAULT 0
            )",
            Self::TABLE_NAME,
            Self::COLUMN_ID,
            Self::COLUMN_NAME,
            Self::COLUMN_CATEGORY,
            Self::COLUMN_QUANTITY,
            Self::COLUMN_CALORIES,
            Self::COLUMN_PRICE,
            Self::PRICE_DEFINITION,
            Self::COLUMN_PURCHASED
        )
    }
}
