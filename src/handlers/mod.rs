pub mod index;
pub mod product;

pub use index::index;
pub use product::{create_product, delete_product, list_products, update_product};
