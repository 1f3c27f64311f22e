//! Catalog maintenance: item CRUD, sales and catalog queries

pub mod operations;
pub mod queries;

pub use operations::{add_item, delete_item, record_sale, update_item};
pub use queries::{filtered_items, ItemFilter};
pub use crate::domain::a002_inventory_item::calculate_total_quantity;
