pub mod aggregate;
pub mod sizes;

pub use aggregate::{InventoryItem, InventoryItemDto, ItemId};
pub use sizes::{calculate_total_quantity, SizeLabel, Sizes};
