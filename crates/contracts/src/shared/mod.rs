pub mod inventory_state;
pub mod seed;
pub mod snapshot;

pub use inventory_state::InventoryState;
