//! Taxonomy consistency engine
//!
//! Every structural change to categories and subcategories goes through this
//! module. After each operation every catalog item references an existing
//! (category, subcategory) pair: orphaned items are reassigned, never deleted.
//!
//! - engine.rs: mutating operations (add/delete/rename)
//! - queries.rs: counts and item placement check/repair
//! - command.rs: command enum and pure state transition

pub mod command;
pub mod engine;
pub mod queries;

pub use command::{apply, transition, Outcome, TaxonomyCommand};
pub use engine::{
    add_category, add_subcategory, delete_category, delete_subcategory, ensure_sentinel,
    rename_category, rename_subcategory,
};
pub use queries::{
    check_placement, item_count_for, item_count_for_category, validate_item_placement, Placement,
    PlacementRepair,
};
