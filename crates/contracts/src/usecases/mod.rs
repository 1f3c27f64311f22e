pub mod common;
pub mod u501_taxonomy_consistency;
pub mod u502_catalog_maintenance;
