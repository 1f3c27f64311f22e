pub mod app_store;
pub mod config;
pub mod dialog;
pub mod icons;
pub mod image;
pub mod local_storage;
