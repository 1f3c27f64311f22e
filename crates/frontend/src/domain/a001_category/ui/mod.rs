mod manager;

pub use manager::CategoryManager;
