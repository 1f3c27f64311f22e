pub mod aggregate;

pub use aggregate::{
    same_name, CategoryDefinition, CategoryId, Subcategory, SubcategoryId, Taxonomy,
    DEFAULT_SUBCATEGORY, UNCATEGORIZED,
};
