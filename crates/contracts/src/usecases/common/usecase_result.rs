use thiserror::Error;

/// Результат выполнения UseCase
pub type UseCaseResult<T> = Result<T, ValidationError>;

/// Нарушение предусловия операции.
///
/// Операция, вернувшая ошибку, состояние не меняет; вызывающая сторона
/// показывает сообщение пользователю и может повторить запрос.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Category \"{0}\" already exists")]
    DuplicateCategory(String),

    #[error("Subcategory \"{name}\" already exists in \"{category}\"")]
    DuplicateSubcategory { category: String, name: String },

    #[error("Category \"{0}\" is protected")]
    ProtectedCategory(String),

    #[error("Subcategory \"{name}\" of \"{category}\" is protected")]
    ProtectedSubcategory { category: String, name: String },

    #[error("\"Default\" is the only subcategory of \"{0}\" and is needed for reassignment")]
    LastDefaultSubcategory(String),

    #[error("Category not found: {0}")]
    UnknownCategory(String),

    #[error("Subcategory not found: {0}")]
    UnknownSubcategory(String),

    #[error("Item not found: {0}")]
    UnknownItem(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    #[error("Only {available} left in size {size}")]
    InsufficientStock { size: String, available: u32 },
}

impl ValidationError {
    /// Машинный код ошибки для логов
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "EMPTY_NAME",
            ValidationError::DuplicateCategory(_) => "DUPLICATE_CATEGORY",
            ValidationError::DuplicateSubcategory { .. } => "DUPLICATE_SUBCATEGORY",
            ValidationError::ProtectedCategory(_) => "PROTECTED_CATEGORY",
            ValidationError::ProtectedSubcategory { .. } => "PROTECTED_SUBCATEGORY",
            ValidationError::LastDefaultSubcategory(_) => "LAST_DEFAULT_SUBCATEGORY",
            ValidationError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            ValidationError::UnknownSubcategory(_) => "UNKNOWN_SUBCATEGORY",
            ValidationError::UnknownItem(_) => "UNKNOWN_ITEM",
            ValidationError::InvalidItem(_) => "INVALID_ITEM",
            ValidationError::InvalidQuantity => "INVALID_QUANTITY",
            ValidationError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
        }
    }
}
