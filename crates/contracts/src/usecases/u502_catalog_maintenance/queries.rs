use crate::domain::a001_category::{CategoryId, SubcategoryId};
use crate::domain::a002_inventory_item::InventoryItem;

/// Линейный отбор товаров по предикату
pub fn filtered_items<'a>(
    items: &'a [InventoryItem],
    predicate: impl Fn(&InventoryItem) -> bool,
) -> Vec<&'a InventoryItem> {
    items.iter().filter(|item| predicate(item)).collect()
}

/// Отбор для поиска и витрины остатков. Пустые критерии не ограничивают выборку.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Подстрока наименования или SKU, без учёта регистра
    pub search: String,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
}

impl ItemFilter {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Default::default()
        }
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty()
            && !item.name().to_lowercase().contains(&needle)
            && !item.sku().to_lowercase().contains(&needle)
        {
            return false;
        }
        if let Some(category_id) = self.category_id {
            if item.category_id != category_id {
                return false;
            }
        }
        if let Some(subcategory_id) = self.subcategory_id {
            if item.subcategory_id != subcategory_id {
                return false;
            }
        }
        true
    }
}
