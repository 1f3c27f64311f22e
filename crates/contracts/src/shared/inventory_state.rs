use crate::domain::a001_category::Taxonomy;
use crate::domain::a002_inventory_item::{InventoryItem, ItemId};

/// Явный контейнер состояния приложения: таксономия и каталог.
///
/// Передаётся в операции движка по ссылке; UI держит его внутри
/// реактивного сигнала.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryState {
    pub taxonomy: Taxonomy,
    pub catalog: Vec<InventoryItem>,
}

impl InventoryState {
    pub fn new(taxonomy: Taxonomy, catalog: Vec<InventoryItem>) -> Self {
        Self { taxonomy, catalog }
    }

    pub fn item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.catalog.iter().find(|i| i.base.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut InventoryItem> {
        self.catalog.iter_mut().find(|i| i.base.id == id)
    }

    /// Отображаемые имена категории и подкатегории товара
    pub fn placement_names(&self, item: &InventoryItem) -> Option<(&str, &str)> {
        self.taxonomy.resolve(item.category_id, item.subcategory_id)
    }

    /// Инвариант: каждый товар ссылается на существующую пару
    pub fn is_consistent(&self) -> bool {
        self.catalog
            .iter()
            .all(|i| self.taxonomy.contains_pair(i.category_id, i.subcategory_id))
    }
}
