use crate::domain::a001_category::{CategoryId, SubcategoryId, Taxonomy};
use crate::domain::a002_inventory_item::InventoryItem;

/// Количество товаров в паре (категория, подкатегория)
pub fn item_count_for(
    catalog: &[InventoryItem],
    category_id: CategoryId,
    subcategory_id: SubcategoryId,
) -> usize {
    catalog
        .iter()
        .filter(|i| i.category_id == category_id && i.subcategory_id == subcategory_id)
        .count()
}

/// Количество товаров в категории по всем подкатегориям
pub fn item_count_for_category(catalog: &[InventoryItem], category_id: CategoryId) -> usize {
    catalog.iter().filter(|i| i.category_id == category_id).count()
}

/// Результат проверки размещения товара (без побочных эффектов)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Valid,
    UnknownCategory,
    UnknownSubcategory,
}

pub fn check_placement(item: &InventoryItem, taxonomy: &Taxonomy) -> Placement {
    match taxonomy.get(item.category_id) {
        None => Placement::UnknownCategory,
        Some(category) if !category.contains(item.subcategory_id) => Placement::UnknownSubcategory,
        Some(_) => Placement::Valid,
    }
}

/// Что сделал ремонт размещения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRepair {
    Unchanged,
    /// Категория не найдена: товар перенесён в Uncategorized/Default
    MovedToSentinel { taxonomy_changed: bool },
    /// Подкатегория не найдена: товар перенесён в Default своей категории
    MovedToDefault { default_added: bool },
}

impl PlacementRepair {
    pub fn item_changed(&self) -> bool {
        !matches!(self, PlacementRepair::Unchanged)
    }

    pub fn taxonomy_changed(&self) -> bool {
        match self {
            PlacementRepair::Unchanged => false,
            PlacementRepair::MovedToSentinel { taxonomy_changed } => *taxonomy_changed,
            PlacementRepair::MovedToDefault { default_added } => *default_added,
        }
    }
}

/// Исправляет размещение товара перед записью.
///
/// Может изменить таксономию: добавляет "Default" в категорию товара или
/// восстанавливает категорию-страж, если их нет.
pub fn validate_item_placement(
    taxonomy: &mut Taxonomy,
    item: &mut InventoryItem,
) -> PlacementRepair {
    if let Some(category) = taxonomy.get_mut(item.category_id) {
        if category.contains(item.subcategory_id) {
            return PlacementRepair::Unchanged;
        }
        let (default_id, default_added) = category.ensure_default();
        log::debug!(
            "item {} moved to Default of {}: subcategory {} not found",
            item.base.code,
            category.name,
            item.subcategory_id.0
        );
        item.subcategory_id = default_id;
        return PlacementRepair::MovedToDefault { default_added };
    }

    let ((sentinel_id, default_id), taxonomy_changed) = taxonomy.ensure_sentinel();
    log::debug!(
        "item {} moved to sentinel: category {} not found",
        item.base.code,
        item.category_id.0
    );
    item.category_id = sentinel_id;
    item.subcategory_id = default_id;
    PlacementRepair::MovedToSentinel { taxonomy_changed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::{
        CategoryDefinition, DEFAULT_SUBCATEGORY, UNCATEGORIZED,
    };
    use crate::domain::a002_inventory_item::Sizes;

    fn item_in(category_id: CategoryId, subcategory_id: SubcategoryId) -> InventoryItem {
        InventoryItem::new_for_insert(
            "Shirt".into(),
            "SKU-1".into(),
            category_id,
            subcategory_id,
            Sizes::new(),
            10.0,
            None,
            None,
        )
    }

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            CategoryDefinition::with_subcategories("Men", &["Oxford", "Cuban"]),
            CategoryDefinition::new(UNCATEGORIZED),
        ])
    }

    #[test]
    fn test_item_count_for_pair() {
        let taxonomy = taxonomy();
        let men = taxonomy.by_name("Men").unwrap();
        let oxford = men.subcategory_by_name("Oxford").unwrap().id;
        let cuban = men.subcategory_by_name("Cuban").unwrap().id;

        let mut catalog = vec![item_in(men.id, oxford)];
        assert_eq!(item_count_for(&catalog, men.id, oxford), 1);
        assert_eq!(item_count_for(&catalog, men.id, cuban), 0);

        catalog.push(item_in(men.id, cuban));
        assert_eq!(item_count_for(&catalog, men.id, cuban), 1);
        assert_eq!(item_count_for_category(&catalog, men.id), 2);
    }

    #[test]
    fn test_check_placement_is_pure() {
        let taxonomy = taxonomy();
        let before = taxonomy.clone();
        let men = taxonomy.by_name("Men").unwrap();

        let item = item_in(men.id, SubcategoryId::new_v4());
        assert_eq!(check_placement(&item, &taxonomy), Placement::UnknownSubcategory);

        let item = item_in(CategoryId::new_v4(), SubcategoryId::new_v4());
        assert_eq!(check_placement(&item, &taxonomy), Placement::UnknownCategory);

        let oxford = men.subcategory_by_name("Oxford").unwrap().id;
        assert_eq!(check_placement(&item_in(men.id, oxford), &taxonomy), Placement::Valid);
        assert_eq!(taxonomy, before);
    }

    #[test]
    fn test_repair_unknown_category_moves_to_sentinel() {
        let mut taxonomy = taxonomy();
        let mut item = item_in(CategoryId::new_v4(), SubcategoryId::new_v4());

        let repair = validate_item_placement(&mut taxonomy, &mut item);
        assert_eq!(repair, PlacementRepair::MovedToSentinel { taxonomy_changed: false });
        assert_eq!(
            taxonomy.resolve(item.category_id, item.subcategory_id),
            Some((UNCATEGORIZED, DEFAULT_SUBCATEGORY))
        );
    }

    #[test]
    fn test_repair_unknown_subcategory_adds_default() {
        let mut taxonomy = taxonomy();
        let men_id = taxonomy.by_name("Men").unwrap().id;
        let mut item = item_in(men_id, SubcategoryId::new_v4());

        let repair = validate_item_placement(&mut taxonomy, &mut item);
        assert!(repair.taxonomy_changed());
        assert_eq!(
            taxonomy.get(men_id).unwrap().subcategory_names(),
            vec!["Cuban", "Default", "Oxford"]
        );
        assert_eq!(taxonomy.resolve(item.category_id, item.subcategory_id), Some(("Men", "Default")));

        // Второй товар попадает в уже существующий Default
        let mut other = item_in(men_id, SubcategoryId::new_v4());
        let repair = validate_item_placement(&mut taxonomy, &mut other);
        assert_eq!(repair, PlacementRepair::MovedToDefault { default_added: false });
        assert_eq!(other.subcategory_id, item.subcategory_id);
    }

    #[test]
    fn test_repair_valid_item_is_noop() {
        let mut taxonomy = taxonomy();
        let men = taxonomy.by_name("Men").unwrap();
        let mut item = item_in(men.id, men.subcategory_by_name("Cuban").unwrap().id);
        let before = item.clone();

        let repair = validate_item_placement(&mut taxonomy, &mut item);
        assert!(!repair.item_changed());
        assert_eq!(item, before);
    }
}
