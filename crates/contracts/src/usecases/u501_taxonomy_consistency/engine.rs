use super::queries::{item_count_for, validate_item_placement};
use crate::domain::a001_category::{
    CategoryDefinition, CategoryId, Subcategory, SubcategoryId, DEFAULT_SUBCATEGORY,
};
use crate::domain::common::AggregateId;
use crate::shared::InventoryState;
use crate::usecases::common::{UseCaseResult, ValidationError};

fn normalize_name(name: &str) -> UseCaseResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn unknown_category(id: CategoryId) -> ValidationError {
    ValidationError::UnknownCategory(id.as_string())
}

fn unknown_subcategory(id: SubcategoryId) -> ValidationError {
    ValidationError::UnknownSubcategory(id.as_string())
}

/// Создать категорию с единственной подкатегорией "Default"
pub fn add_category(state: &mut InventoryState, name: &str) -> UseCaseResult<CategoryId> {
    let name = normalize_name(name)?;
    if let Some(existing) = state.taxonomy.by_name(&name) {
        return Err(ValidationError::DuplicateCategory(existing.name.clone()));
    }

    let id = state.taxonomy.push(CategoryDefinition::new(name.as_str()));
    log::info!("category added: {}", name);
    Ok(id)
}

/// Удалить категорию; её товары безусловно переносятся в Uncategorized/Default.
/// Возвращает число перенесённых товаров.
pub fn delete_category(state: &mut InventoryState, category_id: CategoryId) -> UseCaseResult<usize> {
    let category = state
        .taxonomy
        .get(category_id)
        .ok_or_else(|| unknown_category(category_id))?;
    if category.is_sentinel() {
        return Err(ValidationError::ProtectedCategory(category.name.clone()));
    }

    let ((sentinel_id, default_id), _) = state.taxonomy.ensure_sentinel();
    let mut reassigned = 0;
    for item in state.catalog.iter_mut().filter(|i| i.category_id == category_id) {
        item.category_id = sentinel_id;
        item.subcategory_id = default_id;
        item.touch_updated();
        reassigned += 1;
    }

    if let Some(removed) = state.taxonomy.remove(category_id) {
        log::info!(
            "category deleted: {} ({} items moved to Uncategorized)",
            removed.name,
            reassigned
        );
    }
    Ok(reassigned)
}

/// Добавить подкатегорию; список остаётся отсортированным
pub fn add_subcategory(
    state: &mut InventoryState,
    category_id: CategoryId,
    name: &str,
) -> UseCaseResult<SubcategoryId> {
    let name = normalize_name(name)?;
    let category = state
        .taxonomy
        .get_mut(category_id)
        .ok_or_else(|| unknown_category(category_id))?;
    if let Some(existing) = category.subcategory_by_name(&name) {
        return Err(ValidationError::DuplicateSubcategory {
            category: category.name.clone(),
            name: existing.name.clone(),
        });
    }

    let id = category.insert_subcategory(Subcategory::new(name.as_str()));
    category.touch();
    log::info!("subcategory added: {} / {}", category.name, name);
    Ok(id)
}

/// Удалить подкатегорию; её товары переносятся в "Default" той же категории.
/// Возвращает число перенесённых товаров.
pub fn delete_subcategory(
    state: &mut InventoryState,
    category_id: CategoryId,
    subcategory_id: SubcategoryId,
) -> UseCaseResult<usize> {
    let category = state
        .taxonomy
        .get(category_id)
        .ok_or_else(|| unknown_category(category_id))?;
    let subcategory = category
        .subcategory(subcategory_id)
        .ok_or_else(|| unknown_subcategory(subcategory_id))?;

    if subcategory.is_default() {
        if category.is_sentinel() {
            return Err(ValidationError::ProtectedSubcategory {
                category: category.name.clone(),
                name: subcategory.name.clone(),
            });
        }
        if category.subcategories.len() == 1 {
            return Err(ValidationError::LastDefaultSubcategory(category.name.clone()));
        }
    }

    let affected = item_count_for(&state.catalog, category_id, subcategory_id);
    let Some(category) = state.taxonomy.get_mut(category_id) else {
        return Err(unknown_category(category_id));
    };
    let removed = category.remove_subcategory(subcategory_id);

    let mut reassigned = 0;
    if affected > 0 {
        let (default_id, _) = category.ensure_default();
        for item in state
            .catalog
            .iter_mut()
            .filter(|i| i.category_id == category_id && i.subcategory_id == subcategory_id)
        {
            item.subcategory_id = default_id;
            item.touch_updated();
            reassigned += 1;
        }
    }
    if category.subcategories.is_empty() && !category.is_sentinel() {
        category.ensure_default();
    }
    category.touch();

    if let Some(removed) = removed {
        log::info!(
            "subcategory deleted: {} / {} ({} items moved to {})",
            category.name,
            removed.name,
            reassigned,
            DEFAULT_SUBCATEGORY
        );
    }
    Ok(reassigned)
}

/// Переименовать категорию. Ссылки товаров идут по ID и не ломаются.
pub fn rename_category(
    state: &mut InventoryState,
    category_id: CategoryId,
    new_name: &str,
) -> UseCaseResult<()> {
    let new_name = normalize_name(new_name)?;
    let category = state
        .taxonomy
        .get(category_id)
        .ok_or_else(|| unknown_category(category_id))?;
    if category.is_sentinel() {
        return Err(ValidationError::ProtectedCategory(category.name.clone()));
    }
    if let Some(existing) = state.taxonomy.by_name(&new_name) {
        if existing.id != category_id {
            return Err(ValidationError::DuplicateCategory(existing.name.clone()));
        }
    }

    if let Some(category) = state.taxonomy.get_mut(category_id) {
        log::info!("category renamed: {} -> {}", category.name, new_name);
        category.name = new_name;
        category.touch();
    }
    Ok(())
}

/// Переименовать подкатегорию. "Default" переименовать нельзя: это цель переназначения.
pub fn rename_subcategory(
    state: &mut InventoryState,
    category_id: CategoryId,
    subcategory_id: SubcategoryId,
    new_name: &str,
) -> UseCaseResult<()> {
    let new_name = normalize_name(new_name)?;
    let category = state
        .taxonomy
        .get_mut(category_id)
        .ok_or_else(|| unknown_category(category_id))?;
    let subcategory = category
        .subcategory(subcategory_id)
        .ok_or_else(|| unknown_subcategory(subcategory_id))?;
    if subcategory.is_default() {
        return Err(ValidationError::ProtectedSubcategory {
            category: category.name.clone(),
            name: subcategory.name.clone(),
        });
    }
    if let Some(existing) = category.subcategory_by_name(&new_name) {
        if existing.id != subcategory_id {
            return Err(ValidationError::DuplicateSubcategory {
                category: category.name.clone(),
                name: existing.name.clone(),
            });
        }
    }

    if let Some(subcategory) = category.subcategory_mut(subcategory_id) {
        log::info!("subcategory renamed: {} -> {}", subcategory.name, new_name);
        subcategory.name = new_name;
    }
    category.sort_subcategories();
    category.touch();
    Ok(())
}

/// Восстанавливает инвариант у состояния, загруженного из хранилища:
/// категория-страж с "Default" существует, висячие ссылки товаров исправлены.
/// Возвращает true, если состояние изменилось.
pub fn ensure_sentinel(state: &mut InventoryState) -> bool {
    let (_, mut changed) = state.taxonomy.ensure_sentinel();
    for item in state.catalog.iter_mut() {
        if validate_item_placement(&mut state.taxonomy, item).item_changed() {
            changed = true;
        }
    }
    if changed {
        log::warn!("stored inventory was inconsistent and has been repaired");
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::{Taxonomy, UNCATEGORIZED};
    use crate::domain::a002_inventory_item::{InventoryItem, Sizes};
    use crate::usecases::u501_taxonomy_consistency::item_count_for_category;

    fn item(state: &InventoryState, category: &str, subcategory: &str) -> InventoryItem {
        let category = state.taxonomy.by_name(category).unwrap();
        let subcategory = category.subcategory_by_name(subcategory).unwrap();
        InventoryItem::new_for_insert(
            format!("{} item", subcategory.name),
            format!("SKU-{}", subcategory.name),
            category.id,
            subcategory.id,
            Sizes::new(),
            20.0,
            None,
            None,
        )
    }

    fn state() -> InventoryState {
        let taxonomy = Taxonomy::new(vec![
            CategoryDefinition::with_subcategories(
                "Men",
                &["Casual Wear", "Cuban", "Default", "Oxford"],
            ),
            CategoryDefinition::with_subcategories("Women", &["Blouses", "Dresses"]),
            CategoryDefinition::new(UNCATEGORIZED),
        ]);
        let mut state = InventoryState::new(taxonomy, Vec::new());
        let items = vec![
            item(&state, "Men", "Casual Wear"),
            item(&state, "Men", "Casual Wear"),
            item(&state, "Men", "Oxford"),
            item(&state, "Women", "Dresses"),
        ];
        state.catalog = items;
        state
    }

    fn names(state: &InventoryState, category: &str) -> Vec<String> {
        state
            .taxonomy
            .by_name(category)
            .unwrap()
            .subcategory_names()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_add_category_creates_default_only() {
        let mut state = state();
        let id = add_category(&mut state, "  Kids ").unwrap();
        let category = state.taxonomy.get(id).unwrap();
        assert_eq!(category.name, "Kids");
        assert_eq!(category.subcategory_names(), vec!["Default"]);
        // Порядок вставки сохраняется
        assert_eq!(state.taxonomy.categories().last().unwrap().id, id);
    }

    #[test]
    fn test_add_category_rejects_duplicates_in_any_case() {
        let mut state = state();
        let before = state.clone();

        assert_eq!(
            add_category(&mut state, "men"),
            Err(ValidationError::DuplicateCategory("Men".into()))
        );
        assert_eq!(add_category(&mut state, "   "), Err(ValidationError::EmptyName));
        assert_eq!(state, before);
        assert_eq!(state.taxonomy.iter().filter(|c| c.name == "Men").count(), 1);
    }

    #[test]
    fn test_delete_category_moves_items_to_uncategorized() {
        let mut state = state();
        let men_id = state.taxonomy.by_name("Men").unwrap().id;

        let reassigned = delete_category(&mut state, men_id).unwrap();
        assert_eq!(reassigned, 3);
        assert!(state.taxonomy.by_name("Men").is_none());

        let sentinel = state.taxonomy.sentinel().unwrap();
        let default_id = sentinel.default_subcategory().unwrap().id;
        assert_eq!(item_count_for(&state.catalog, sentinel.id, default_id), 3);
        assert_eq!(names(&state, UNCATEGORIZED), vec!["Default"]);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_delete_category_rejects_sentinel() {
        let mut state = state();
        let before = state.clone();
        let sentinel_id = state.taxonomy.sentinel().unwrap().id;

        assert_eq!(
            delete_category(&mut state, sentinel_id),
            Err(ValidationError::ProtectedCategory(UNCATEGORIZED.into()))
        );
        assert!(delete_category(&mut state, CategoryId::new_v4()).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_subcategory_keeps_sorted_order() {
        let mut state = state();
        let women_id = state.taxonomy.by_name("Women").unwrap().id;
        add_subcategory(&mut state, women_id, "Zeta").unwrap();
        add_subcategory(&mut state, women_id, "Alpha").unwrap();
        assert_eq!(names(&state, "Women"), vec!["Alpha", "Blouses", "Dresses", "Zeta"]);
    }

    #[test]
    fn test_add_subcategory_into_empty_list() {
        let mut state = state();
        let id = state
            .taxonomy
            .push(CategoryDefinition::with_subcategories("Shoes", &[]));
        add_subcategory(&mut state, id, "Zeta").unwrap();
        add_subcategory(&mut state, id, "Alpha").unwrap();
        assert_eq!(names(&state, "Shoes"), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_add_subcategory_rejects_duplicates() {
        let mut state = state();
        let before = state.clone();
        let men_id = state.taxonomy.by_name("Men").unwrap().id;

        assert_eq!(
            add_subcategory(&mut state, men_id, "oxford"),
            Err(ValidationError::DuplicateSubcategory {
                category: "Men".into(),
                name: "Oxford".into(),
            })
        );
        assert_eq!(add_subcategory(&mut state, men_id, ""), Err(ValidationError::EmptyName));
        assert!(add_subcategory(&mut state, CategoryId::new_v4(), "Polo").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_delete_subcategory_moves_items_to_default() {
        let mut state = state();
        let men = state.taxonomy.by_name("Men").unwrap();
        let men_id = men.id;
        let casual_id = men.subcategory_by_name("Casual Wear").unwrap().id;
        let default_id = men.default_subcategory().unwrap().id;

        let reassigned = delete_subcategory(&mut state, men_id, casual_id).unwrap();
        assert_eq!(reassigned, 2);
        assert_eq!(names(&state, "Men"), vec!["Cuban", "Default", "Oxford"]);
        assert_eq!(item_count_for(&state.catalog, men_id, default_id), 2);
        assert_eq!(item_count_for_category(&state.catalog, men_id), 3);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_delete_subcategory_adds_missing_default() {
        let mut state = state();
        let women = state.taxonomy.by_name("Women").unwrap();
        let women_id = women.id;
        let dresses_id = women.subcategory_by_name("Dresses").unwrap().id;

        assert_eq!(delete_subcategory(&mut state, women_id, dresses_id), Ok(1));
        assert_eq!(names(&state, "Women"), vec!["Blouses", "Default"]);
        let item = state.catalog.iter().find(|i| i.category_id == women_id).unwrap();
        assert_eq!(state.placement_names(item), Some(("Women", "Default")));
    }

    #[test]
    fn test_delete_subcategory_without_items_keeps_list_as_is() {
        let mut state = state();
        let women = state.taxonomy.by_name("Women").unwrap();
        let women_id = women.id;
        let blouses_id = women.subcategory_by_name("Blouses").unwrap().id;

        assert_eq!(delete_subcategory(&mut state, women_id, blouses_id), Ok(0));
        assert_eq!(names(&state, "Women"), vec!["Dresses"]);
    }

    #[test]
    fn test_delete_last_subcategory_leaves_default() {
        let mut state = state();
        let id = state
            .taxonomy
            .push(CategoryDefinition::with_subcategories("Hats", &["Caps"]));
        let caps_id = state.taxonomy.get(id).unwrap().subcategories[0].id;

        assert_eq!(delete_subcategory(&mut state, id, caps_id), Ok(0));
        assert_eq!(names(&state, "Hats"), vec!["Default"]);
    }

    #[test]
    fn test_delete_subcategory_protects_sentinel_default() {
        let mut state = state();
        let before = state.clone();
        let sentinel = state.taxonomy.sentinel().unwrap();
        let (sentinel_id, default_id) = (sentinel.id, sentinel.default_subcategory().unwrap().id);

        assert!(matches!(
            delete_subcategory(&mut state, sentinel_id, default_id),
            Err(ValidationError::ProtectedSubcategory { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_delete_subcategory_rejects_only_default() {
        let mut state = state();
        let id = add_category(&mut state, "Kids").unwrap();
        let default_id = state.taxonomy.get(id).unwrap().subcategories[0].id;
        let before = state.clone();

        assert_eq!(
            delete_subcategory(&mut state, id, default_id),
            Err(ValidationError::LastDefaultSubcategory("Kids".into()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_delete_default_with_siblings_recreates_it_for_items() {
        let mut state = state();
        let men = state.taxonomy.by_name("Men").unwrap();
        let men_id = men.id;
        let default_id = men.default_subcategory().unwrap().id;
        let mut moved = item(&state, "Men", "Default");
        moved.subcategory_id = default_id;
        state.catalog.push(moved);

        assert_eq!(delete_subcategory(&mut state, men_id, default_id), Ok(1));
        let men = state.taxonomy.get(men_id).unwrap();
        let new_default = men.default_subcategory().unwrap().id;
        assert_ne!(new_default, default_id);
        assert_eq!(item_count_for(&state.catalog, men_id, new_default), 1);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_rename_category_keeps_links() {
        let mut state = state();
        let men_id = state.taxonomy.by_name("Men").unwrap().id;

        rename_category(&mut state, men_id, "Gentlemen").unwrap();
        assert!(state.taxonomy.by_name("Men").is_none());
        assert_eq!(item_count_for_category(&state.catalog, men_id), 3);
        assert!(state.is_consistent());

        // Смена регистра собственного имени допустима
        rename_category(&mut state, men_id, "GENTLEMEN").unwrap();
        assert_eq!(state.taxonomy.get(men_id).unwrap().name, "GENTLEMEN");
    }

    #[test]
    fn test_rename_category_rejections() {
        let mut state = state();
        let before = state.clone();
        let men_id = state.taxonomy.by_name("Men").unwrap().id;
        let sentinel_id = state.taxonomy.sentinel().unwrap().id;

        assert!(matches!(
            rename_category(&mut state, men_id, "women"),
            Err(ValidationError::DuplicateCategory(_))
        ));
        assert!(matches!(
            rename_category(&mut state, men_id, "uncategorized"),
            Err(ValidationError::DuplicateCategory(_))
        ));
        assert!(matches!(
            rename_category(&mut state, sentinel_id, "Misc"),
            Err(ValidationError::ProtectedCategory(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_rename_subcategory_resorts_list() {
        let mut state = state();
        let men = state.taxonomy.by_name("Men").unwrap();
        let men_id = men.id;
        let oxford_id = men.subcategory_by_name("Oxford").unwrap().id;
        let default_id = men.default_subcategory().unwrap().id;

        rename_subcategory(&mut state, men_id, oxford_id, "Button-Down").unwrap();
        assert_eq!(
            names(&state, "Men"),
            vec!["Button-Down", "Casual Wear", "Cuban", "Default"]
        );
        assert!(state.is_consistent());

        assert!(matches!(
            rename_subcategory(&mut state, men_id, default_id, "Other"),
            Err(ValidationError::ProtectedSubcategory { .. })
        ));
        assert!(matches!(
            rename_subcategory(&mut state, men_id, oxford_id, "cuban"),
            Err(ValidationError::DuplicateSubcategory { .. })
        ));
    }

    #[test]
    fn test_ensure_sentinel_repairs_loaded_state() {
        let mut state = state();
        let sentinel_id = state.taxonomy.sentinel().unwrap().id;
        state.taxonomy.remove(sentinel_id);
        state.catalog[0].category_id = CategoryId::new_v4();

        assert!(ensure_sentinel(&mut state));
        assert!(state.taxonomy.sentinel().is_some());
        assert!(state.is_consistent());
        assert_eq!(
            state.placement_names(&state.catalog[0]),
            Some((UNCATEGORIZED, DEFAULT_SUBCATEGORY))
        );

        assert!(!ensure_sentinel(&mut state));
    }

    #[test]
    fn test_invariant_holds_across_operation_sequence() {
        let mut state = state();
        let men_id = state.taxonomy.by_name("Men").unwrap().id;
        let women_id = state.taxonomy.by_name("Women").unwrap().id;

        let kids_id = add_category(&mut state, "Kids").unwrap();
        assert!(state.is_consistent());
        let toys_id = add_subcategory(&mut state, kids_id, "Toys").unwrap();
        let mut toy = item(&state, "Kids", "Toys");
        toy.subcategory_id = toys_id;
        state.catalog.push(toy);
        assert!(state.is_consistent());

        let cuban_id = state
            .taxonomy
            .get(men_id)
            .unwrap()
            .subcategory_by_name("Cuban")
            .unwrap()
            .id;
        delete_subcategory(&mut state, men_id, cuban_id).unwrap();
        assert!(state.is_consistent());
        delete_subcategory(&mut state, kids_id, toys_id).unwrap();
        assert!(state.is_consistent());
        delete_category(&mut state, women_id).unwrap();
        assert!(state.is_consistent());
        delete_category(&mut state, kids_id).unwrap();
        assert!(state.is_consistent());
        delete_category(&mut state, men_id).unwrap();
        assert!(state.is_consistent());

        assert_eq!(state.taxonomy.len(), 1);
        let sentinel = state.taxonomy.sentinel().unwrap();
        assert_eq!(item_count_for_category(&state.catalog, sentinel.id), 5);
    }
}
