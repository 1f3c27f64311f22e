use crate::domain::a002_inventory_item::{InventoryItem, InventoryItemDto, ItemId, SizeLabel};
use crate::domain::common::AggregateId;
use crate::shared::InventoryState;
use crate::usecases::common::{UseCaseResult, ValidationError};
use crate::usecases::u501_taxonomy_consistency::validate_item_placement;

fn parse_item_id(id: Option<&String>) -> UseCaseResult<ItemId> {
    let raw = id.ok_or_else(|| ValidationError::UnknownItem(String::new()))?;
    ItemId::from_string(raw).map_err(|_| ValidationError::UnknownItem(raw.clone()))
}

/// Добавить товар. Размещение исправляется движком таксономии.
pub fn add_item(state: &mut InventoryState, dto: &InventoryItemDto) -> UseCaseResult<ItemId> {
    let mut item = InventoryItem::new_from_dto(dto);
    item.validate().map_err(ValidationError::InvalidItem)?;

    validate_item_placement(&mut state.taxonomy, &mut item);
    item.before_write();

    let id = item.base.id;
    log::info!("item added: {} ({})", item.name(), item.sku());
    state.catalog.push(item);
    Ok(id)
}

/// Обновить товар по данным формы
pub fn update_item(state: &mut InventoryState, dto: &InventoryItemDto) -> UseCaseResult<()> {
    let id = parse_item_id(dto.id.as_ref())?;
    let index = state
        .catalog
        .iter()
        .position(|i| i.base.id == id)
        .ok_or_else(|| ValidationError::UnknownItem(id.as_string()))?;

    let mut item = state.catalog[index].clone();
    item.update(dto);
    item.validate().map_err(ValidationError::InvalidItem)?;

    validate_item_placement(&mut state.taxonomy, &mut item);
    item.before_write();

    log::info!("item updated: {} ({})", item.name(), item.sku());
    state.catalog[index] = item;
    Ok(())
}

pub fn delete_item(state: &mut InventoryState, id: ItemId) -> UseCaseResult<InventoryItem> {
    let index = state
        .catalog
        .iter()
        .position(|i| i.base.id == id)
        .ok_or_else(|| ValidationError::UnknownItem(id.as_string()))?;
    let removed = state.catalog.remove(index);
    log::info!("item deleted: {} ({})", removed.name(), removed.sku());
    Ok(removed)
}

/// Списать проданное количество; возвращает остаток по размеру
pub fn record_sale(
    state: &mut InventoryState,
    id: ItemId,
    size: SizeLabel,
    quantity: u32,
) -> UseCaseResult<u32> {
    if quantity == 0 {
        return Err(ValidationError::InvalidQuantity);
    }
    let item = state
        .item_mut(id)
        .ok_or_else(|| ValidationError::UnknownItem(id.as_string()))?;

    let available = item.sizes.get(size);
    if quantity > available {
        return Err(ValidationError::InsufficientStock {
            size: size.to_string(),
            available,
        });
    }

    let remaining = available - quantity;
    item.sizes.set(size, remaining);
    item.touch_updated();
    log::info!(
        "sale recorded: {} size {} x{} ({} left)",
        item.sku(),
        size,
        quantity,
        remaining
    );
    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::{CategoryId, DEFAULT_SUBCATEGORY, UNCATEGORIZED};
    use crate::domain::a002_inventory_item::Sizes;
    use crate::shared::seed;
    use crate::usecases::u501_taxonomy_consistency::item_count_for;

    fn dto_for(state: &InventoryState, category: &str, subcategory: &str) -> InventoryItemDto {
        let category = state.taxonomy.by_name(category).unwrap();
        InventoryItemDto {
            name: "Polo Shirt".into(),
            sku: "MEN-POL-001".into(),
            category_id: Some(category.id),
            subcategory_id: category.subcategory_by_name(subcategory).map(|s| s.id),
            sizes: Sizes::from_pairs(&[(SizeLabel::M, 4)]),
            price: 29.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_add_item_increments_pair_count() {
        let mut state = seed::seed_state();
        let men = state.taxonomy.by_name("Men").unwrap();
        let (men_id, oxford_id) = (men.id, men.subcategory_by_name("Oxford").unwrap().id);
        let before = item_count_for(&state.catalog, men_id, oxford_id);

        let dto = dto_for(&state, "Men", "Oxford");
        let id = add_item(&mut state, &dto).unwrap();

        assert_eq!(item_count_for(&state.catalog, men_id, oxford_id), before + 1);
        assert_eq!(state.item(id).unwrap().name(), "Polo Shirt");
    }

    #[test]
    fn test_add_item_without_category_lands_in_sentinel() {
        let mut state = seed::seed_state();
        let mut dto = dto_for(&state, "Men", "Oxford");
        dto.category_id = None;
        dto.subcategory_id = None;

        let id = add_item(&mut state, &dto).unwrap();
        let item = state.item(id).unwrap();
        assert_eq!(
            state.placement_names(item),
            Some((UNCATEGORIZED, DEFAULT_SUBCATEGORY))
        );
    }

    #[test]
    fn test_add_item_rejects_invalid_fields() {
        let mut state = seed::seed_state();
        let before = state.clone();
        let mut dto = dto_for(&state, "Men", "Oxford");
        dto.price = -5.0;
        assert!(matches!(
            add_item(&mut state, &dto),
            Err(ValidationError::InvalidItem(_))
        ));
        dto.price = 5.0;
        dto.sku = "  ".into();
        assert!(add_item(&mut state, &dto).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_update_item_with_unknown_category_is_repaired() {
        let mut state = seed::seed_state();
        let mut dto = InventoryItemDto::from(&state.catalog[0]);
        dto.name = "Oxford Slim".into();
        dto.category_id = Some(CategoryId::new_v4());

        update_item(&mut state, &dto).unwrap();
        let item = &state.catalog[0];
        assert_eq!(item.name(), "Oxford Slim");
        assert_eq!(
            state.placement_names(item),
            Some((UNCATEGORIZED, DEFAULT_SUBCATEGORY))
        );
        assert!(state.is_consistent());
    }

    #[test]
    fn test_update_item_unknown_id() {
        let mut state = seed::seed_state();
        let mut dto = InventoryItemDto::from(&state.catalog[0]);
        dto.id = Some(ItemId::new_v4().as_string());
        assert!(matches!(
            update_item(&mut state, &dto),
            Err(ValidationError::UnknownItem(_))
        ));
        dto.id = None;
        assert!(update_item(&mut state, &dto).is_err());
    }

    #[test]
    fn test_delete_item() {
        let mut state = seed::seed_state();
        let id = state.catalog[1].base.id;
        let removed = delete_item(&mut state, id).unwrap();
        assert_eq!(removed.sku(), "MEN-CUB-001");
        assert_eq!(state.catalog.len(), 4);
        assert!(delete_item(&mut state, id).is_err());
    }

    #[test]
    fn test_record_sale_decrements_size() {
        let mut state = seed::seed_state();
        let id = state.catalog[0].base.id;
        let stock = state.catalog[0].sizes.get(SizeLabel::M);

        assert_eq!(record_sale(&mut state, id, SizeLabel::M, 2), Ok(stock - 2));
        assert_eq!(state.catalog[0].sizes.get(SizeLabel::M), stock - 2);
    }

    #[test]
    fn test_record_sale_rejections() {
        let mut state = seed::seed_state();
        let before = state.clone();
        let id = state.catalog[0].base.id;

        assert_eq!(
            record_sale(&mut state, id, SizeLabel::M, 0),
            Err(ValidationError::InvalidQuantity)
        );
        assert_eq!(
            record_sale(&mut state, id, SizeLabel::XS, 1),
            Err(ValidationError::InsufficientStock {
                size: "XS".into(),
                available: 0
            })
        );
        assert!(record_sale(&mut state, ItemId::new_v4(), SizeLabel::M, 1).is_err());
        assert_eq!(state, before);
    }
}
