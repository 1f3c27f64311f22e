use crate::domain::a001_category::{CategoryId, SubcategoryId};
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sizes::Sizes;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for ItemId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ItemId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар каталога.
///
/// `base.code` хранит SKU, `base.description` наименование,
/// `base.comment` необязательное описание.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(flatten)]
    pub base: BaseAggregate<ItemId>,

    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,

    #[serde(rename = "subcategoryId")]
    pub subcategory_id: SubcategoryId,

    #[serde(default)]
    pub sizes: Sizes,

    #[serde(default)]
    pub price: f64,

    /// Изображение, уже закодированное вызывающей стороной (data URL)
    #[serde(default)]
    pub image: Option<String>,
}

impl InventoryItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        name: String,
        sku: String,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
        sizes: Sizes,
        price: f64,
        description: Option<String>,
        image: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ItemId::new_v4(), sku, name);
        base.comment = description;

        Self {
            base,
            category_id,
            subcategory_id,
            sizes,
            price,
            image,
        }
    }

    /// Новый товар из формы; ID назначается заново, размещение без проверки
    pub fn new_from_dto(dto: &InventoryItemDto) -> Self {
        let mut item = Self::new_for_insert(
            String::new(),
            String::new(),
            CategoryId(Uuid::nil()),
            SubcategoryId(Uuid::nil()),
            Sizes::default(),
            0.0,
            None,
            None,
        );
        item.update(dto);
        item
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn sku(&self) -> &str {
        &self.base.code
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Перенос полей формы в агрегат. Размещение копируется как есть,
    /// его корректность проверяет движок таксономии.
    pub fn update(&mut self, dto: &InventoryItemDto) {
        self.base.description = dto.name.trim().to_string();
        self.base.code = dto.sku.trim().to_string();
        self.base.comment = dto
            .description
            .as_ref()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.category_id = dto.category_id.unwrap_or(CategoryId(Uuid::nil()));
        self.subcategory_id = dto.subcategory_id.unwrap_or(SubcategoryId(Uuid::nil()));
        self.sizes = dto.sizes.clone();
        self.price = dto.price;
        self.image = dto.image.clone().filter(|i| !i.is_empty());
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("SKU must not be empty".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Price must be a non-negative number".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for InventoryItem {
    fn collection_name() -> &'static str {
        "items"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InventoryItemDto {
    pub id: Option<String>,
    pub name: String,
    pub sku: String,
    #[serde(rename = "categoryId")]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "subcategoryId")]
    pub subcategory_id: Option<SubcategoryId>,
    #[serde(default)]
    pub sizes: Sizes,
    #[serde(default)]
    pub price: f64,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<&InventoryItem> for InventoryItemDto {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: Some(item.to_string_id()),
            name: item.base.description.clone(),
            sku: item.base.code.clone(),
            category_id: Some(item.category_id),
            subcategory_id: Some(item.subcategory_id),
            sizes: item.sizes.clone(),
            price: item.price,
            description: item.base.comment.clone(),
            image: item.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_inventory_item::SizeLabel;

    fn sample() -> InventoryItem {
        InventoryItem::new_for_insert(
            "Oxford Shirt".into(),
            "MEN-OX-001".into(),
            CategoryId::new_v4(),
            SubcategoryId::new_v4(),
            Sizes::from_pairs(&[(SizeLabel::M, 3)]),
            49.9,
            None,
            None,
        )
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut item = sample();
        assert!(item.validate().is_ok());

        item.base.description = "  ".into();
        assert!(item.validate().is_err());

        let mut item = sample();
        item.base.code = String::new();
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_price() {
        let mut item = sample();
        item.price = -1.0;
        assert!(item.validate().is_err());
        item.price = f64::NAN;
        assert!(item.validate().is_err());
        item.price = 0.0;
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_update_trims_and_drops_blank_description() {
        let mut item = sample();
        let mut dto = InventoryItemDto::from(&item);
        dto.name = "  Linen Shirt ".into();
        dto.description = Some("   ".into());
        dto.image = Some(String::new());
        item.update(&dto);

        assert_eq!(item.name(), "Linen Shirt");
        assert_eq!(item.base.comment, None);
        assert_eq!(item.image, None);
    }

    #[test]
    fn test_item_json_uses_flat_fields() {
        let item = sample();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["code"], "MEN-OX-001");
        assert_eq!(json["description"], "Oxford Shirt");
        assert_eq!(json["sizes"]["M"], 3);
        assert!(json.get("categoryId").is_some());
    }
}
