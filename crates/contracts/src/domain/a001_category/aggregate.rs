use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Категория-страж: существует всегда, удалить или переименовать нельзя
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Подкатегория по умолчанию, цель переназначения товаров
pub const DEFAULT_SUBCATEGORY: &str = "Default";

/// Сравнение имён без учёта регистра (правило уникальности категорий и подкатегорий)
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

// ============================================================================
// ID Types
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubcategoryId(pub Uuid);

impl SubcategoryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl AggregateId for SubcategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SubcategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Subcategory
// ============================================================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
}

impl Subcategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubcategoryId::new_v4(),
            name: name.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        same_name(&self.name, DEFAULT_SUBCATEGORY)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Определение категории со списком подкатегорий.
///
/// Список подкатегорий всегда отсортирован по имени; порядок категорий
/// задаёт [`Taxonomy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub id: CategoryId,
    pub name: String,
    pub subcategories: Vec<Subcategory>,
    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl CategoryDefinition {
    /// Новая категория с единственной подкатегорией "Default"
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_subcategories(name, &[DEFAULT_SUBCATEGORY])
    }

    pub fn with_subcategories(name: impl Into<String>, subcategories: &[&str]) -> Self {
        let mut category = Self {
            id: CategoryId::new_v4(),
            name: name.into(),
            subcategories: subcategories.iter().map(|s| Subcategory::new(*s)).collect(),
            metadata: EntityMetadata::new(),
        };
        category.sort_subcategories();
        category
    }

    pub fn is_sentinel(&self) -> bool {
        same_name(&self.name, UNCATEGORIZED)
    }

    pub fn subcategory(&self, id: SubcategoryId) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }

    pub fn subcategory_mut(&mut self, id: SubcategoryId) -> Option<&mut Subcategory> {
        self.subcategories.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: SubcategoryId) -> bool {
        self.subcategory(id).is_some()
    }

    /// Поиск подкатегории по имени без учёта регистра
    pub fn subcategory_by_name(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| same_name(&s.name, name))
    }

    pub fn default_subcategory(&self) -> Option<&Subcategory> {
        self.subcategory_by_name(DEFAULT_SUBCATEGORY)
    }

    pub fn subcategory_names(&self) -> Vec<&str> {
        self.subcategories.iter().map(|s| s.name.as_str()).collect()
    }

    /// Вставить подкатегорию с сохранением сортировки
    pub fn insert_subcategory(&mut self, subcategory: Subcategory) -> SubcategoryId {
        let id = subcategory.id;
        self.subcategories.push(subcategory);
        self.sort_subcategories();
        id
    }

    pub fn remove_subcategory(&mut self, id: SubcategoryId) -> Option<Subcategory> {
        let index = self.subcategories.iter().position(|s| s.id == id)?;
        Some(self.subcategories.remove(index))
    }

    /// Гарантирует наличие "Default"; возвращает его ID и признак добавления
    pub fn ensure_default(&mut self) -> (SubcategoryId, bool) {
        match self.default_subcategory() {
            Some(existing) => (existing.id, false),
            None => (self.insert_subcategory(Subcategory::new(DEFAULT_SUBCATEGORY)), true),
        }
    }

    pub fn sort_subcategories(&mut self) {
        self.subcategories.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}

impl AggregateRoot for CategoryDefinition {
    fn collection_name() -> &'static str {
        "categories"
    }
}

// ============================================================================
// Taxonomy
// ============================================================================

/// Упорядоченный набор категорий (порядок вставки сохраняется)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    categories: Vec<CategoryDefinition>,
}

impl Taxonomy {
    pub fn new(categories: Vec<CategoryDefinition>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CategoryId) -> Option<&mut CategoryDefinition> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Поиск категории по имени без учёта регистра
    pub fn by_name(&self, name: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| same_name(&c.name, name))
    }

    pub fn sentinel(&self) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.is_sentinel())
    }

    /// Пара (категория, подкатегория) существует
    pub fn contains_pair(&self, category_id: CategoryId, subcategory_id: SubcategoryId) -> bool {
        self.get(category_id)
            .map(|c| c.contains(subcategory_id))
            .unwrap_or(false)
    }

    /// Отображаемые имена пары; None для висячей ссылки
    pub fn resolve(
        &self,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
    ) -> Option<(&str, &str)> {
        let category = self.get(category_id)?;
        let subcategory = category.subcategory(subcategory_id)?;
        Some((category.name.as_str(), subcategory.name.as_str()))
    }

    pub fn push(&mut self, category: CategoryDefinition) -> CategoryId {
        let id = category.id;
        self.categories.push(category);
        id
    }

    pub fn remove(&mut self, id: CategoryId) -> Option<CategoryDefinition> {
        let index = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(index))
    }

    /// Восстанавливает категорию-страж с подкатегорией "Default".
    /// Возвращает пару ID стража и признак изменения таксономии.
    pub fn ensure_sentinel(&mut self) -> ((CategoryId, SubcategoryId), bool) {
        if let Some(sentinel) = self.categories.iter_mut().find(|c| c.is_sentinel()) {
            let (default_id, added) = sentinel.ensure_default();
            return ((sentinel.id, default_id), added);
        }
        let sentinel = CategoryDefinition::new(UNCATEGORIZED);
        let default_id = sentinel.subcategories[0].id;
        let sentinel_id = self.push(sentinel);
        ((sentinel_id, default_id), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_has_only_default() {
        let category = CategoryDefinition::new("Kids");
        assert_eq!(category.subcategory_names(), vec!["Default"]);
        assert!(category.default_subcategory().is_some());
        assert!(!category.is_sentinel());
    }

    #[test]
    fn test_subcategories_sorted_on_insert() {
        let mut category = CategoryDefinition::with_subcategories("Shoes", &[]);
        category.insert_subcategory(Subcategory::new("Zeta"));
        category.insert_subcategory(Subcategory::new("Alpha"));
        assert_eq!(category.subcategory_names(), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let taxonomy = Taxonomy::new(vec![CategoryDefinition::new("Men")]);
        assert!(taxonomy.by_name("men").is_some());
        assert!(taxonomy.by_name("MEN").is_some());
        assert!(taxonomy.by_name("Women").is_none());
    }

    #[test]
    fn test_ensure_sentinel_creates_missing_category() {
        let mut taxonomy = Taxonomy::new(vec![CategoryDefinition::new("Men")]);
        let ((sentinel_id, default_id), changed) = taxonomy.ensure_sentinel();
        assert!(changed);
        assert_eq!(taxonomy.len(), 2);
        assert_eq!(
            taxonomy.resolve(sentinel_id, default_id),
            Some((UNCATEGORIZED, DEFAULT_SUBCATEGORY))
        );

        let (_, changed_again) = taxonomy.ensure_sentinel();
        assert!(!changed_again);
        assert_eq!(taxonomy.len(), 2);
    }

    #[test]
    fn test_ensure_sentinel_restores_default() {
        let mut taxonomy = Taxonomy::new(vec![CategoryDefinition::with_subcategories(
            UNCATEGORIZED,
            &["Misc"],
        )]);
        let (_, changed) = taxonomy.ensure_sentinel();
        assert!(changed);
        let sentinel = taxonomy.sentinel().unwrap();
        assert_eq!(sentinel.subcategory_names(), vec!["Default", "Misc"]);
    }

    #[test]
    fn test_taxonomy_serializes_as_plain_array() {
        let taxonomy = Taxonomy::new(vec![CategoryDefinition::new("Men")]);
        let json = serde_json::to_value(&taxonomy).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Men");
        assert_eq!(json[0]["subcategories"][0]["name"], "Default");
    }
}
