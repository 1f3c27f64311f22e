//! Снимки состояния в клиентском хранилище.
//!
//! Каждая коллекция хранится целиком под фиксированным ключом
//! ("items", "categories", "users") и полностью перезаписывается при
//! каждом изменении. Версии формата нет.

use crate::domain::a001_category::{CategoryDefinition, Taxonomy};
use crate::domain::a002_inventory_item::InventoryItem;
use crate::domain::common::AggregateRoot;
use crate::shared::{seed, InventoryState};
use crate::system::users::{self, User};
use crate::usecases::u501_taxonomy_consistency::ensure_sentinel;
use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

pub const USERS_KEY: &str = "users";

pub fn items_key() -> &'static str {
    InventoryItem::collection_name()
}

pub fn categories_key() -> &'static str {
    CategoryDefinition::collection_name()
}

/// Хранилище снимков "ключ -> строка"
pub trait SnapshotStore {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Хранилище в памяти (для тестов и окружений без localStorage)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Прочитать снимок. Повреждённый снимок логируется и считается отсутствующим.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn SnapshotStore, key: &str) -> Option<T> {
    let raw = store.load(key)?;
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("snapshot '{}' is unreadable, falling back to seed: {}", key, e);
            None
        }
    }
}

pub fn save_snapshot<T: Serialize + ?Sized>(
    store: &dyn SnapshotStore,
    key: &str,
    value: &T,
) -> anyhow::Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("failed to serialize snapshot '{}'", key))?;
    store
        .save(key, &raw)
        .with_context(|| format!("failed to write snapshot '{}'", key))
}

/// Загрузить таксономию и каталог; отсутствующие части заполняются
/// начальными данными, после чего восстанавливается инвариант.
pub fn load_or_seed(store: &dyn SnapshotStore) -> InventoryState {
    let taxonomy = load_snapshot::<Taxonomy>(store, categories_key()).unwrap_or_else(|| {
        log::info!("no stored categories, seeding defaults");
        seed::seed_taxonomy()
    });
    let catalog = load_snapshot::<Vec<InventoryItem>>(store, items_key()).unwrap_or_else(|| {
        log::info!("no stored items, seeding defaults");
        seed::seed_items(&taxonomy)
    });

    let dangling = catalog
        .iter()
        .filter(|i| !taxonomy.contains_pair(i.category_id, i.subcategory_id))
        .count();
    if dangling > 0 {
        log::warn!(
            "{} stored item(s) reference missing categories and will be reassigned",
            dangling
        );
    }

    let mut state = InventoryState::new(taxonomy, catalog);
    ensure_sentinel(&mut state);
    state
}

/// Записать оба снимка инвентаря целиком
pub fn persist(store: &dyn SnapshotStore, state: &InventoryState) -> anyhow::Result<()> {
    save_snapshot(store, categories_key(), &state.taxonomy)?;
    save_snapshot(store, items_key(), &state.catalog)?;
    Ok(())
}

pub fn load_users_or_seed(store: &dyn SnapshotStore) -> Vec<User> {
    load_snapshot::<Vec<User>>(store, USERS_KEY).unwrap_or_else(users::seed_users)
}

pub fn persist_users(store: &dyn SnapshotStore, users: &[User]) -> anyhow::Result<()> {
    save_snapshot(store, USERS_KEY, users)
}
