use anyhow::anyhow;
use contracts::shared::snapshot::SnapshotStore;
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Read a raw value from localStorage
pub fn get_raw(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

/// Снимки состояния в localStorage браузера
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalStorageStore {
    prefix: String,
}

impl LocalStorageStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl SnapshotStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<String> {
        get_raw(&self.storage_key(key))
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let storage = get_local_storage().ok_or_else(|| anyhow!("localStorage is not available"))?;
        storage
            .set_item(&self.storage_key(key), value)
            .map_err(|e| anyhow!("localStorage write failed: {:?}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_uses_prefix() {
        assert_eq!(LocalStorageStore::default().storage_key("items"), "items");
        assert_eq!(
            LocalStorageStore::new("stockroom.").storage_key("categories"),
            "stockroom.categories"
        );
    }
}
