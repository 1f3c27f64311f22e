//! Reactive application store.
//!
//! Holds the inventory state and the user registry in signals. Every
//! successful mutation computes the next state from a copy, writes the full
//! snapshot to localStorage and only then publishes it to the UI. A rejected
//! operation leaves both the signal and storage untouched.

use contracts::shared::snapshot;
use contracts::shared::InventoryState;
use contracts::system::auth::{AuthError, LoginRequest, UserInfo};
use contracts::system::users::{CreateUserDto, UserRegistry};
use contracts::usecases::common::UseCaseResult;
use contracts::usecases::u501_taxonomy_consistency::{transition, Outcome, TaxonomyCommand};
use leptos::prelude::*;

use super::config::AppConfig;
use super::local_storage::LocalStorageStore;

#[derive(Clone, Copy)]
pub struct AppStore {
    pub state: RwSignal<InventoryState>,
    pub users: RwSignal<UserRegistry>,
    pub config: StoredValue<AppConfig>,
}

impl AppStore {
    /// Load snapshots (or seed them on first run) and persist the result
    pub fn load(config: AppConfig) -> Self {
        let storage = LocalStorageStore::new(config.storage.prefix.clone());
        let state = snapshot::load_or_seed(&storage);
        let users = snapshot::load_users_or_seed(&storage);

        if let Err(e) = snapshot::persist(&storage, &state) {
            log::error!("failed to persist inventory: {:#}", e);
        }
        if let Err(e) = snapshot::persist_users(&storage, &users) {
            log::error!("failed to persist users: {:#}", e);
        }

        log::info!(
            "inventory loaded: {} categories, {} items",
            state.taxonomy.len(),
            state.catalog.len()
        );

        Self {
            state: RwSignal::new(state),
            users: RwSignal::new(UserRegistry::new(users)),
            config: StoredValue::new(config),
        }
    }

    fn storage(&self) -> LocalStorageStore {
        self.config
            .with_value(|c| LocalStorageStore::new(c.storage.prefix.clone()))
    }

    pub fn max_image_bytes(&self) -> u64 {
        self.config.with_value(|c| c.images.max_bytes)
    }

    fn commit(&self, next: InventoryState) {
        if let Err(e) = snapshot::persist(&self.storage(), &next) {
            log::error!("failed to persist inventory: {:#}", e);
        }
        self.state.set(next);
    }

    /// Apply a catalog operation to a copy of the state; publish on success
    pub fn mutate<T>(
        &self,
        operation: impl FnOnce(&mut InventoryState) -> UseCaseResult<T>,
    ) -> UseCaseResult<T> {
        let mut next = self.state.get_untracked();
        match operation(&mut next) {
            Ok(result) => {
                self.commit(next);
                Ok(result)
            }
            Err(e) => {
                log::debug!("operation rejected [{}]: {}", e.code(), e);
                Err(e)
            }
        }
    }

    /// Run a taxonomy command through the pure transition
    pub fn dispatch(&self, command: &TaxonomyCommand) -> UseCaseResult<Outcome> {
        let result = self.state.with_untracked(|state| transition(state, command));
        match result {
            Ok((next, outcome)) => {
                self.commit(next);
                Ok(outcome)
            }
            Err(e) => {
                log::debug!("taxonomy command rejected [{}]: {}", e.code(), e);
                Err(e)
            }
        }
    }

    pub fn register(&self, dto: &CreateUserDto) -> Result<UserInfo, AuthError> {
        let mut registry = self.users.get_untracked();
        let info = registry.register(dto)?;
        if let Err(e) = snapshot::persist_users(&self.storage(), registry.users()) {
            log::error!("failed to persist users: {:#}", e);
        }
        self.users.set(registry);
        Ok(info)
    }

    pub fn authenticate(&self, request: &LoginRequest) -> Result<UserInfo, AuthError> {
        self.users.with_untracked(|registry| registry.authenticate(request))
    }
}

/// Hook to access the application store
pub fn use_app_store() -> AppStore {
    use_context::<AppStore>().expect("AppStore not found in component tree")
}
