use contracts::system::auth::{LoginRequest, UserInfo};
use contracts::system::users::CreateUserDto;
use leptos::prelude::*;

use crate::shared::app_store::AppStore;

/// Сессия живёт только в памяти вкладки
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user_info: Option<UserInfo>,
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Perform login against the local user registry
pub fn do_login(
    store: AppStore,
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), String> {
    let user_info = store
        .authenticate(&LoginRequest { username, password })
        .map_err(|e| e.to_string())?;

    log::info!("logged in: {}", user_info.username);
    set_auth_state.set(AuthState {
        user_info: Some(user_info),
    });
    Ok(())
}

/// Helper: Register a regular user and sign them in
pub fn do_register(
    store: AppStore,
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), String> {
    let user_info = store
        .register(&CreateUserDto { username, password })
        .map_err(|e| e.to_string())?;

    set_auth_state.set(AuthState {
        user_info: Some(user_info),
    });
    Ok(())
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    log::info!("logged out");
    set_auth_state.set(AuthState::default());
}
