use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::app_store::AppStore;
use crate::shared::config::AppConfig;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    // Inventory state and users, restored from localStorage
    provide_context(AppStore::load(config));

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
