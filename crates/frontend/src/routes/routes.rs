use crate::domain::a001_category::ui::CategoryManager;
use crate::domain::a002_inventory_item::ui::list::InventoryItemList;
use crate::domain::a002_inventory_item::ui::stock::StockView;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::{RequireAdmin, RequireAuth};
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

/// Рендерит содержимое активной страницы
fn render_page(page: Page) -> AnyView {
    match page {
        Page::Stock => view! {
            <RequireAuth>
                <StockView />
            </RequireAuth>
        }
        .into_any(),
        Page::Items => view! {
            <RequireAdmin>
                <InventoryItemList />
            </RequireAdmin>
        }
        .into_any(),
        Page::Categories => view! {
            <RequireAdmin>
                <CategoryManager />
            </RequireAdmin>
        }
        .into_any(),
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <Shell>
            {move || render_page(ctx.active.get())}
        </Shell>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().user_info.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
