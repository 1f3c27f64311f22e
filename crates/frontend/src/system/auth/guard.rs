use leptos::prelude::*;

use super::context::use_auth;
use crate::layout::global_context::{AppGlobalContext, Page};

/// Renders children only for a signed-in user
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().user_info.is_some()
            fallback=|| view! { <div class="access-denied">"Please sign in to view stock."</div> }
        >
            {children()}
        </Show>
    }
}

/// Renders children only for an admin; others get a way back to the stock page
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let is_admin = move || {
        auth_state.with(|s| s.user_info.as_ref().map(|u| u.is_admin).unwrap_or(false))
    };

    view! {
        <Show
            when=is_admin
            fallback=move || view! {
                <div class="access-denied">
                    <p>"Only administrators can manage items and categories."</p>
                    <button class="button button--secondary" on:click=move |_| ctx.open_page(Page::Stock)>
                        "Back to stock"
                    </button>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
