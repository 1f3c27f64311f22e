//! TopHeader component - application top navigation bar.
//!
//! Contains:
//! - Application title
//! - Page navigation (admin pages only for admins)
//! - User info and logout

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // Get auth context for user info
    let (auth_state, set_auth_state) = use_auth();

    let is_admin = move || {
        auth_state
            .get()
            .user_info
            .as_ref()
            .map(|u| u.is_admin)
            .unwrap_or(false)
    };

    let logout = move |_| {
        do_logout(set_auth_state);
        ctx.reset();
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                {icon("inventory")}
                <span class="top-header__title">"Stock Room"</span>
            </div>

            <nav class="top-header__nav">
                {Page::all()
                    .into_iter()
                    .map(move |page| {
                        view! {
                            <Show when=move || !page.requires_admin() || is_admin()>
                                <button
                                    class="top-header__nav-btn"
                                    class:active=move || ctx.active.get() == page
                                    on:click=move |_| ctx.open_page(page)
                                >
                                    {icon(page.icon_name())}
                                    {page.title()}
                                </button>
                            </Show>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="top-header__actions">
                // User info
                <div class="top-header__user">
                    <span>
                        {move || auth_state.get().user_info
                            .map(|u| if u.is_admin { format!("{} (admin)", u.username) } else { u.username })
                            .unwrap_or_else(|| "Guest".to_string())}
                    </span>
                </div>

                // Logout
                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
