use leptos::prelude::*;

use crate::shared::app_store::use_app_store;
use crate::system::auth::context::{do_login, do_register, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_register, set_is_register) = signal(false);

    let store = use_app_store();
    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();
        set_error_message.set(None);

        let result = if is_register.get() {
            do_register(store, set_auth_state, username_val, password_val)
        } else {
            do_login(store, set_auth_state, username_val, password_val)
        };

        if let Err(e) = result {
            set_error_message.set(Some(e));
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Stock Room"</h1>
                <h2>{move || if is_register.get() { "Create account" } else { "Sign in" }}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            placeholder="admin"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="admin"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <button type="submit" class="btn-primary">
                        {move || if is_register.get() { "Register" } else { "Sign in" }}
                    </button>
                </form>

                <button
                    class="button button--link"
                    on:click=move |_| {
                        set_error_message.set(None);
                        set_is_register.update(|r| *r = !*r);
                    }
                >
                    {move || if is_register.get() {
                        "Already have an account? Sign in"
                    } else {
                        "No account yet? Register"
                    }}
                </button>

                <div class="login-info">
                    <p>"Default admin:"</p>
                    <p>"Username: " <strong>"admin"</strong></p>
                    <p>"Password: " <strong>"admin"</strong></p>
                </div>
            </div>
        </div>
    }
}
