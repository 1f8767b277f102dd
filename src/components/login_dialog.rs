use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;

/// Client-side credential check. Runs before any request goes out.
fn parse_credentials(user_id: &str, password: &str) -> Result<i64, &'static str> {
    if user_id.trim().is_empty() || password.is_empty() {
        return Err("Both fields are required");
    }
    user_id
        .trim()
        .parse::<i64>()
        .map_err(|_| "User ID must be a number")
}

/// Modal login form. One attempt per click; invalid credentials or transport
/// failures leave the dialog open with an inline message.
#[component]
pub fn LoginDialog(
    open: ReadSignal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_login: Callback<i64>,
) -> impl IntoView {
    let (user_id, set_user_id) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let reset_fields = move || {
        set_user_id.set(String::new());
        set_password.set(String::new());
        set_error.set(None);
    };

    let submit = move || {
        let id = match parse_credentials(&user_id.get(), &password.get()) {
            Ok(id) => id,
            Err(msg) => {
                set_error.set(Some(msg.to_string()));
                return;
            }
        };
        let pass = password.get();
        spawn_local(async move {
            match api::login(id, &pass).await {
                Ok(true) => {
                    reset_fields();
                    on_login.run(id);
                    on_close.run(());
                }
                Ok(false) => set_error.set(Some("Invalid User ID or Password".to_string())),
                Err(e) => {
                    leptos::logging::error!("login request failed: {e}");
                    set_error.set(Some("Login failed. Please try again.".to_string()));
                }
            }
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
                <div class="dialog login-dialog" on:click=move |ev| ev.stop_propagation()>
                    <style>{include_str!("login_dialog.css")}</style>
                    <h2 class="login-title">"Login"</h2>
                    <div class="login-body">
                        <input
                            type="number"
                            class="login-input"
                            placeholder="Enter a numeric User ID"
                            prop:value=move || user_id.get()
                            on:input=move |ev| set_user_id.set(event_target_value(&ev))
                        />
                        <input
                            type="password"
                            class="login-input"
                            placeholder="Enter password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        {move || error.get().map(|msg| view! { <p class="login-error">{msg}</p> })}
                    </div>
                    <div class="login-actions">
                        <button
                            class="btn btn-secondary"
                            on:click=move |_| {
                                reset_fields();
                                on_close.run(());
                            }
                        >
                            "Cancel"
                        </button>
                        <button class="btn btn-primary" on:click=move |_| submit()>
                            "Login"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
