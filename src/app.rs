use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, Product};
use crate::components::login_dialog::LoginDialog;
use crate::components::product_card::ProductCard;
use crate::components::product_details_dialog::ProductDetailsDialog;
use crate::state::{Feed, Season, INITIAL_SEASON_PAGE, LOAD_MORE_PAGE};

/// Shell: session state, season filter, the product grid, and both dialogs.
#[component]
pub fn App() -> impl IntoView {
    let (user_id, set_user_id) = signal::<Option<i64>>(None);
    let (login_checked, set_login_checked) = signal(false);
    let (season, set_season) = signal(Season::default());
    let (feed, set_feed) = signal(Feed::default());
    let (loading_products, set_loading_products) = signal(true);
    let (loading_more, set_loading_more) = signal(false);
    let (selected_product, set_selected_product) = signal::<Option<Product>>(None);
    let (login_open, set_login_open) = signal(false);
    let (season_menu_open, set_season_menu_open) = signal(false);
    let (user_menu_open, set_user_menu_open) = signal(false);

    // Session check runs once on mount; the feed effect below stays idle
    // until it resolves so the two feed sources cannot race.
    Effect::new(move |_| {
        spawn_local(async move {
            match api::check_login().await {
                Ok(status) if status.logged_in => set_user_id.set(status.user_id),
                Ok(_) => set_user_id.set(None),
                Err(e) => leptos::logging::error!("login status check failed: {e}"),
            }
            set_login_checked.set(true);
        });
    });

    // Exactly one feed source per (session, season): personalized when logged
    // in, seasonal otherwise. Replaces the feed wholesale on every rerun.
    Effect::new(move |_| {
        if !login_checked.get() {
            return;
        }
        let season = season.get();
        let user = user_id.get();

        set_loading_products.set(true);
        spawn_local(async move {
            let result = match user {
                Some(_) => api::user_recommendations(season, LOAD_MORE_PAGE, 0).await,
                None => api::season_recommendations(season, 0, INITIAL_SEASON_PAGE).await,
            };
            match result {
                Ok(items) => set_feed.update(|feed| feed.replace(items)),
                Err(e) => leptos::logging::error!("feed fetch failed: {e}"),
            }
            set_loading_products.set(false);
        });
    });

    let load_more = move || {
        set_loading_more.set(true);
        let season_now = season.get();
        match user_id.get() {
            Some(_) => {
                let offset = feed.get().products.len();
                spawn_local(async move {
                    match api::user_recommendations(season_now, LOAD_MORE_PAGE, offset).await {
                        Ok(items) => set_feed.update(|feed| feed.append_user(items)),
                        Err(e) => leptos::logging::error!("load more failed: {e}"),
                    }
                    set_loading_more.set(false);
                });
            }
            None => {
                // The backend's seasonal cursor starts after the initial page.
                let offset = feed.get().offset + INITIAL_SEASON_PAGE;
                spawn_local(async move {
                    match api::season_recommendations(season_now, offset, LOAD_MORE_PAGE).await {
                        Ok(items) => set_feed.update(|feed| feed.append_guest(items)),
                        Err(e) => leptos::logging::error!("load more failed: {e}"),
                    }
                    set_loading_more.set(false);
                });
            }
        }
    };

    let handle_login = move |id: i64| {
        set_user_id.set(Some(id));
        set_feed.update(|feed| feed.reset());
        set_loading_products.set(true);
    };

    let handle_logout = move || {
        set_user_menu_open.set(false);
        spawn_local(async move {
            match api::logout().await {
                Ok(true) => {
                    // One atomic reset back to the guest view; the feed
                    // effect repopulates it.
                    set_user_id.set(None);
                    set_season.set(Season::default());
                    set_selected_product.set(None);
                    set_login_open.set(false);
                    set_feed.update(|feed| feed.reset());
                    set_loading_products.set(true);
                }
                Ok(false) => leptos::logging::error!("logout rejected by backend"),
                Err(e) => leptos::logging::error!("logout failed: {e}"),
            }
        });
    };

    view! {
        <div class="app-shell">
            <style>{include_str!("app.css")}</style>

            <header class="app-bar">
                <h1 class="app-title">"The Grand Mall"</h1>
                <div class="app-bar-actions">
                    <div class="menu-anchor">
                        <button
                            class="btn btn-bar"
                            on:click=move |_| set_season_menu_open.update(|open| *open = !*open)
                        >
                            {move || format!("Season: {}", season.get().as_str())}
                        </button>
                        <Show when=move || season_menu_open.get()>
                            <div class="menu">
                                {Season::ALL
                                    .into_iter()
                                    .map(|s| {
                                        view! {
                                            <div
                                                class="menu-item"
                                                class:active=move || season.get() == s
                                                on:click=move |_| {
                                                    set_season.set(s);
                                                    set_season_menu_open.set(false);
                                                }
                                            >
                                                {s.as_str()}
                                                <Show when=move || season.get() == s>
                                                    <span class="menu-check">"\u{2713}"</span>
                                                </Show>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </Show>
                    </div>

                    {move || match user_id.get() {
                        Some(id) => {
                            view! {
                                <div class="menu-anchor">
                                    <button
                                        class="btn btn-bar"
                                        on:click=move |_| {
                                            set_user_menu_open.update(|open| *open = !*open)
                                        }
                                    >
                                        {format!("User: {id}")}
                                    </button>
                                    <Show when=move || user_menu_open.get()>
                                        <div class="menu">
                                            <div
                                                class="menu-item"
                                                on:click=move |_| handle_logout()
                                            >
                                                "Logout"
                                            </div>
                                        </div>
                                    </Show>
                                </div>
                            }
                                .into_any()
                        }
                        None => {
                            view! {
                                <button
                                    class="btn btn-bar"
                                    on:click=move |_| set_login_open.set(true)
                                >
                                    "Login"
                                </button>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </header>

            <main class="content">
                {move || {
                    if loading_products.get() {
                        view! {
                            <div class="loading-spinner">
                                <div class="spinner"></div>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <div class="product-grid">
                                <For
                                    each=move || feed.get().products
                                    key=|p| p.product_id.clone()
                                    children=move |product| {
                                        view! {
                                            <ProductCard
                                                product=product
                                                on_select=move |p| set_selected_product.set(Some(p))
                                            />
                                        }
                                    }
                                />
                            </div>
                        }
                            .into_any()
                    }
                }}

                <Show when=move || !loading_products.get() && feed.get().more_available()>
                    <div class="load-more-row">
                        {move || {
                            if loading_more.get() {
                                view! { <div class="spinner spinner-small"></div> }.into_any()
                            } else {
                                view! {
                                    <button
                                        class="btn btn-primary"
                                        on:click=move |_| load_more()
                                    >
                                        "Load More"
                                    </button>
                                }
                                    .into_any()
                            }
                        }}
                    </div>
                </Show>
            </main>

            <ProductDetailsDialog
                selected=selected_product
                on_close=move |_| set_selected_product.set(None)
            />

            <LoginDialog
                open=login_open
                on_close=move |_| set_login_open.set(false)
                on_login=move |id| handle_login(id)
            />
        </div>
    }
}
