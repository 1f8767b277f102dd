use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, Product};
use crate::components::product_card::category_image;
use crate::state::{stage_candidates, REVEAL_STRIDE_MS};

/// Product detail modal with a related-items grid.
///
/// The dialog keeps its own pivot (`current`): clicking a related card
/// promotes it without closing the dialog. Each pivot starts a fresh
/// related-items cycle; a generation counter ties together the fetch and its
/// reveal timers so that a pivot or close cancels both, and a response that
/// arrives for an older pivot is discarded rather than populating newer
/// state.
#[component]
pub fn ProductDetailsDialog(
    selected: ReadSignal<Option<Product>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let (current, set_current) = signal::<Option<Product>>(None);
    let (revealed, set_revealed) = signal::<Vec<Product>>(vec![]);
    let (loading, set_loading) = signal(false);

    let generation = StoredValue::new(0u64);
    let timer_handles = StoredValue::new(Vec::<i32>::new());

    let cancel_reveals = move || {
        if let Some(window) = web_sys::window() {
            for handle in timer_handles.get_value() {
                window.clear_timeout_with_handle(handle);
            }
        }
        timer_handles.set_value(Vec::new());
    };

    // Mirror the parent's selection into the dialog-local pivot.
    Effect::new(move |_| {
        set_current.set(selected.get());
    });

    // One related-items cycle per pivot.
    Effect::new(move |_| {
        let product = current.get();

        cancel_reveals();
        let gen = generation.get_value() + 1;
        generation.set_value(gen);
        set_revealed.set(vec![]);

        let Some(product) = product else {
            set_loading.set(false);
            return;
        };

        set_loading.set(true);
        spawn_local(async move {
            let result = api::related_products(&product.product_id).await;
            if generation.get_value() != gen {
                // The pivot moved on while this request was in flight.
                return;
            }
            set_loading.set(false);
            match result {
                Ok(items) => {
                    let candidates = stage_candidates(&product.product_id, items);
                    schedule_reveals(gen, generation, timer_handles, candidates, set_revealed);
                }
                Err(e) => leptos::logging::error!("related products fetch failed: {e}"),
            }
        });
    });

    // Remove and promote in one step so the clicked item never shows up in
    // both the grid and the header at once.
    let pivot_to = move |product: Product| {
        set_revealed.update(|revealed| {
            revealed.retain(|r| r.product_id != product.product_id);
        });
        set_current.set(Some(product));
    };

    view! {
        <Show when=move || current.get().is_some()>
            <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
                <div class="dialog details-dialog" on:click=move |ev| ev.stop_propagation()>
                    <style>{include_str!("product_details_dialog.css")}</style>
                    {move || {
                        current.get().map(|product| {
                            view! {
                                <div class="details-title">
                                    {product.product_id.clone()}
                                    <button
                                        class="details-close"
                                        on:click=move |_| on_close.run(())
                                    >
                                        "\u{2715}"
                                    </button>
                                </div>
                                <div class="details-body">
                                    <p class="details-category">
                                        {format!("Category: {}", product.category)}
                                    </p>
                                    <p class="details-brand">
                                        {format!("Brand: {}", product.brand)}
                                    </p>
                                    <p class="details-label">"Features:"</p>
                                    <pre class="details-features">{product.features.clone()}</pre>
                                    <p class="details-price">
                                        {format!("Price: \u{20b9}{}", product.price_inr)}
                                    </p>
                                    <h3 class="details-related-heading">"Recommended Products:"</h3>
                                    {move || {
                                        if loading.get() {
                                            view! {
                                                <div class="loading-spinner">
                                                    <div class="spinner"></div>
                                                </div>
                                            }
                                            .into_any()
                                        } else {
                                            view! {
                                                <div class="related-grid">
                                                    <For
                                                        each=move || revealed.get()
                                                        key=|p| p.product_id.clone()
                                                        children=move |rec| {
                                                            let image = category_image(
                                                                &rec.category,
                                                                &rec.product_id,
                                                            );
                                                            let pivot = rec.clone();
                                                            view! {
                                                                <div class="related-card">
                                                                    <img
                                                                        class="related-image"
                                                                        src=image
                                                                        alt=rec.product_id.clone()
                                                                    />
                                                                    <div class="related-body">
                                                                        <h4 class="product-id">
                                                                            {rec.product_id.clone()}
                                                                        </h4>
                                                                        <span class="category-chip">
                                                                            {rec.category.clone()}
                                                                        </span>
                                                                        <p class="related-brand">
                                                                            {format!("Brand: {}", rec.brand)}
                                                                        </p>
                                                                        <p class="related-price">
                                                                            {format!(
                                                                                "Price: \u{20b9}{}",
                                                                                rec.price_inr,
                                                                            )}
                                                                        </p>
                                                                        <button
                                                                            class="btn btn-primary btn-small"
                                                                            on:click=move |_| pivot_to(
                                                                                pivot.clone(),
                                                                            )
                                                                        >
                                                                            "View Details"
                                                                        </button>
                                                                    </div>
                                                                </div>
                                                            }
                                                        }
                                                    />
                                                </div>
                                            }
                                            .into_any()
                                        }
                                    }}
                                </div>
                            }
                        })
                    }}
                </div>
            </div>
        </Show>
    }
}

/// Queue one timer per candidate at a fixed stride, in list order. Every
/// callback re-checks the generation so a cancelled set that already left the
/// timer queue still cannot mutate newer state.
fn schedule_reveals(
    gen: u64,
    generation: StoredValue<u64>,
    timer_handles: StoredValue<Vec<i32>>,
    candidates: Vec<Product>,
    set_revealed: WriteSignal<Vec<Product>>,
) {
    let Some(window) = web_sys::window() else {
        return;
    };
    for (i, item) in candidates.into_iter().enumerate() {
        let callback = Closure::once(move || {
            if generation.get_value() != gen {
                return;
            }
            set_revealed.update(|revealed| revealed.push(item));
        });
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            REVEAL_STRIDE_MS * i as i32,
        ) {
            Ok(handle) => timer_handles.update_value(|handles| handles.push(handle)),
            Err(_) => leptos::logging::error!("failed to schedule reveal timer"),
        }
        callback.forget();
    }
}
