use leptos::prelude::*;

use crate::api::Product;

/// Stock image for a product category, with a generated placeholder when the
/// category has no mapping.
pub fn category_image(category: &str, product_id: &str) -> String {
    let url = match category {
        "Electronics" => "https://rb.gy/6stoqt",
        "Clothing" => "https://rb.gy/jdswd0",
        "Home Decor" => "https://rb.gy/e29hbt",
        "Books" => "https://rb.gy/01h915",
        "Beauty" => "https://rb.gy/av5pr9",
        "Home & Kitchen" => "https://shorturl.at/tNMc3",
        "Sports & Outdoors" => "https://shorturl.at/aPQLf",
        "Groceries" => "https://shorturl.at/ybvbF",
        "Toys & Games" => "https://shorturl.at/navE9",
        "Fashion" => "https://shorturl.at/pwWtG",
        "Automotive" => "https://tinyurl.com/49vy7y73",
        _ => {
            return format!(
                "https://dummyimage.com/200x140/cccccc/000000&text={}",
                urlencoding::encode(product_id)
            )
        }
    };
    url.to_string()
}

/// A card in the main product grid.
#[component]
pub fn ProductCard(
    product: Product,
    #[prop(into)] on_select: Callback<Product>,
) -> impl IntoView {
    let image = category_image(&product.category, &product.product_id);
    let selected = product.clone();

    view! {
        <div class="product-card">
            <style>{include_str!("product_card.css")}</style>
            <div class="product-card-body">
                <h3 class="product-id">{product.product_id.clone()}</h3>
                <span class="category-chip">{product.category.clone()}</span>
                <p class="product-brand">{format!("Brand: {}", product.brand)}</p>
                <p class="product-price">{format!("Price: \u{20b9}{}", product.price_inr)}</p>
                <button
                    class="btn btn-primary"
                    on:click=move |_| on_select.run(selected.clone())
                >
                    "View Details"
                </button>
            </div>
            <img class="product-image" src=image alt=product.product_id.clone() />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_category_uses_stock_image() {
        assert_eq!(category_image("Books", "P1"), "https://rb.gy/01h915");
    }

    #[test]
    fn unknown_category_falls_back_to_placeholder() {
        let url = category_image("Antiques", "P 42");
        assert!(url.starts_with("https://dummyimage.com/"));
        assert!(url.ends_with("text=P%2042"));
    }
}
