use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::state::Season;

/// Base URL of the recommendation backend. Overridable at build time so the
/// same bundle can point at a deployed backend.
pub const API_BASE: &str = match option_env!("MALL_API_BASE") {
    Some(url) => url,
    None => "http://127.0.0.1:5000",
};

/// A product as served by the backend. The UI holds read-only copies; field
/// names map onto the backend's JSON keys.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "ProductFeatures")]
    pub features: String,
    #[serde(rename = "Price (INR)")]
    pub price_inr: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginStatus {
    pub logged_in: bool,
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "userId")]
    user_id: i64,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginOutcome {
    valid: bool,
}

#[derive(Deserialize)]
struct LogoutOutcome {
    success: bool,
}

async fn get_json<T: for<'de> Deserialize<'de>>(url: &str) -> Result<T, String> {
    let response = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("server returned {}", response.status()));
    }
    response.json::<T>().await.map_err(|e| e.to_string())
}

/// Ask the backend whether a session is already active.
pub async fn check_login() -> Result<LoginStatus, String> {
    get_json(&format!("{API_BASE}/check-login")).await
}

/// Personalized recommendations for the logged-in user.
pub async fn user_recommendations(
    season: Season,
    num_recommendations: usize,
    offset: usize,
) -> Result<Vec<Product>, String> {
    get_json(&format!(
        "{API_BASE}/user-recommendations?season={}&num_recommendations={num_recommendations}&offset={offset}",
        season.as_str()
    ))
    .await
}

/// Seasonal recommendations for guests.
pub async fn season_recommendations(
    season: Season,
    offset: usize,
    limit: usize,
) -> Result<Vec<Product>, String> {
    get_json(&format!(
        "{API_BASE}/season-recommendations?season={}&offset={offset}&limit={limit}",
        season.as_str()
    ))
    .await
}

/// Products related to the given product, for the detail dialog.
pub async fn related_products(product_id: &str) -> Result<Vec<Product>, String> {
    get_json(&format!(
        "{API_BASE}/recommend?product_id={}",
        urlencoding::encode(product_id)
    ))
    .await
}

/// Submit credentials. `Ok(true)` means the backend accepted them.
pub async fn login(user_id: i64, password: &str) -> Result<bool, String> {
    let response = Request::post(&format!("{API_BASE}/login"))
        .json(&LoginRequest { user_id, password })
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("server returned {}", response.status()));
    }
    let outcome: LoginOutcome = response.json().await.map_err(|e| e.to_string())?;
    Ok(outcome.valid)
}

/// End the active session. `Ok(true)` means the backend dropped it.
pub async fn logout() -> Result<bool, String> {
    let response = Request::post(&format!("{API_BASE}/logout"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("server returned {}", response.status()));
    }
    let outcome: LogoutOutcome = response.json().await.map_err(|e| e.to_string())?;
    Ok(outcome.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_maps_backend_field_names() {
        let json = r#"{
            "ProductID": "P1001",
            "Category": "Electronics",
            "Brand": "Sonic",
            "ProductFeatures": "noise cancelling, 30h battery",
            "Price (INR)": 4999.0
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_id, "P1001");
        assert_eq!(product.category, "Electronics");
        assert_eq!(product.brand, "Sonic");
        assert_eq!(product.features, "noise cancelling, 30h battery");
        assert_eq!(product.price_inr, 4999.0);
    }

    #[test]
    fn product_serializes_back_to_backend_keys() {
        let product = Product {
            product_id: "P1".to_string(),
            category: "Books".to_string(),
            brand: "Ink".to_string(),
            features: "hardcover".to_string(),
            price_inr: 299.0,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["ProductID"], "P1");
        assert_eq!(value["Price (INR)"], 299.0);
    }

    #[test]
    fn login_status_without_user_id() {
        let status: LoginStatus = serde_json::from_str(r#"{"logged_in": false}"#).unwrap();
        assert!(!status.logged_in);
        assert_eq!(status.user_id, None);
    }

    #[test]
    fn login_status_with_user_id() {
        let status: LoginStatus =
            serde_json::from_str(r#"{"logged_in": true, "userId": 42}"#).unwrap();
        assert!(status.logged_in);
        assert_eq!(status.user_id, Some(42));
    }

    #[test]
    fn login_request_uses_camel_case_user_id() {
        let request = LoginRequest {
            user_id: 7,
            password: "users",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userId"], 7);
        assert_eq!(value["password"], "users");
    }
}
