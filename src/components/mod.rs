pub mod login_dialog;
pub mod product_card;
pub mod product_details_dialog;
