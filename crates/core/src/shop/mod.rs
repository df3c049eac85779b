//! Shop module - tiered daily rotation and purchases.

mod shop_errors;
mod shop_model;
mod shop_service;


pub use shop_errors::ShopError;
pub use shop_model::{CatalogItem, ItemTier, ShopCategory, ShopSlot};
pub use shop_service::ShopService;
