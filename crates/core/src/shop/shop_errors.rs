use thiserror::Error;

/// Errors for shop purchases.
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("No live shop slot for item '{0}'")]
    SlotNotFound(String),

    #[error("Shop slot for item '{0}' has expired")]
    SlotExpired(String),

    #[error("Item '{0}' is sold out")]
    OutOfStock(String),

    #[error("Item '{0}' is missing from the catalog")]
    UnknownCatalogItem(String),
}
