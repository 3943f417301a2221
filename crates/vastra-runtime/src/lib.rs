mod context;
mod signin;

use vastra_core::catalog::CatalogKind;

pub use context::AppContext;
pub use signin::{FieldError, FormField, SignInError, SignInForm};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("product {id} not found in the {catalog} catalog")]
    ProductNotFound { catalog: CatalogKind, id: i64 },
}
