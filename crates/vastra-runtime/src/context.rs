use tracing::{debug, info};

use vastra_core::catalog::{CatalogKind, CatalogSet};
use vastra_core::config::AppConfig;
use vastra_core::favorites::Favorites;
use vastra_core::models::{Product, UserAccount};
use vastra_core::order::OrderDraft;
use vastra_core::retail::RetailDraft;
use vastra_core::session::Session;
use vastra_core::storage::Storage;

use crate::signin::{SignInError, SignInForm};
use crate::RuntimeError;

/// Everything a storefront shell needs, built once at process start and
/// passed around by reference. There is no ambient global state; every
/// store lives here and every mutation goes through here.
pub struct AppContext {
    config: AppConfig,
    storage: Storage,
    catalogs: CatalogSet,
    favorites: Favorites,
    session: Session,
}

impl AppContext {
    /// Build from the user configuration: open the database, load the
    /// catalogs, hydrate the stores.
    pub fn init() -> Result<Self, RuntimeError> {
        let config = AppConfig::load().map_err(|e| RuntimeError::Config(e.to_string()))?;
        let db_path = config
            .ensure_db_path()
            .map_err(|e| RuntimeError::Config(e.to_string()))?;
        let storage =
            Storage::open(&db_path).map_err(|e| RuntimeError::Storage(e.to_string()))?;

        let catalogs = match &config.catalog.data_dir {
            Some(dir) => {
                CatalogSet::from_dir(dir).map_err(|e| RuntimeError::Catalog(e.to_string()))?
            }
            None => CatalogSet::embedded().map_err(|e| RuntimeError::Catalog(e.to_string()))?,
        };

        Ok(Self::hydrate(config, storage, catalogs))
    }

    /// Build on explicit parts; for shells that manage their own paths,
    /// and for tests.
    pub fn init_with(config: AppConfig, storage: Storage, catalogs: CatalogSet) -> Self {
        Self::hydrate(config, storage, catalogs)
    }

    fn hydrate(config: AppConfig, storage: Storage, catalogs: CatalogSet) -> Self {
        let favorites = Favorites::load(&storage);
        let session = Session::load(&storage);
        info!(
            favorites = favorites.len(),
            signed_in = session.is_authenticated(),
            "context ready"
        );
        Self {
            config,
            storage,
            catalogs,
            favorites,
            session,
        }
    }

    /// Flush both stores and release the context.
    pub fn shutdown(self) {
        self.favorites.flush(&self.storage);
        self.session.flush(&self.storage);
        info!("context shut down");
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ── Catalogs ────────────────────────────────────────────────

    /// Products of one catalog, in catalog order.
    pub fn catalog(&self, kind: CatalogKind) -> &[Product] {
        self.catalogs.get(kind).products()
    }

    /// Look up a product, with the user-facing error when the id is not
    /// in the catalog (a detail screen opened from a stale link).
    pub fn product(&self, kind: CatalogKind, id: i64) -> Result<&Product, RuntimeError> {
        self.catalogs
            .product(kind, id)
            .ok_or(RuntimeError::ProductNotFound { catalog: kind, id })
    }

    /// Start a set-order draft for a wholesale or pre-order detail screen.
    pub fn open_set_order(&self, kind: CatalogKind, id: i64) -> Result<OrderDraft, RuntimeError> {
        let product = self.product(kind, id)?;
        debug!(catalog = %kind, id, "opened set-order draft");
        Ok(OrderDraft::new(product.clone()))
    }

    /// Start a retail draft for a single-item purchase screen.
    pub fn open_retail(&self, kind: CatalogKind, id: i64) -> Result<RetailDraft, RuntimeError> {
        let product = self.product(kind, id)?;
        debug!(catalog = %kind, id, "opened retail draft");
        Ok(RetailDraft::new(product.clone()))
    }

    // ── Favorites ───────────────────────────────────────────────

    pub fn favorites(&self) -> &[Product] {
        self.favorites.items()
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.favorites.contains(id)
    }

    /// Flip a product's favorite state; returns the new membership.
    pub fn toggle_favorite(&mut self, product: Product) -> bool {
        let id = product.id;
        let saved = self.favorites.toggle(&self.storage, product);
        info!(id, saved, "toggled favorite");
        saved
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear_all(&self.storage);
        info!("cleared favorites");
    }

    // ── Session ─────────────────────────────────────────────────

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.session.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Validate the submitted form and sign its account in. A rejected
    /// form leaves the session untouched.
    pub fn sign_in(&mut self, form: &SignInForm) -> Result<UserAccount, SignInError> {
        let account = form.validate()?;
        info!(id = %account.id, "signed in");
        self.session.sign_in(&self.storage, account.clone());
        Ok(account)
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out(&self.storage);
        info!("signed out");
    }
}
