//! The cart/session store: single source of truth for "what is in the cart"
//! and "who is logged in".
//!
//! Constructed once at process start, `initialize()`d once, then injected
//! into whatever surface renders it. All mutations run on the single logical
//! event thread; cart persistence is synchronous and happens immediately
//! after each mutation, so there is no concurrency hazard on the snapshot.
//!
//! Failure semantics:
//! - storage failures degrade silently to empty-cart / anonymous-session
//! - backend failures during explicit user actions (login, checkout) are
//!   returned to the caller unchanged for display
//! - failures during the passive startup credential validation are absorbed
//!
//! The store is polling-friendly: [`Store::version`] increases on every
//! state change, so a UI binding can re-read when it observes a new version.

use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use saahaz_core::{DeliveryOption, Price, ProductId};

use crate::api::types::{Order, OrderCreate, ProductFilter, ProfileUpdate, RegisterRequest, User};
use crate::api::{ApiClient, ApiError};
use crate::cart::{Cart, VariantKey};
use crate::config::ClientConfig;
use crate::session::Session;
use crate::storage::{FileStore, StateStore, keys};

/// Delivery charge for each option, in the store currency (PKR).
///
/// The backend recomputes the subtotal from its own prices but trusts the
/// client's delivery charge, mirroring the original checkout flow.
#[must_use]
pub fn delivery_charge(option: DeliveryOption) -> Price {
    match option {
        DeliveryOption::Standard => Price::from_cents(200_00),
        DeliveryOption::Express => Price::from_cents(350_00),
        DeliveryOption::NextDay => Price::from_cents(500_00),
        DeliveryOption::Free => Price::ZERO,
    }
}

/// Errors surfaced by explicit store actions.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Checkout requested with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Backend call failed; passed through verbatim for the caller to render.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Cart and session state with local durability.
pub struct Store {
    api: ApiClient,
    storage: Arc<dyn StateStore>,
    cart: Cart,
    session: Session,
    version: u64,
}

impl Store {
    /// Create a store over an API client and a persistence backend.
    #[must_use]
    pub fn new(api: ApiClient, storage: Arc<dyn StateStore>) -> Self {
        Self {
            api,
            storage,
            cart: Cart::new(),
            session: Session::anonymous(),
            version: 0,
        }
    }

    /// Create a store from configuration, with file-backed persistence.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        let api = ApiClient::new(&config.api_url);
        let storage = Arc::new(FileStore::new(config.state_dir.clone()));
        Self::new(api, storage)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Restore persisted state. Runs once per process lifetime.
    ///
    /// The cart snapshot and the credential are restored independently, in
    /// either order. A missing or malformed snapshot yields an empty cart
    /// (and the bad entry is deleted); a rejected credential yields an
    /// anonymous session. Neither failure is surfaced.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) {
        if let Some(snapshot) = self.storage.get(keys::CART) {
            match Cart::from_snapshot(&snapshot) {
                Some(cart) => self.cart = cart,
                None => {
                    warn!("Discarding unreadable cart snapshot");
                    self.storage.remove(keys::CART);
                    self.cart = Cart::new();
                }
            }
        }

        if let Some(token) = self.storage.get(keys::TOKEN) {
            self.api.set_token(&token);
            // Snapshot the epoch so a logout() during the in-flight profile
            // call wins over the late response.
            let epoch = self.session.epoch();
            match self.api.profile().await {
                Ok(user) if self.session.epoch() == epoch => {
                    debug!(user_id = %user.id, "Restored session from persisted credential");
                    self.session.authenticate(user, SecretString::from(token));
                }
                Ok(_) => {
                    debug!("Discarding stale credential validation after logout");
                }
                Err(e) => {
                    debug!(error = %e, "Persisted credential rejected; staying anonymous");
                    self.storage.remove(keys::TOKEN);
                    self.api.clear_token();
                }
            }
        }

        self.version += 1;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The backend client, for catalog reads that bypass the store.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Total quantity across all cart lines. Recomputed on every read.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Monotonic change counter; increases on every state change.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    // =========================================================================
    // Cart mutations (persist synchronously, cannot fail)
    // =========================================================================

    /// Add a product variant to the cart, merging with any existing line for
    /// the same `(product, size, color)` key.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) {
        self.cart.add(product_id, quantity, size, color);
        self.persist_cart();
    }

    /// Remove the line matching `key` exactly; absence is a no-op.
    pub fn remove_item(&mut self, key: &VariantKey) {
        self.cart.remove(key);
        self.persist_cart();
    }

    /// Replace the quantity of the line matching `key`; zero or below
    /// removes the line.
    pub fn update_quantity(&mut self, key: &VariantKey, quantity: u32) {
        self.cart.update_quantity(key, quantity);
        self.persist_cart();
    }

    /// Empty the cart and delete the persisted snapshot entirely, so a
    /// fresh start sees "no snapshot" rather than an empty array.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.storage.remove(keys::CART);
        self.version += 1;
    }

    fn persist_cart(&mut self) {
        self.storage.set(keys::CART, &self.cart.to_snapshot());
        self.version += 1;
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Login with email and password. On success the credential is persisted
    /// and attached to subsequent backend calls.
    ///
    /// # Errors
    ///
    /// Backend failures pass through unchanged for the caller to display.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, StoreError> {
        let auth = self.api.login(email, password).await?;
        self.establish_session(auth.user.clone(), auth.access_token);
        Ok(auth.user)
    }

    /// Register a new account; on success behaves like login.
    ///
    /// # Errors
    ///
    /// Backend failures pass through unchanged for the caller to display.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<User, StoreError> {
        let auth = self.api.register(request).await?;
        self.establish_session(auth.user.clone(), auth.access_token);
        Ok(auth.user)
    }

    fn establish_session(&mut self, user: User, token: String) {
        self.storage.set(keys::TOKEN, &token);
        self.api.set_token(&token);
        self.session.authenticate(user, SecretString::from(token));
        self.version += 1;
    }

    /// Clear credential, user record, and the entire cart - in-memory and
    /// persisted. Cart contents do not survive logout; that is a product
    /// decision, not an accident.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        self.storage.remove(keys::TOKEN);
        self.storage.remove(keys::CART);
        self.api.clear_token();
        self.session.clear();
        self.cart.clear();
        self.version += 1;
    }

    /// Update the profile of the logged-in user and refresh the session's
    /// user record.
    ///
    /// # Errors
    ///
    /// Backend failures pass through unchanged for the caller to display.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<User, StoreError> {
        let user = self.api.update_profile(update).await?;
        self.session.set_user(user.clone());
        self.version += 1;
        Ok(user)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Submit the cart as an order. The subtotal is computed from current
    /// catalog prices for the client's copy of the totals; the backend
    /// recomputes it authoritatively. On success the cart is cleared and its
    /// snapshot deleted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyCart`] if there is nothing to order;
    /// backend failures pass through unchanged.
    #[instrument(skip(self, delivery_address, phone))]
    pub async fn place_order(
        &mut self,
        delivery_address: String,
        phone: String,
        delivery_option: DeliveryOption,
    ) -> Result<Order, StoreError> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let products = self.api.products(&ProductFilter::all()).await?;
        let subtotal = self.cart.subtotal(|id| {
            products
                .iter()
                .find(|product| &product.id == id)
                .map(|product| product.price)
        });
        let charge = delivery_charge(delivery_option);

        let order = OrderCreate {
            items: self.cart.lines().to_vec(),
            delivery_address,
            phone,
            delivery_option,
            delivery_charge: charge,
            subtotal,
            total: subtotal + charge,
        };

        let placed = self.api.create_order(&order).await?;
        self.clear_cart();
        Ok(placed)
    }
}
