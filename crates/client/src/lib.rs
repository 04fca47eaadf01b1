//! Saahaz storefront client library.
//!
//! Client-side state and backend access for the Saahaz apparel storefront.
//! The backend REST API is the source of truth for catalog and order data;
//! this crate owns the two pieces of durable client state:
//!
//! - the shopping cart, persisted locally across restarts
//! - the authenticated session (user record plus bearer credential)
//!
//! # Architecture
//!
//! - [`store::Store`] - single source of truth for cart and session state,
//!   constructed once at process start and injected into whatever surface
//!   renders it (the CLI in this workspace)
//! - [`api::ApiClient`] - typed REST client for the backend, catalog reads
//!   cached via `moka` (5 minute TTL)
//! - [`storage`] - local key/value persistence, the browser-localStorage
//!   analogue (file-backed in production, in-memory in tests)
//! - [`cart`] - the cart state machine, pure and I/O free
//! - [`search`] - debounced substring search over the product catalog
//!
//! # Example
//!
//! ```rust,ignore
//! use saahaz_client::config::ClientConfig;
//! use saahaz_client::store::Store;
//!
//! let config = ClientConfig::from_env()?;
//! let mut store = Store::from_config(&config);
//! store.initialize().await;
//!
//! store.add_item("product-id".into(), 1, Some("M".into()), Some("Blue".into()));
//! assert_eq!(store.item_count(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod search;
pub mod session;
pub mod storage;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use cart::{Cart, CartLine, VariantKey};
pub use config::{ClientConfig, ConfigError};
pub use session::Session;
pub use store::{Store, StoreError};
