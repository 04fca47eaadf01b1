//! Saahaz Core - Shared types library.
//!
//! This crate provides common types used across all Saahaz client components:
//! - `client` - Cart/session store and backend API client
//! - `cli` - Command-line surface exercising the store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
