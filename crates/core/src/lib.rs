//! Recdash Core - Shared domain types.
//!
//! This crate provides the types exchanged with the recommendation service
//! and rendered by the dashboard:
//! - `dashboard` - Operator dashboard (API client, state store, views)
//! - `integration-tests` - Fake backend and end-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no HTTP
//! clients. Every payload the backend sends is decoded into one of these
//! types at the API boundary, so renderers never see untyped JSON.
//!
//! # Modules
//!
//! - [`types`] - Identifiers, personas, catalog entities, recommendations and views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
