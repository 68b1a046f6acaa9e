//! Recommendation dashboard library.
//!
//! An operator dashboard for a recommendation service: browse the users and
//! products the service knows about, request per-user recommendations, and
//! regenerate the sample catalog.
//!
//! # Architecture
//!
//! - [`api`] talks to the recommendation service over HTTP
//! - [`store`] owns all dashboard state and orchestrates backend calls
//! - [`views`] renders a store snapshot as one of four pages
//! - [`routes`] maps HTTP requests onto store operations and views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;
