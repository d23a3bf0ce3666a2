// SPDX-License-Identifier: AGPL-3.0-or-later

//! Verde Storefront - Catalog & Account Service
//!
//! This crate provides the storefront backend: a product/category catalog
//! plus session-based authentication with opaque bearer tokens persisted in
//! the relational store.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Password hashing, session management, authorization
//! - `store` - SQLite repositories behind a pooled connection

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
