//! Storefront Library
//!
//! This library provides the core functionality for a storefront service:
//! a product catalog with filtered listings and a per-session shopping cart.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod filter;

// Infrastructure
pub mod config;
pub mod errors;
pub mod router;
pub mod state;
