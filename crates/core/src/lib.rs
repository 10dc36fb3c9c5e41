//! kitzz core - shared types library.
//!
//! This crate provides the domain vocabulary used by every kitzz component:
//! - `storefront` - public storefront pages and the seller dashboard
//! - `integration-tests` - end-to-end HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP. Every
//! value here is validated on construction so the storefront can trust it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identifiers, usernames, emails, prices
//!   and the catalog enumerations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
