//! Kubeconf Test - shared test utilities for the kubeconf crates.
//!
//! This crate provides document fixtures and a temporary-kubeconfig harness
//! that can be used across crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! kubeconf-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! use kubeconf_test::{TempKubeconfig, test_document};
//!
//! #[test]
//! fn test_round_trip() {
//!     let kubeconfig = TempKubeconfig::with_document(&test_document());
//!     assert_eq!(kubeconfig.load(), test_document());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;
