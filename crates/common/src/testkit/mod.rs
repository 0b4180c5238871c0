//! Test helpers for exercising the drive protocol's failure paths
//!
//! # Example
//!
//! ```rust,ignore
//! use common::testkit::{FaultyProvider, ProviderCall};
//!
//! #[tokio::test]
//! async fn test_bootstrap_aborts() {
//!     // Second key generation is the root folder
//!     let keys = DriveKeys::new(FaultyProvider::fail_nth(ProviderCall::GenerateKeyPair, 2));
//!     assert!(keys.generate_drive_bootstrap(&address).await.is_err());
//! }
//! ```
mod faulty_provider;

pub use faulty_provider::{FaultyProvider, ProviderCall};
