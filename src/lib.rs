//! mkrls - release automation for the Python and JS packages of a monorepo
//!
//! Each package lives in its own directory named `py.<name>` or `js.<name>`.
//! A release reads the current version from the package manifest, bumps it,
//! rewrites the embedded version declarations, then commits, tags, pushes and
//! publishes.
//!
//! # Examples
//!
//! ## Computing the next version
//!
//! ```
//! use mkrls::Version;
//!
//! let current: Version = "2.3.1".parse().unwrap();
//! assert_eq!(current.increment().to_string(), "2.3.2");
//!
//! let short: Version = "0.4".parse().unwrap();
//! assert_eq!(short.increment().to_string(), "0.4.1");
//! ```
//!
//! ## Checking an explicit version
//!
//! ```
//! use mkrls::Version;
//!
//! let current: Version = "1.2.3".parse().unwrap();
//! assert!(current.is_logical_increment(&"1.3.0".parse().unwrap()));
//! assert!(!current.is_logical_increment(&"1.2.5".parse().unwrap()));
//! ```

pub mod commands;
pub mod types;
pub mod utils;

pub use commands::release;
pub use types::{Ecosystem, Repository, Version};

pub type Result<T> = anyhow::Result<T>;
