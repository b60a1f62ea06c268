//! Kernel utilities shared across slices.
//! Keep this crate lightweight: layered config loading and re-exports of the domain types.
//!
//! ## Config loading
//! ```rust,no_run
//! use resbook_kernel::config::load_config;
//! use resbook_kernel::domain::config::ClientConfig;
//!
//! let cfg: ClientConfig = load_config(Some("resbook.toml")).unwrap_or_default();
//! println!("{}", cfg.api.base_url);
//! ```
pub mod config;

pub use resbook_domain as domain;
