//! Facade crate for the `ResBook` reservation client.
//! Re-exports the slices and wires them into a [`Client`].
//! Keep this crate thin: it composes other crates, it does not implement business logic.
//!
//! ## Usage
//! ```rust,no_run
//! # async fn run() -> Result<(), resbook::ClientError> {
//! let client = resbook::Client::open(None).await?;
//! let days = client.advance_days().await;
//! let nav = client.navigator().navigate("/services/cage").await;
//! # let _ = (days, nav);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod logging;

pub use client::{Client, ClientInner};
pub use error::{ClientError, ClientErrorExt};
pub use logging::init_logging;

pub use resbook_booking as booking;
pub use resbook_domain as domain;
pub use resbook_gateway as gateway;
pub use resbook_identity as identity;
pub use resbook_kernel as kernel;
pub use resbook_logger as logger;
pub use resbook_storage as storage;
