//! # Identity
//!
//! Who the user is and where they may go.
//!
//! * [`SessionState`]: the token and profile pair, persisted through a
//!   [`KeyValueStore`](resbook_storage::KeyValueStore) and published as immutable snapshots.
//! * [`AuthState`]: the single classification (anonymous, disabled, audit states) every
//!   decision is made from.
//! * [`guard`]: the pure navigation decision, and [`Navigator`] which applies it with
//!   last-navigation-wins semantics.
//! * [`AuthService`]: send-code, login, register, profile refresh and logout.
//! * [`SessionExpiryHandler`]: the gateway hook that ends the session on a rejected token.

mod auth;
pub mod credentials;
mod error;
mod expiry;
pub mod guard;
mod navigator;
pub mod routes;
mod session;
mod state;

pub use auth::{AuthGrant, AuthService, AuthServiceInner};
pub use credentials::{CodePurpose, LoginRequest, RegisterRequest};
pub use error::{IdentityError, IdentityErrorExt};
pub use expiry::SessionExpiryHandler;
pub use guard::Outcome;
pub use navigator::{Location, Navigation, Navigator, NavigatorInner, ProfileSource};
pub use routes::{Resolved, Route, RouteTable};
pub use session::{LogoutReason, SessionEvent, SessionKeys, SessionState, SessionStateInner};
pub use state::AuthState;
