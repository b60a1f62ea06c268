//! # Request Gateway
//!
//! Every backend call of the client goes through [`RequestGateway::call`]. The backend wraps
//! its answers in an [`Envelope`] (`{code, message, data}`, `code == 200` on success); the
//! gateway unwraps it and reduces every failure to one of three [`ErrorKind`]s:
//!
//! * **Network**: no response at all.
//! * **BusinessError**: the server answered and refused; the session is left untouched.
//! * **AuthExpired**: business code 401 or HTTP 401. The bound [`SessionBinding`] is notified
//!   once, before the error reaches the caller, so the session is already torn down when the
//!   view reacts.
//!
//! The wire itself sits behind the [`Transport`] trait; [`HttpTransport`] is the `reqwest`
//! implementation used in production.

mod binding;
mod envelope;
mod error;
mod gateway;
mod http;
pub mod messages;
mod request;
#[cfg(feature = "testing")]
pub mod testing;
mod transport;

pub use binding::SessionBinding;
pub use envelope::Envelope;
pub use error::{ErrorKind, GatewayError, GatewayErrorExt};
pub use gateway::{RequestGateway, RequestGatewayInner, status_error};
pub use http::HttpTransport;
pub use request::{ApiRequest, Method};
pub use transport::{HttpResponse, Transport};
