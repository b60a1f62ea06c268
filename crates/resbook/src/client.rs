use crate::error::{ClientError, ClientErrorExt};
use resbook_booking::{AdvanceDays, BookingApi};
use resbook_domain::config::ClientConfig;
use resbook_gateway::{RequestGateway, Transport};
use resbook_identity::{
    AuthService, Navigator, ProfileSource, RouteTable, SessionExpiryHandler, SessionKeys,
    SessionState,
};
use resbook_storage::{FileStore, KeyValueStore};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A fully wired client: one session, one gateway bound to it, and the services on top.
///
/// Clones share everything.
#[resbook_derive::shared_handle]
pub struct Client {
    config: ClientConfig,
    gateway: RequestGateway,
    session: SessionState,
    auth: AuthService,
    navigator: Navigator,
    booking: BookingApi,
    expiry: Arc<SessionExpiryHandler>,
}

impl Client {
    /// Loads the layered configuration (file, then `RESBOOK__*` variables) and bootstraps.
    ///
    /// # Errors
    /// See [`Client::bootstrap`]; additionally [`ClientError::Config`].
    pub async fn open(path: Option<&Path>) -> Result<Self, ClientError> {
        let config: ClientConfig =
            resbook_kernel::config::load_config(path).context("Loading client config")?;
        Self::bootstrap(config).await
    }

    /// Production wiring: an HTTP gateway and a file store under `storage.dir`.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built, or the store cannot be opened or cleaned up.
    pub async fn bootstrap(config: ClientConfig) -> Result<Self, ClientError> {
        let gateway = RequestGateway::from_config(&config.api).context("Building HTTP gateway")?;
        let store = open_store(&config).await?;
        Self::assemble(config, store, gateway).await
    }

    /// Wiring over an arbitrary transport, with the file store of `config`.
    ///
    /// # Errors
    /// Same as [`Client::bootstrap`].
    pub async fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, ClientError> {
        let store = open_store(&config).await?;
        Self::assemble(config, store, RequestGateway::with_transport(transport)).await
    }

    /// Hydrates the session from `store` and binds it to `gateway`.
    ///
    /// # Errors
    /// Returns [`ClientError::Identity`] if the persisted session cannot be read.
    pub async fn assemble(
        config: ClientConfig,
        store: Arc<dyn KeyValueStore>,
        gateway: RequestGateway,
    ) -> Result<Self, ClientError> {
        let session = SessionState::hydrate(store, SessionKeys::from(&config.storage))
            .await
            .context("Hydrating session")?;
        let auth = AuthService::open(gateway.clone(), session.clone());
        let source: Arc<dyn ProfileSource> = Arc::new(auth.clone());
        let navigator =
            Navigator::with_routes(session.clone(), RouteTable::standard(), Some(source));

        let expiry = Arc::new(SessionExpiryHandler::new(session.clone(), navigator.clone()));
        gateway.bind(&expiry);
        let booking = BookingApi::new(gateway.clone());

        info!(base_url = %config.api.base_url, state = %session.auth_state(), "Client ready");
        Ok(Self::new(ClientInner { config, gateway, session, auth, navigator, booking, expiry }))
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub fn booking(&self) -> &BookingApi {
        &self.booking
    }

    /// The hook bound to the gateway; it lives as long as the client.
    #[must_use]
    pub fn expiry_handler(&self) -> &SessionExpiryHandler {
        &self.expiry
    }

    /// Advance-booking limits from the server, or the configured ones when it cannot answer.
    pub async fn advance_days(&self) -> AdvanceDays {
        self.booking.advance_days(AdvanceDays::from(&self.config.booking)).await
    }
}

async fn open_store(config: &ClientConfig) -> Result<Arc<dyn KeyValueStore>, ClientError> {
    let store = FileStore::builder()
        .root(config.storage.dir.clone())
        .name(config.storage.name.clone())
        .open()
        .await
        .context("Opening session store")?;
    Ok(Arc::new(store))
}
