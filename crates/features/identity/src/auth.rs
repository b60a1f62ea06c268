use crate::credentials::{CodePurpose, LoginRequest, RegisterRequest, SendCodeRequest, check_phone};
use crate::error::{IdentityError, IdentityErrorExt};
use crate::navigator::ProfileSource;
use crate::session::{LogoutReason, SessionState};
use crate::state::AuthState;
use async_trait::async_trait;
use resbook_domain::UserProfile;
use resbook_gateway::{ApiRequest, RequestGateway};
use serde::Deserialize;
use tracing::{info, warn};

const SEND_CODE: &str = "/h5/auth/send-code";
const REGISTER: &str = "/h5/auth/register";
const LOGIN: &str = "/h5/auth/login";
const PROFILE: &str = "/h5/auth/profile";
const LOGOUT: &str = "/h5/auth/logout";

/// Token and user returned by login (and by registration when it logs in immediately).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthGrant {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct RegisterReply {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
}

/// Authentication flows over the gateway, writing their results into the session.
#[resbook_derive::shared_handle]
pub struct AuthService {
    gateway: RequestGateway,
    session: SessionState,
}

impl AuthService {
    #[must_use]
    pub fn open(gateway: RequestGateway, session: SessionState) -> Self {
        Self::new(AuthServiceInner { gateway, session })
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Requests an SMS verification code.
    ///
    /// # Errors
    /// [`IdentityError::InvalidCredentials`] for a malformed phone number (nothing is sent),
    /// otherwise the gateway failure.
    pub async fn send_code(&self, phone: &str, purpose: CodePurpose) -> Result<(), IdentityError> {
        check_phone(phone)?;
        let request = ApiRequest::post(SEND_CODE)
            .json(&SendCodeRequest { phone, purpose })
            .context("Encoding send-code request")?;
        self.gateway.execute(request).await.context("Sending verification code")?;
        Ok(())
    }

    /// Logs in and establishes the session.
    ///
    /// # Errors
    /// [`IdentityError::InvalidCredentials`] before any request is made, the gateway failure,
    /// or a storage failure while persisting the session.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthState, IdentityError> {
        credentials.validate()?;
        let request = ApiRequest::post(LOGIN).json(credentials).context("Encoding login request")?;
        let grant = self.gateway.call::<AuthGrant>(request).await.context("Logging in")?;

        let state = self.session.establish(grant.token, grant.user).await?;
        info!(%state, "Logged in");
        Ok(state)
    }

    /// Registers an account. When the server answers with a token and user the session is
    /// established right away and its state is returned.
    ///
    /// # Errors
    /// Same as [`AuthService::login`].
    pub async fn register(&self, form: &RegisterRequest) -> Result<Option<AuthState>, IdentityError> {
        form.validate()?;
        let request = ApiRequest::post(REGISTER).json(form).context("Encoding register request")?;
        let reply = self.gateway.call::<Option<RegisterReply>>(request).await.context("Registering")?;

        match reply {
            Some(RegisterReply { token: Some(token), user: Some(user) }) if !token.is_empty() => {
                let state = self.session.establish(token, user).await?;
                info!(%state, "Registered and logged in");
                Ok(Some(state))
            },
            _ => {
                info!("Registered, login required");
                Ok(None)
            },
        }
    }

    /// Fetches the profile and stores it in the current session.
    ///
    /// # Errors
    /// [`IdentityError::NotLoggedIn`] without a session, otherwise the gateway or storage
    /// failure.
    pub async fn refresh_profile(&self) -> Result<AuthState, IdentityError> {
        let Some(token) = self.session.token() else {
            return Err(IdentityError::NotLoggedIn {
                message: "no session to refresh".into(),
                context: None,
            });
        };

        let profile = self
            .gateway
            .call::<UserProfile>(ApiRequest::get(PROFILE))
            .await
            .context("Fetching profile")?;
        match self.session.update_profile(&token, profile).await? {
            Some(state) => Ok(state),
            None => Ok(self.session.auth_state()),
        }
    }

    /// Logs out. The server is told on a best-effort basis; the local session is cleared in any
    /// case.
    ///
    /// # Errors
    /// Returns [`IdentityError::Storage`] if the persisted session could not be removed.
    pub async fn logout(&self) -> Result<(), IdentityError> {
        if self.session.is_logged_in()
            && let Err(err) = self.gateway.execute(ApiRequest::post(LOGOUT)).await
        {
            warn!(error = %err, "Server logout failed");
        }
        self.session.clear(LogoutReason::Explicit).await.map(|_| ())
    }
}

#[async_trait]
impl ProfileSource for AuthService {
    async fn refresh_profile(&self) -> Result<AuthState, IdentityError> {
        Self::refresh_profile(self).await
    }
}
