use crate::api::{FinanceApi, Transport};
use crate::error::ApiError;
use crate::models::{Credentials, PasswordChange, ProfileUpdate, Registration, User};
use crate::session::Session;
use crate::validation::{validate_password_change, validate_profile, validate_registration};
use log::{info, warn};

/// Account operations that keep the session in step with the server
pub struct AuthService<T> {
    api: FinanceApi<T>,
}

impl<T: Transport> AuthService<T> {
    pub fn new(api: FinanceApi<T>) -> Self {
        Self { api }
    }

    fn session(&self) -> &Session {
        self.api.session()
    }

    /// Exchange credentials for tokens, establish the session and load the
    /// current user
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(ApiError::Validation(
                "Username and password are required".to_string(),
            ));
        }
        let tokens = self.api.login(credentials).await?;
        self.session().establish(tokens);
        let user = self.api.current_user().await?;
        info!("Logged in as {}", user.username);
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// Create an account. The caller is sent to the login page afterwards;
    /// no session is established here.
    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        validate_registration(registration).map_err(|e| ApiError::Validation(e.to_string()))?;
        let user = self.api.register(registration).await?;
        info!("Registered account {}", user.username);
        Ok(user)
    }

    /// Load the user behind persisted credentials. Credentials the server no
    /// longer accepts are discarded.
    pub async fn restore(&self) -> Result<Option<User>, ApiError> {
        if !self.session().is_authenticated() {
            return Ok(None);
        }
        match self.api.current_user().await {
            Ok(user) => {
                self.session().set_user(user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                warn!("Could not restore session: {}", e);
                self.session().invalidate();
                Err(e)
            }
        }
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        validate_profile(update).map_err(|e| ApiError::Validation(e.to_string()))?;
        let user = self.api.update_profile(update).await?;
        self.session().set_user(user.clone());
        Ok(user)
    }

    /// Fails locally when the two new passwords differ
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        validate_password_change(change).map_err(|e| ApiError::Validation(e.to_string()))?;
        self.api.change_password(change).await?;
        info!("Password changed");
        Ok(())
    }

    pub fn logout(&self) {
        self.session().logout();
    }
}
