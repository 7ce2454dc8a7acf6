//! Login form controller.

use crate::backend::Backend;
use crate::error::BackendError;
use crate::models::Credentials;
use crate::observable::Observable;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginState {
    pub credentials: Credentials,
    pub submitting: bool,
}

/// Username/password form posting to `/login`.
#[derive(Clone)]
pub struct Login<B> {
    backend: B,
    state: Observable<LoginState>,
}

impl<B: Backend> Login<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Observable::new(LoginState::default()),
        }
    }

    pub fn state(&self) -> &Observable<LoginState> {
        &self.state
    }

    pub fn set_username(&self, value: &str) {
        self.state
            .update(|s| s.credentials.username = value.to_string());
    }

    pub fn set_password(&self, value: &str) {
        self.state
            .update(|s| s.credentials.password = value.to_string());
    }

    /// Post the credentials. On success the backend holds a session cookie.
    pub async fn submit(&self) -> Result<(), BackendError> {
        let credentials = self.state.read(|s| s.credentials.clone());
        self.state.update(|s| s.submitting = true);
        let result = self.backend.login(&credentials).await;
        self.state.update(|s| s.submitting = false);
        match &result {
            Ok(()) => tracing::info!("login successful"),
            Err(BackendError::Network(e)) => tracing::error!("network error during login: {e}"),
            Err(e) => tracing::error!("login failed: {e}"),
        }
        result
    }

    pub fn close(&self) {
        self.state.close();
    }
}
