//! HTTP implementation of [`store::Backend`].

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use store::{
    routes, Assessment, Backend, BackendError, ClientConfig, Credentials, Note, NoteDraft,
    Patient,
};

/// Credentialed client for the Medilabo REST API.
///
/// Every request carries the session cookie: in the browser through
/// `credentials: include`, natively through the client's cookie jar.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        Ok(Self {
            http: build_http()?,
            base_url: config.api_url().to_string(),
        })
    }

    /// Client configured from the environment (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self, BackendError> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "api request");
        let builder = self.http.request(method, self.url(path));
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        builder
    }

    /// Send and turn any non-2xx status into a [`BackendError`].
    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder.send().await.map_err(network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BackendError::from_status(status.as_u16(), message))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Lists may come back as `204 No Content` or as a non-array body when
    /// empty; both read as an empty list.
    async fn send_list<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Vec<T>, BackendError> {
        let response = self.send(builder).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        let body = response.bytes().await.map_err(network)?;
        if body.is_empty() {
            return Ok(Vec::new());
        }
        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))?;
        if !value.is_array() {
            tracing::warn!("expected a JSON array, got {value}");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http() -> Result<Client, BackendError> {
    Client::builder()
        .cookie_store(true)
        .build()
        .map_err(network)
}

#[cfg(target_arch = "wasm32")]
fn build_http() -> Result<Client, BackendError> {
    Ok(Client::new())
}

fn network(e: reqwest::Error) -> BackendError {
    BackendError::Network(e.to_string())
}

impl Backend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<(), BackendError> {
        self.send(self.request(Method::POST, routes::LOGIN).form(credentials))
            .await?;
        Ok(())
    }

    async fn check_session(&self) -> Result<(), BackendError> {
        self.send(self.request(Method::GET, routes::PATIENTS)).await?;
        Ok(())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, BackendError> {
        self.send_list(self.request(Method::GET, routes::PATIENTS))
            .await
    }

    async fn get_patient(&self, id: &str) -> Result<Patient, BackendError> {
        self.send_json(self.request(Method::GET, &routes::patient(id)))
            .await
    }

    async fn create_patient(&self, patient: &Patient) -> Result<(), BackendError> {
        self.send(self.request(Method::POST, routes::PATIENT_INSERT).json(patient))
            .await?;
        Ok(())
    }

    async fn update_patient(&self, id: &str, patient: &Patient) -> Result<(), BackendError> {
        self.send(
            self.request(Method::PUT, &routes::patient_update(id))
                .json(patient),
        )
        .await?;
        Ok(())
    }

    async fn delete_patient(&self, id: &str) -> Result<(), BackendError> {
        self.send(self.request(Method::DELETE, &routes::patient_delete(id)))
            .await?;
        Ok(())
    }

    async fn list_notes(&self, patient_id: &str) -> Result<Vec<Note>, BackendError> {
        self.send_list(self.request(Method::GET, &routes::notes_of(patient_id)))
            .await
    }

    async fn create_note(&self, note: &NoteDraft) -> Result<(), BackendError> {
        self.send(self.request(Method::POST, routes::NOTE_INSERT).json(note))
            .await?;
        Ok(())
    }

    async fn update_note(&self, id: &str, note: &NoteDraft) -> Result<(), BackendError> {
        self.send(self.request(Method::PUT, &routes::note_update(id)).json(note))
            .await?;
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), BackendError> {
        self.send(self.request(Method::DELETE, &routes::note_delete(id)))
            .await?;
        Ok(())
    }

    async fn assess(&self, patient_id: &str) -> Result<Assessment, BackendError> {
        self.send_json(self.request(Method::GET, &routes::assessment(patient_id)))
            .await
    }
}
