// HTTP implementations of the collaborator traits, pointed at the tracking
// system API. The CLI plays the screen; these are its network seams.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{AuthError, AuthProvider};
use crate::store::{StoreError, SystemRecord, SystemsStore};

/// API base URL, e.g. http://localhost:3000
pub fn base_url() -> String {
    std::env::var("SADHANA_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Where to request a new tracking system. The flow itself is external to
/// this component; we only point at it.
pub fn new_system_url() -> String {
    std::env::var("SADHANA_NEW_SYSTEM_URL")
        .unwrap_or_else(|_| format!("{}/new-system", base_url()))
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// Auth collaborator speaking to POST /auth/login
pub struct HttpAuthProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn login(&self, code: &str) -> Result<bool, AuthError> {
        let res = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({ "code": code }))
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            status => Err(AuthError::BadResponse(format!(
                "unexpected status {} from login endpoint",
                status
            ))),
        }
    }
}

/// Data-store collaborator speaking to the /api/admin/systems endpoints
pub struct HttpSystemsStore {
    client: reqwest::Client,
    base_url: String,
    admin_key: String,
}

impl HttpSystemsStore {
    pub fn new(base_url: String, admin_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            admin_key,
        }
    }
}

#[async_trait]
impl SystemsStore for HttpSystemsStore {
    async fn list_systems(&self) -> Result<Vec<SystemRecord>, StoreError> {
        let res = self
            .client
            .get(format!("{}/api/admin/systems", self.base_url))
            .header("x-admin-key", &self.admin_key)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(StoreError::BadResponse(format!(
                "unexpected status {} from systems list",
                res.status()
            )));
        }

        let envelope: Envelope<Vec<SystemRecord>> = res.json().await?;
        envelope
            .data
            .ok_or_else(|| StoreError::BadResponse("missing data in systems list".to_string()))
    }

    async fn update_admin_name(&self, id: Uuid, admin_name: &str) -> Result<(), StoreError> {
        let res = self
            .client
            .patch(format!("{}/api/admin/systems/{}", self.base_url, id))
            .header("x-admin-key", &self.admin_key)
            .json(&json!({ "admin_name": admin_name }))
            .send()
            .await?;

        match res.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!("System {} not found", id))),
            status => {
                let envelope: Envelope<serde_json::Value> = res.json().await.unwrap_or(Envelope {
                    success: false,
                    data: None,
                    error: None,
                });
                Err(StoreError::BadResponse(format!(
                    "status {}: {}",
                    status,
                    envelope.error.unwrap_or_else(|| "unknown error".to_string())
                )))
            }
        }
    }

    async fn delete_system(&self, id: Uuid) -> Result<(), StoreError> {
        let res = self
            .client
            .delete(format!("{}/api/admin/systems/{}", self.base_url, id))
            .header("x-admin-key", &self.admin_key)
            .send()
            .await?;

        match res.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!("System {} not found", id))),
            status => Err(StoreError::BadResponse(format!(
                "unexpected status {} from system delete",
                status
            ))),
        }
    }
}
