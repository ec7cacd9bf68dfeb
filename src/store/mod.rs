// Data-store collaborator: systems table with its nested devotees relation.

pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use postgres::PgSystemsStore;

/// One tenant's tracking-system record as shown in the super admin panel.
/// The admin password is stored and displayed in plaintext to the privileged
/// viewer; this mirrors the production data model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemRecord {
    pub id: Uuid,
    pub name: String,
    pub auth_code: String,
    pub admin_password: String,
    pub admin_name: Option<String>,
    pub devotees: Vec<DevoteeRecord>,
}

/// A person tracked within a system. Read-only from this component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevoteeRecord {
    pub name: String,
    pub is_resident: bool,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    BadResponse(String),
}

/// Query/mutation interface over the systems table. The screen treats every
/// error variant as uniform failure; the variants exist for the API layer.
#[async_trait]
pub trait SystemsStore: Send + Sync {
    /// All systems with their devotees, ordered by creation time descending.
    async fn list_systems(&self) -> Result<Vec<SystemRecord>, StoreError>;

    /// Update a single system's admin_name field.
    async fn update_admin_name(&self, id: Uuid, admin_name: &str) -> Result<(), StoreError>;

    /// Delete a system by id (devotees cascade).
    async fn delete_system(&self, id: Uuid) -> Result<(), StoreError>;
}
