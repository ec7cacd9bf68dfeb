use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::{DevoteeRecord, StoreError, SystemRecord, SystemsStore};

#[derive(Debug, sqlx::FromRow)]
struct SystemRow {
    id: Uuid,
    name: String,
    auth_code: String,
    admin_password: String,
    admin_name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct DevoteeRow {
    system_id: Uuid,
    name: String,
    is_resident: bool,
}

/// Postgres-backed systems store
pub struct PgSystemsStore {
    pool: PgPool,
}

impl PgSystemsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SystemsStore for PgSystemsStore {
    async fn list_systems(&self) -> Result<Vec<SystemRecord>, StoreError> {
        let systems: Vec<SystemRow> = sqlx::query_as(
            r#"
            SELECT id, name, auth_code, admin_password, admin_name
            FROM systems
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let devotees: Vec<DevoteeRow> = sqlx::query_as(
            r#"
            SELECT system_id, name, is_resident
            FROM devotees
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble_systems(systems, devotees))
    }

    async fn update_admin_name(&self, id: Uuid, admin_name: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE systems SET admin_name = $1 WHERE id = $2")
            .bind(admin_name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("System {} not found", id)));
        }
        Ok(())
    }

    async fn delete_system(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM systems WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("System {} not found", id)));
        }
        Ok(())
    }
}

/// Attach devotee rows to their parent systems, preserving both orderings.
fn assemble_systems(systems: Vec<SystemRow>, devotees: Vec<DevoteeRow>) -> Vec<SystemRecord> {
    let mut by_system: HashMap<Uuid, Vec<DevoteeRecord>> = HashMap::new();
    for row in devotees {
        by_system.entry(row.system_id).or_default().push(DevoteeRecord {
            name: row.name,
            is_resident: row.is_resident,
        });
    }

    systems
        .into_iter()
        .map(|row| SystemRecord {
            devotees: by_system.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
            auth_code: row.auth_code,
            admin_password: row.admin_password,
            admin_name: row.admin_name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_row(id: Uuid, name: &str) -> SystemRow {
        SystemRow {
            id,
            name: name.to_string(),
            auth_code: "CODE1".to_string(),
            admin_password: "pw".to_string(),
            admin_name: None,
        }
    }

    #[test]
    fn assembles_devotees_under_their_system() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let systems = vec![system_row(a, "Temple A"), system_row(b, "Temple B")];
        let devotees = vec![
            DevoteeRow { system_id: a, name: "Ram".into(), is_resident: true },
            DevoteeRow { system_id: b, name: "Shyam".into(), is_resident: false },
            DevoteeRow { system_id: a, name: "Hari".into(), is_resident: false },
        ];

        let out = assemble_systems(systems, devotees);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].devotees.len(), 2);
        assert_eq!(out[0].devotees[0].name, "Ram");
        assert!(out[0].devotees[0].is_resident);
        assert_eq!(out[1].devotees.len(), 1);
    }

    #[test]
    fn systems_without_devotees_get_empty_list() {
        let out = assemble_systems(vec![system_row(Uuid::new_v4(), "Temple C")], vec![]);
        assert!(out[0].devotees.is_empty());
    }
}
