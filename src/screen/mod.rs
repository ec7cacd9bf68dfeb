// Login screen workflow: the tenant login flow plus the hidden super admin
// panel (systems table, admin-name edit, deletion). All state lives in this
// struct and is discarded when the screen goes away; collaborators are
// reached only through the trait seams so every flow is testable offline.

use std::sync::Arc;

use rand::Rng;
use uuid::Uuid;

use crate::auth::AuthProvider;
use crate::config::SecurityConfig;
use crate::store::{SystemRecord, SystemsStore};

/// Alphabet the master key is drawn from, one uniform pick per character.
pub const MASTER_KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random master key of the given length
pub fn generate_master_key(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| MASTER_KEY_ALPHABET[rng.gen_range(0..MASTER_KEY_ALPHABET.len())] as char)
        .collect()
}

/// Client-local storage for the master key. Advisory display data only;
/// nothing server-side ever validates it.
pub trait MasterKeyStore: Send + Sync {
    fn load(&self) -> anyhow::Result<Option<String>>;
    fn store(&self, key: &str) -> anyhow::Result<()>;
}

/// Blocking confirmation step used before destructive actions
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// User-visible notification (the toast analog). Drained by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Result of a login submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted; navigate to the given location.
    Redirect(String),
    /// Stay on the screen; details are in the notices.
    Stay,
}

/// At most one row is editable at a time. The draft is seeded empty, not
/// pre-filled from the current admin name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub system_id: Uuid,
    pub draft: String,
}

pub struct LoginScreen {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn SystemsStore>,
    keys: Arc<dyn MasterKeyStore>,
    confirm: Arc<dyn ConfirmPrompt>,
    super_admin_key: String,
    master_key_length: usize,

    auth_code: String,
    busy: bool,
    unlocked: bool,
    systems: Vec<SystemRecord>,
    edit: Option<EditState>,
    notices: Vec<Notice>,
}

impl LoginScreen {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn SystemsStore>,
        keys: Arc<dyn MasterKeyStore>,
        confirm: Arc<dyn ConfirmPrompt>,
        security: &SecurityConfig,
    ) -> Self {
        Self {
            auth,
            store,
            keys,
            confirm,
            super_admin_key: security.super_admin_key.clone(),
            master_key_length: security.master_key_length,
            auth_code: String::new(),
            busy: false,
            unlocked: false,
            systems: Vec::new(),
            edit: None,
            notices: Vec::new(),
        }
    }

    // ---- Tenant login flow -------------------------------------------------

    /// Store typed input, auto-uppercased as entered
    pub fn set_auth_code(&mut self, input: &str) {
        self.auth_code = input.to_uppercase();
    }

    pub fn auth_code(&self) -> &str {
        &self.auth_code
    }

    /// Whether the submit control should be disabled
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Submit the typed code to the auth collaborator. Empty input never
    /// reaches the network; the code is sent as typed (uppercased). Exclusive
    /// access already serializes submissions; `busy` only drives `is_busy`
    /// for the UI while the call is in flight.
    pub async fn submit_login(&mut self) -> LoginOutcome {
        if self.auth_code.trim().is_empty() {
            self.notices
                .push(Notice::Error("Authentication code is required".to_string()));
            return LoginOutcome::Stay;
        }

        self.busy = true;
        let result = self.auth.login(&self.auth_code).await;
        self.busy = false;

        match result {
            Ok(true) => {
                self.notices
                    .push(Notice::Success("Login successful".to_string()));
                LoginOutcome::Redirect("/".to_string())
            }
            Ok(false) => {
                self.notices
                    .push(Notice::Error("Invalid authentication code".to_string()));
                LoginOutcome::Stay
            }
            Err(e) => {
                tracing::error!("login error: {}", e);
                self.notices
                    .push(Notice::Error("An unexpected error occurred".to_string()));
                LoginOutcome::Stay
            }
        }
    }

    // ---- Super admin gate --------------------------------------------------

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn systems(&self) -> &[SystemRecord] {
        &self.systems
    }

    /// Compare the entered key against the configured passphrase. On a match,
    /// fetch the systems table and regenerate + persist the master key. The
    /// panel only unlocks (and the key is only written) after a successful
    /// fetch; a failed fetch leaves prior state untouched.
    pub async fn unlock_admin(&mut self, entered_key: &str) -> bool {
        if entered_key != self.super_admin_key {
            self.notices
                .push(Notice::Error("Invalid super admin key".to_string()));
            return false;
        }

        match self.store.list_systems().await {
            Ok(systems) => {
                self.systems = systems;
                self.unlocked = true;

                let master_key = generate_master_key(self.master_key_length);
                if let Err(e) = self.keys.store(&master_key) {
                    tracing::error!("failed to persist master key: {}", e);
                    self.notices
                        .push(Notice::Error("Failed to save master key".to_string()));
                }
                true
            }
            Err(e) => {
                tracing::error!("failed to fetch systems: {}", e);
                self.notices
                    .push(Notice::Error("Failed to fetch systems data".to_string()));
                false
            }
        }
    }

    /// Last persisted master key, for display next to the table
    pub fn current_master_key(&self) -> Option<String> {
        self.keys.load().unwrap_or(None)
    }

    // ---- Admin name edit ---------------------------------------------------

    pub fn edit(&self) -> Option<&EditState> {
        self.edit.as_ref()
    }

    /// Switch a row into edit mode with an empty draft, replacing any prior
    /// edit state
    pub fn begin_edit(&mut self, system_id: Uuid) {
        self.edit = Some(EditState {
            system_id,
            draft: String::new(),
        });
    }

    pub fn set_edit_draft(&mut self, draft: &str) {
        if let Some(edit) = &mut self.edit {
            edit.draft = draft.to_string();
        }
    }

    /// Discard the edit state without any network call
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Save the drafted admin name for the row in edit mode. Success clears
    /// the edit state and refetches the full list; failure leaves the row in
    /// edit mode with the typed draft (observed production behavior).
    pub async fn save_admin_name(&mut self) {
        let Some(edit) = self.edit.clone() else {
            return;
        };
        if edit.draft.trim().is_empty() {
            self.notices
                .push(Notice::Error("Admin name is required".to_string()));
            return;
        }

        match self.store.update_admin_name(edit.system_id, &edit.draft).await {
            Ok(()) => {
                self.notices
                    .push(Notice::Success("Admin name updated successfully".to_string()));
                self.edit = None;
                self.refresh_systems().await;
            }
            Err(e) => {
                tracing::error!("failed to update admin name: {}", e);
                self.notices
                    .push(Notice::Error("Failed to update admin name".to_string()));
            }
        }
    }

    // ---- Deletion ----------------------------------------------------------

    /// Delete a system after explicit confirmation. Declining aborts with no
    /// effect. Success removes the record locally by id, without a refetch.
    pub async fn delete_system(&mut self, id: Uuid) {
        let confirmed = self.confirm.confirm(
            "Are you sure you want to delete this system? This action cannot be undone.",
        );
        if !confirmed {
            return;
        }

        match self.store.delete_system(id).await {
            Ok(()) => {
                self.notices
                    .push(Notice::Success("System deleted successfully".to_string()));
                self.systems.retain(|s| s.id != id);
            }
            Err(e) => {
                tracing::error!("failed to delete system: {}", e);
                self.notices
                    .push(Notice::Error("Failed to delete system".to_string()));
            }
        }
    }

    // ---- Notices -----------------------------------------------------------

    /// Drain pending notifications for display
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    async fn refresh_systems(&mut self) {
        match self.store.list_systems().await {
            Ok(systems) => self.systems = systems,
            Err(e) => {
                tracing::error!("failed to fetch systems: {}", e);
                self.notices
                    .push(Notice::Error("Failed to fetch systems data".to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_key_has_requested_length() {
        assert_eq!(generate_master_key(9).len(), 9);
        assert_eq!(generate_master_key(32).len(), 32);
    }

    #[test]
    fn master_key_draws_only_from_alphabet() {
        let key = generate_master_key(200);
        assert!(key
            .bytes()
            .all(|b| MASTER_KEY_ALPHABET.contains(&b)));
    }

    #[test]
    fn master_keys_are_not_repeated() {
        assert_ne!(generate_master_key(9), generate_master_key(9));
    }
}
