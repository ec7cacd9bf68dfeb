#![allow(dead_code)]

// In-process test doubles for the collaborator seams. Every mock records its
// calls so tests can assert exact call counts and arguments.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use sadhana_api_rust::auth::{AuthError, AuthProvider};
use sadhana_api_rust::config::SecurityConfig;
use sadhana_api_rust::screen::{ConfirmPrompt, LoginScreen, MasterKeyStore};
use sadhana_api_rust::store::{DevoteeRecord, StoreError, SystemRecord, SystemsStore};

pub const SUPER_ADMIN_KEY: &str = "SALWGP108";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthBehavior {
    Accept,
    Reject,
    Fail,
}

pub struct MockAuthProvider {
    pub behavior: AuthBehavior,
    pub calls: Mutex<Vec<String>>,
}

impl MockAuthProvider {
    pub fn new(behavior: AuthBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn login(&self, code: &str) -> Result<bool, AuthError> {
        self.calls.lock().unwrap().push(code.to_string());
        match self.behavior {
            AuthBehavior::Accept => Ok(true),
            AuthBehavior::Reject => Ok(false),
            AuthBehavior::Fail => Err(AuthError::BadResponse("auth provider down".to_string())),
        }
    }
}

#[derive(Default)]
pub struct MockSystemsStore {
    pub systems: Mutex<Vec<SystemRecord>>,
    pub fail_list: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    pub list_calls: AtomicUsize,
    pub update_calls: Mutex<Vec<(Uuid, String)>>,
    pub delete_calls: Mutex<Vec<Uuid>>,
}

impl MockSystemsStore {
    pub fn with_systems(systems: Vec<SystemRecord>) -> Self {
        Self {
            systems: Mutex::new(systems),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> Vec<(Uuid, String)> {
        self.update_calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<Uuid> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemsStore for MockSystemsStore {
    async fn list_systems(&self) -> Result<Vec<SystemRecord>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StoreError::BadResponse("list failed".to_string()));
        }
        Ok(self.systems.lock().unwrap().clone())
    }

    async fn update_admin_name(&self, id: Uuid, admin_name: &str) -> Result<(), StoreError> {
        self.update_calls
            .lock()
            .unwrap()
            .push((id, admin_name.to_string()));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(StoreError::BadResponse("update failed".to_string()));
        }

        let mut systems = self.systems.lock().unwrap();
        match systems.iter_mut().find(|s| s.id == id) {
            Some(system) => {
                system.admin_name = Some(admin_name.to_string());
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("System {} not found", id))),
        }
    }

    async fn delete_system(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_calls.lock().unwrap().push(id);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StoreError::BadResponse("delete failed".to_string()));
        }

        let mut systems = self.systems.lock().unwrap();
        if !systems.iter().any(|s| s.id == id) {
            return Err(StoreError::NotFound(format!("System {} not found", id)));
        }
        systems.retain(|s| s.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryKeyStore {
    pub value: Mutex<Option<String>>,
    pub fail_store: AtomicBool,
}

impl MemoryKeyStore {
    pub fn current(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }
}

impl MasterKeyStore for MemoryKeyStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        Ok(self.value.lock().unwrap().clone())
    }

    fn store(&self, key: &str) -> anyhow::Result<()> {
        if self.fail_store.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        *self.value.lock().unwrap() = Some(key.to_string());
        Ok(())
    }
}

pub struct ConfirmStub {
    pub answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl ConfirmStub {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ConfirmPrompt for ConfirmStub {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }
}

pub fn security_config() -> SecurityConfig {
    SecurityConfig {
        super_admin_key: SUPER_ADMIN_KEY.to_string(),
        master_key_length: 9,
    }
}

pub fn system(name: &str, auth_code: &str, devotees: Vec<(&str, bool)>) -> SystemRecord {
    SystemRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        auth_code: auth_code.to_string(),
        admin_password: format!("{}-secret", auth_code.to_lowercase()),
        admin_name: None,
        devotees: devotees
            .into_iter()
            .map(|(name, is_resident)| DevoteeRecord {
                name: name.to_string(),
                is_resident,
            })
            .collect(),
    }
}

/// Two tenants, newest first, as the list endpoint would return them
pub fn sample_systems() -> Vec<SystemRecord> {
    vec![
        system("Temple A", "TEMPLEA1", vec![("Ram Das", true), ("Shyam Das", false)]),
        system("Temple B", "TEMPLEB1", vec![("Hari Das", true)]),
    ]
}

/// Fully mocked screen plus handles onto every collaborator
pub struct Harness {
    pub auth: Arc<MockAuthProvider>,
    pub store: Arc<MockSystemsStore>,
    pub keys: Arc<MemoryKeyStore>,
    pub confirm: Arc<ConfirmStub>,
    pub screen: LoginScreen,
}

pub fn harness(behavior: AuthBehavior, systems: Vec<SystemRecord>, confirm_answer: bool) -> Harness {
    let auth = Arc::new(MockAuthProvider::new(behavior));
    let store = Arc::new(MockSystemsStore::with_systems(systems));
    let keys = Arc::new(MemoryKeyStore::default());
    let confirm = Arc::new(ConfirmStub::new(confirm_answer));

    let screen = LoginScreen::new(
        auth.clone(),
        store.clone(),
        keys.clone(),
        confirm.clone(),
        &security_config(),
    );

    Harness {
        auth,
        store,
        keys,
        confirm,
        screen,
    }
}
