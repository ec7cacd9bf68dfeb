pub mod admin;
pub mod login;

use std::sync::Arc;

use crate::cli::config::FileMasterKeyStore;
use crate::cli::remote::{self, HttpAuthProvider, HttpSystemsStore};
use crate::cli::utils::StdinConfirm;
use crate::config;
use crate::screen::LoginScreen;

/// Build a fresh screen wired to the remote collaborators. Screen state lives
/// only for the duration of one invocation.
pub fn build_screen(admin_key: Option<&str>) -> anyhow::Result<LoginScreen> {
    let base_url = remote::base_url();

    Ok(LoginScreen::new(
        Arc::new(HttpAuthProvider::new(base_url.clone())),
        Arc::new(HttpSystemsStore::new(
            base_url,
            admin_key.unwrap_or_default().to_string(),
        )),
        Arc::new(FileMasterKeyStore::default_location()?),
        Arc::new(StdinConfirm),
        &config::config().security,
    ))
}
