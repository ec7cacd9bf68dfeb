use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::{utils, OutputFormat};
use crate::screen::{LoginScreen, Notice};

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Unlock the panel and show all systems")]
    Panel {
        #[arg(long, help = "Super admin key (will prompt if not provided)")]
        key: Option<String>,
    },

    #[command(about = "Edit a system's admin name")]
    Edit {
        #[arg(help = "System id")]
        system: Uuid,

        #[arg(long, help = "Super admin key (will prompt if not provided)")]
        key: Option<String>,
    },

    #[command(about = "Delete a system (asks for confirmation)")]
    Delete {
        #[arg(help = "System id")]
        system: Uuid,

        #[arg(long, help = "Super admin key (will prompt if not provided)")]
        key: Option<String>,
    },
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Panel { key } => {
            let screen = unlock(key, &output_format).await?;

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "master_key": screen.current_master_key(),
                            "systems": screen.systems()
                        }))?
                    );
                }
                OutputFormat::Text => {
                    let master_key = screen
                        .current_master_key()
                        .unwrap_or_else(|| "Not generated".to_string());
                    println!("Current Master Key: {}", master_key);
                    println!();
                    utils::print_systems_table(screen.systems());
                }
            }

            Ok(())
        }

        AdminCommands::Edit { system, key } => {
            let mut screen = unlock(key, &output_format).await?;

            // Edit state is seeded empty, not pre-filled from the current name
            screen.begin_edit(system);
            let draft = utils::prompt_line("New admin name: ")?;
            screen.set_edit_draft(&draft);
            screen.save_admin_name().await;

            utils::emit_notices(&output_format, &screen.take_notices())?;

            if screen.edit().is_some() {
                anyhow::bail!("admin name not updated");
            }
            Ok(())
        }

        AdminCommands::Delete { system, key } => {
            let mut screen = unlock(key, &output_format).await?;

            screen.delete_system(system).await;
            let notices = screen.take_notices();

            if notices.is_empty() {
                // Confirmation declined: nothing happened
                utils::output_success(&output_format, "Deletion cancelled", None)?;
                return Ok(());
            }

            utils::emit_notices(&output_format, &notices)?;
            if notices.iter().any(|n| matches!(n, Notice::Error(_))) {
                anyhow::bail!("system not deleted");
            }
            Ok(())
        }
    }
}

/// Run the administrative gate: prompt for the key when absent, compare it
/// client-side, and fetch the systems table on a match.
async fn unlock(key: Option<String>, output_format: &OutputFormat) -> anyhow::Result<LoginScreen> {
    let entered = match key {
        Some(key) => key,
        None => utils::prompt_line("Super admin key: ")?,
    };

    let mut screen = super::build_screen(Some(&entered))?;
    let unlocked = screen.unlock_admin(&entered).await;
    utils::emit_notices(output_format, &screen.take_notices())?;

    if !unlocked {
        anyhow::bail!("super admin panel remains locked");
    }
    Ok(screen)
}
