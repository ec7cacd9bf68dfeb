use serde_json::json;

use crate::cli::{remote, utils, OutputFormat};
use crate::screen::LoginOutcome;

pub async fn handle(code: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let typed = match code {
        Some(code) => code,
        None => utils::prompt_line("Authentication code: ")?,
    };

    let mut screen = super::build_screen(None)?;
    screen.set_auth_code(&typed);

    if matches!(output_format, OutputFormat::Text) {
        println!("Authenticating...");
    }

    let outcome = screen.submit_login().await;
    utils::emit_notices(&output_format, &screen.take_notices())?;

    // Always shown under the form, whatever the outcome
    if matches!(output_format, OutputFormat::Text) {
        println!("{}", utils::new_system_hint(&remote::new_system_url()));
    }

    match outcome {
        LoginOutcome::Redirect(target) => {
            utils::output_success(
                &output_format,
                &format!("Redirecting to {}", target),
                Some(json!({ "redirect": target })),
            )?;
            Ok(())
        }
        LoginOutcome::Stay => anyhow::bail!("login failed"),
    }
}
