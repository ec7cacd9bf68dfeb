use serde_json::{json, Value};
use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::screen::{ConfirmPrompt, Notice};
use crate::store::SystemRecord;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                response
                    .as_object_mut()
                    .expect("response is an object")
                    .extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "error": message
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Print the screen's pending notifications
pub fn emit_notices(output_format: &OutputFormat, notices: &[Notice]) -> anyhow::Result<()> {
    for notice in notices {
        match notice {
            Notice::Success(message) => output_success(output_format, message, None)?,
            Notice::Error(message) => output_error(output_format, message)?,
        }
    }
    Ok(())
}

/// Read one line of input after printing a label
pub fn prompt_line(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Interactive confirmation prompt, defaulting to "no"
pub struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        match prompt_line(&format!("{} [y/N]: ", message)) {
            Ok(answer) => matches!(answer.trim(), "y" | "Y" | "yes" | "Yes" | "YES"),
            Err(_) => false,
        }
    }
}

/// Footer line pointing at the external new-system request flow
pub fn new_system_hint(url: &str) -> String {
    format!("Need a new tracking system? Request one at {}", url)
}

/// Render the systems table: one row per system plus its devotee list
pub fn print_systems_table(systems: &[SystemRecord]) {
    println!(
        "{:<25} {:<12} {:<18} {:<20} {}",
        "SYSTEM NAME", "AUTH CODE", "ADMIN PASSWORD", "ADMIN NAME", "DEVOTEES"
    );
    println!("{}", "-".repeat(90));

    for system in systems {
        let admin_name = system.admin_name.as_deref().unwrap_or("Not set");
        println!(
            "{:<25} {:<12} {:<18} {:<20} {}",
            system.name,
            system.auth_code,
            system.admin_password,
            admin_name,
            system.devotees.len()
        );
        println!("  id: {}", system.id);
        for devotee in &system.devotees {
            let tag = if devotee.is_resident { "Resident" } else { "Non-Resident" };
            println!("    - {} [{}]", devotee.name, tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_system_hint_names_the_request_flow() {
        let hint = new_system_hint("http://localhost:3000/new-system");
        assert!(hint.starts_with("Need a new tracking system?"));
        assert!(hint.ends_with("http://localhost:3000/new-system"));
    }
}
