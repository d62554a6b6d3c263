use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::identity::issue_session_token;

/// Mint a session token signed with SESSION_SECRET, for local testing with curl
pub fn handle(
    user_id: &str,
    hours: Option<u64>,
    config: &AppConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let ttl = hours.unwrap_or(config.security.session_ttl_hours);

    match issue_session_token(&config.security.session_secret, user_id, ttl) {
        Ok(token) => {
            if let OutputFormat::Text = output_format {
                println!("{}", token);
                return Ok(());
            }
            output_success(
                &output_format,
                "Session token issued",
                Some(json!({ "user_id": user_id, "expires_in_hours": ttl, "token": token })),
            )
        }
        Err(e) => {
            output_error(&output_format, &e.to_string(), Some("TOKEN_ERROR"))?;
            anyhow::bail!("could not issue token for {}", user_id)
        }
    }
}
