use serde_json::{json, Value};

use crate::access::{decide, AccessDecision, AccessTable};
use crate::cli::utils::output_fields;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn routes(output_format: OutputFormat) -> anyhow::Result<()> {
    let table = AccessTable::default();

    match output_format {
        OutputFormat::Json => {
            let lists: Vec<Value> = table
                .lists()
                .iter()
                .map(|(classification, patterns)| {
                    json!({
                        "classification": classification,
                        "patterns": patterns.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&lists)?);
        }
        OutputFormat::Text => {
            for (priority, (classification, patterns)) in table.lists().iter().enumerate() {
                println!("{}. {}", priority + 1, classification);
                for pattern in patterns {
                    println!("     {}", pattern);
                }
            }
            println!("   anything else: unclassified");
        }
    }
    Ok(())
}

pub fn classify(path: &str, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let classification = AccessTable::default().classify(path);
    let policy = config.security.unclassified_policy;

    let anonymous = match decide(classification, None, policy) {
        AccessDecision::Allow => "allow",
        AccessDecision::Challenge => "challenge (401)",
    };

    output_fields(
        &output_format,
        &[
            ("path", json!(path)),
            ("classification", json!(classification)),
            ("anonymous", json!(anonymous)),
            ("unclassified_policy", json!(policy)),
        ],
    )
}
