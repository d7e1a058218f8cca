//! Scheduler commands.

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PassSummary {
    #[serde(default)]
    skipped: bool,
    message: Option<String>,
    #[serde(default)]
    processed: usize,
    available_slots: Option<i64>,
    #[serde(default)]
    results: Vec<TaskReport>,
}

#[derive(Debug, Deserialize)]
struct TaskReport {
    id: String,
    action: String,
    success: bool,
    error: Option<String>,
}

/// Trigger one scheduling pass and print its summary.
pub async fn run(api_url: &str) -> Result<()> {
    let url = format!("{}/api/v1/scheduler/run", api_url);
    let response = reqwest::Client::new().post(&url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        anyhow::bail!("API error ({}): {}", status.as_u16(), text);
    }

    let summary: PassSummary = response.json().await?;

    if summary.skipped {
        let message = summary.message.unwrap_or_else(|| "Skipped".to_string());
        println!("{}", message);
        return Ok(());
    }
    if summary.results.is_empty() {
        let message = summary
            .message
            .unwrap_or_else(|| "Nothing to do".to_string());
        println!("{}", message);
        return Ok(());
    }

    if let Some(slots) = summary.available_slots {
        println!(
            "Dispatched {} master(s) into {} slot(s)\n",
            summary.processed, slots
        );
    }
    for task in &summary.results {
        if task.success {
            println!("✓ {} {}", task.id, task.action);
        } else {
            println!(
                "✗ {} {}: {}",
                task.id,
                task.action,
                task.error.as_deref().unwrap_or("failed")
            );
        }
    }

    let failed = summary.results.iter().filter(|task| !task.success).count();
    if failed > 0 {
        println!("\n{} of {} task(s) failed", failed, summary.results.len());
    }

    Ok(())
}
