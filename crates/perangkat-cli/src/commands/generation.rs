//! Generation bookkeeping commands.

use anyhow::{Context, Result};
use serde::Deserialize;

use perangkat_core::ResourceId;

#[derive(Debug, Deserialize)]
struct GenerationRow {
    jenis: String,
    status: String,
    bab_nomor: Option<i32>,
    bab_judul: Option<String>,
    current_step: Option<i32>,
    total_steps: Option<i32>,
    file_path: Option<String>,
}

/// Print a master's generation rows.
pub async fn list(api_url: &str, master_id: &str) -> Result<()> {
    let master_id: ResourceId = master_id.parse().context("Invalid master id")?;
    let url = format!("{}/api/v1/masters/{}/generation", api_url, master_id);
    let response = reqwest::Client::new().get(&url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        anyhow::bail!("API error ({}): {}", status.as_u16(), text);
    }

    let rows: Vec<GenerationRow> = response.json().await?;
    if rows.is_empty() {
        println!("No generation rows for master {}", master_id);
        return Ok(());
    }

    for row in &rows {
        let scope = match (row.bab_nomor, row.bab_judul.as_deref()) {
            (Some(nomor), Some(judul)) => format!("Bab {}: {}", nomor, judul),
            _ => "-".to_string(),
        };
        let steps = match (row.current_step, row.total_steps) {
            (Some(current), Some(total)) => format!("{}/{}", current, total),
            _ => String::new(),
        };
        println!(
            "  {:<8} {:<14} {:<32} {:>5}  {}",
            row.jenis,
            row.status,
            scope,
            steps,
            row.file_path.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
