use anyhow::{Context, Error, Result};
use csv::{Reader, ReaderBuilder};
use tracing::info;

use super::utils::{parse_datetime, parse_decimal};
use crate::models::Position;

/// Reads `owner_id,symbol,quantity,average_cost[,created_at]` rows (with header).
pub fn import_positions(path: &str) -> Result<Vec<Position>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file at path: {}", path))?;
    let mut positions = Vec::new();

    for (row_idx, record) in reader.records().enumerate() {
        let rec =
            record.with_context(|| format!("Failed to read CSV record at row {}", row_idx + 1))?;

        if rec.len() < 4 {
            return Err(Error::msg(format!(
                "Invalid CSV format at row {}: expected at least 4 columns, found {}",
                row_idx + 1,
                rec.len()
            )));
        }

        let quantity = parse_decimal(rec[2].trim(), "quantity")
            .with_context(|| format!("Row {}", row_idx + 1))?;
        let average_cost = parse_decimal(rec[3].trim(), "average cost")
            .with_context(|| format!("Row {}", row_idx + 1))?;

        let mut position = Position::new(rec[0].trim(), rec[1].trim(), quantity, average_cost)
            .with_context(|| format!("Rejected position at row {}", row_idx + 1))?;

        if let Some(created_at) = rec.get(4).map(str::trim).filter(|field| !field.is_empty()) {
            let created_at =
                parse_datetime(created_at).with_context(|| format!("Row {}", row_idx + 1))?;
            position = position.with_created_at(created_at);
        }

        positions.push(position);
    }

    info!(path, count = positions.len(), "imported positions");
    Ok(positions)
}

/// Reads the owner registry: one `owner_id` per row (with header).
pub fn import_owners(path: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file at path: {}", path))?;
    let mut owners = Vec::new();

    for (row_idx, record) in reader.records().enumerate() {
        let rec =
            record.with_context(|| format!("Failed to read CSV record at row {}", row_idx + 1))?;
        match rec.get(0).map(str::trim) {
            Some(owner) if !owner.is_empty() => owners.push(owner.to_string()),
            _ => {
                return Err(Error::msg(format!(
                    "Missing owner id at row {}",
                    row_idx + 1
                )));
            }
        }
    }

    Ok(owners)
}
