use std::{fs, path::Path};

use crate::{currency::RateTable, errors::LedgerError};

/// Writes the rate table snapshot atomically by staging to a temporary file.
pub fn save_rate_table_to_file(table: &RateTable, path: &Path) -> Result<(), LedgerError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(table)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a rate table snapshot from disk, returning structured errors on failure.
pub fn load_rate_table_from_file(path: &Path) -> Result<RateTable, LedgerError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
