use std::path::{Path, PathBuf};

/// Returns the default path of the contacts database
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/contact-lookup/contacts.db`
/// - **Linux**: `~/.local/share/contact-lookup/contacts.db`
/// - **Windows**: `%LOCALAPPDATA%\contact-lookup\contacts.db`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("contact-lookup").join("contacts.db"))
}

/// Open (creating if needed) and migrate the database at `db_path`
pub fn initialize_database(
    db_path: &Path,
) -> anyhow::Result<std::sync::Arc<crate::database::Database>> {
    let db = crate::database::Database::new(db_path)?;
    Ok(std::sync::Arc::new(db))
}
