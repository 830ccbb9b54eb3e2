use std::path::Path;

use anyhow::Context;
use tally_config::TallyConfig;

/// Read `.env`, TOML layers, and `TALLY_*` overrides.
pub fn load_config() -> anyhow::Result<TallyConfig> {
    TallyConfig::load_with_dotenv().context("failed to load tally configuration")
}

/// Delete the previous run's store so every start begins empty.
pub fn reset_store(path: &Path) -> anyhow::Result<()> {
    tracing::info!(path = %path.display(), "deleting any prior database file");
    let existed = tally_db::remove_store_files(path)
        .with_context(|| format!("failed to delete database file {}", path.display()))?;
    if existed {
        tracing::debug!(path = %path.display(), "removed stale database");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_removes_existing_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.db");
        std::fs::write(&path, b"stale").unwrap();

        reset_store(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn reset_tolerates_absent_store() {
        let dir = tempfile::tempdir().unwrap();
        reset_store(&dir.path().join("never-created.db")).unwrap();
    }

    #[test]
    fn reset_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = reset_store(dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to delete database file"));
    }
}
