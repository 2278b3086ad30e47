use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use fitlife_core::models::backup_file_name;

use super::Store;
use super::helpers::confirm;

pub(crate) fn cmd_export(store: &Store, out_dir: Option<&Path>, stdout: bool) -> Result<()> {
    let document = store.export_json()?;

    if stdout {
        println!("{document}");
        return Ok(());
    }

    let dir = out_dir.unwrap_or_else(|| Path::new("."));
    let path = dir.join(backup_file_name(Local::now().date_naive()));
    std::fs::write(&path, document)
        .with_context(|| format!("Failed to write backup: {}", path.display()))?;

    tracing::info!(event = "cli.export.written", path = %path.display());
    println!("Data exported to {}", path.display());
    Ok(())
}

pub(crate) fn cmd_import(store: &mut Store, path: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let reload = store
        .import_json(&text)
        .context("Error importing data. Please check the file format")?;
    let report = reload.reload(store);
    if !report.is_clean() {
        tracing::warn!(
            event = "cli.import.reload_defaulted",
            defaulted = report.substitutions.len()
        );
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "imported": true,
                "workouts": store.workouts().len(),
                "meals": store.meals().len(),
                "notes": store.notes().len(),
            })
        );
    } else {
        println!("Data imported successfully!\n");
        println!("  Workouts: {}", store.workouts().len());
        println!("  Meals:    {}", store.meals().len());
        println!("  Notes:    {}", store.notes().len());
    }
    Ok(())
}

pub(crate) fn cmd_reset(store: &mut Store, yes: bool) -> Result<()> {
    if !yes
        && !confirm("Are you sure you want to reset all data? This action cannot be undone.")?
    {
        eprintln!("Cancelled");
        return Ok(());
    }

    let reload = store.reset_all()?;
    let report = reload.reload(store);
    tracing::info!(
        event = "cli.reset.reloaded",
        defaulted = report.substitutions.len()
    );
    println!("All data has been reset!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_store;
    use fitlife_core::Storage;

    #[test]
    fn test_export_then_import_into_fresh_store() {
        let tmp = tempfile::tempdir().unwrap();
        let mut source = test_store();
        source.toggle_workout_complete(1).unwrap();
        source.delete_note(2).unwrap();
        cmd_export(&source, Some(tmp.path()), false).unwrap();

        let path = tmp
            .path()
            .join(backup_file_name(Local::now().date_naive()));
        assert!(path.exists());

        let mut target = test_store();
        cmd_import(&mut target, &path, false).unwrap();
        assert_eq!(target.state(), source.state());
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "this is not json").unwrap();

        let mut store = test_store();
        let before = store.state().clone();
        let err = cmd_import(&mut store, &path, false).unwrap_err();
        assert!(format!("{err:#}").contains("check the file format"));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_import_missing_file() {
        let mut store = test_store();
        assert!(cmd_import(&mut store, Path::new("/nonexistent/backup.json"), false).is_err());
    }

    #[test]
    fn test_reset_with_yes() {
        let mut store = test_store();
        store.delete_workout(1).unwrap();
        cmd_reset(&mut store, true).unwrap();
        assert!(store.storage().keys().unwrap().is_empty());
        assert_eq!(store.workouts().len(), 5);
    }
}
