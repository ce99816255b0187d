use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::{user_error, App};
use crate::OutputFormat;

pub async fn run_import(app: &mut App, file: &Path, format: &OutputFormat) -> Result<()> {
    let summary = app.session.import_file(file).await.map_err(user_error)?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "added": summary.added,
                "merged": summary.merged,
                "collapsed": summary.collapsed,
            })
        ),
        OutputFormat::Plain => {
            println!(
                "Imported {} new words, merged tags into {} existing words",
                summary.added, summary.merged
            );
            if summary.collapsed > 0 {
                println!("Combined {} duplicate words already in the list", summary.collapsed);
            }
        }
    }
    Ok(())
}

pub fn run_export(app: &App, dir: Option<PathBuf>, format: &OutputFormat) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let path = app.session.export_to(&dir).map_err(user_error)?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "path": path.to_string_lossy(),
                "count": app.session.store().len(),
            })
        ),
        OutputFormat::Plain => println!(
            "Exported {} words to {}",
            app.session.store().len(),
            path.display()
        ),
    }
    Ok(())
}
