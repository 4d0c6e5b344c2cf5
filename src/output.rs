// WHY: Output file naming and writing for converted text
// File mode writes next to the source; interactive mode writes a side-by-side comparison

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

use crate::report::rule;

/// Default stem for interactive saves when the user gives no name
pub const DEFAULT_OUTPUT_NAME: &str = "output";

/// Derive `<stem>_human.txt` next to the source file
pub fn generate_output_path(source_path: &Path) -> PathBuf {
    let file_name = source_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    let stem = file_name.strip_suffix(".txt").unwrap_or(file_name);
    source_path.with_file_name(format!("{stem}_human.txt"))
}

/// `<name>.txt`, falling back to the default name when `name` is blank
pub fn comparison_output_path(dir: &Path, name: &str) -> PathBuf {
    let name = name.trim();
    let name = if name.is_empty() { DEFAULT_OUTPUT_NAME } else { name };
    dir.join(format!("{name}.txt"))
}

/// Original and converted text separated by a rule
pub fn format_comparison(original: &str, converted: &str) -> String {
    format!(
        "TEKS ORIGINAL:\n{original}\n\n{}\n\nTEKS HASIL KONVERSI:\n{converted}",
        rule()
    )
}

async fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Write converted text to `path`
pub async fn write_converted_text(path: &Path, converted: &str) -> Result<PathBuf> {
    write_text(path, converted).await?;
    info!("Saved converted text to {}", path.display());
    Ok(path.to_path_buf())
}

/// Write the original/converted comparison to `<dir>/<name>.txt`
pub async fn write_comparison(dir: &Path, name: &str, original: &str, converted: &str) -> Result<PathBuf> {
    let path = comparison_output_path(dir, name);
    write_text(&path, &format_comparison(original, converted)).await?;
    info!("Saved comparison to {}", path.display());
    Ok(path)
}
