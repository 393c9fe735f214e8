use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dtree_core::model::ValidatedTree;

/// Write a sanitized tree as pretty JSON, creating parent directories.
pub fn write_tree<P: AsRef<Path>>(path: P, tree: &ValidatedTree) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let bytes = serde_json::to_vec_pretty(tree)?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
