use anyhow::{Context, Result};
use serde_json::json;

use dtree_core::config::LimitsConfig;
use dtree_core::determinism::tree_fingerprint;
use dtree_core::parse::parse_tree_bytes;

use crate::io::input;
use crate::output;

pub fn run(input_path: &str, limits: &LimitsConfig) -> Result<()> {
    let bytes = input::read_input(input_path, limits.max_json_bytes)?;
    let tree = parse_tree_bytes(&bytes, limits).with_context(|| format!("reading {input_path}"))?;
    let fingerprint = tree_fingerprint(&tree)?;

    if output::is_json() {
        output::print(&json!({ "fingerprint": fingerprint }))
    } else {
        output::line(&fingerprint);
        Ok(())
    }
}
