use anyhow::Result;
use serde_json::json;

use dtree_core::model::{EdgeKind, NodeKind};

use crate::output;

pub fn run() -> Result<()> {
    if output::is_json() {
        return output::print(&json!({
            "nodeKinds": NodeKind::NAMES,
            "edgeKinds": EdgeKind::NAMES,
        }));
    }

    output::line("node kinds:");
    for name in NodeKind::NAMES {
        output::line(&format!("  {name}"));
    }
    output::line("edge kinds:");
    for name in EdgeKind::NAMES {
        output::line(&format!("  {name}"));
    }
    Ok(())
}
