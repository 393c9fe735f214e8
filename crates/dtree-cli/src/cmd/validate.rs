use anyhow::{bail, Context, Result};
use serde::Serialize;

use dtree_core::config::LimitsConfig;
use dtree_core::determinism::tree_fingerprint;
use dtree_core::model::{NodeKind, ValidatedTree};
use dtree_core::parse::parse_tree_bytes;
use dtree_core::ValidationError;

use crate::io::{export, input};
use crate::output;

#[derive(Serialize)]
struct Accepted<'a> {
    ok: bool,
    nodes: usize,
    edges: usize,
    fingerprint: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    out: Option<&'a str>,
}

#[derive(Serialize)]
struct Rejected<'a> {
    ok: bool,
    error: &'static str,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    message: String,
}

pub fn run(input_path: &str, out: Option<&str>, limits: &LimitsConfig) -> Result<()> {
    let bytes = input::read_input(input_path, limits.max_json_bytes)?;

    let tree = match parse_tree_bytes(&bytes, limits) {
        Ok(t) => t,
        Err(e) => match e.as_validation() {
            Some(v) => {
                report_rejected(v)?;
                bail!("{input_path}: validation failed");
            }
            None => return Err(e).with_context(|| format!("reading {input_path}")),
        },
    };

    if let Some(path) = out {
        export::write_tree(path, &tree)?;
    }

    let fingerprint = tree_fingerprint(&tree)?;
    report_accepted(&tree, &fingerprint, out)
}

fn report_accepted(tree: &ValidatedTree, fingerprint: &str, out: Option<&str>) -> Result<()> {
    if output::is_json() {
        return output::print(&Accepted {
            ok: true,
            nodes: tree.nodes().len(),
            edges: tree.edges().len(),
            fingerprint,
            out,
        });
    }

    output::status(
        true,
        &format!(
            "{} nodes, {} edges",
            tree.nodes().len(),
            tree.edges().len()
        ),
    )?;
    for kind in NodeKind::ALL {
        let n = tree.count_nodes(kind);
        if n > 0 {
            output::line(&format!("  {:<14} {n}", kind.as_str()));
        }
    }
    output::line(&format!("fingerprint: {fingerprint}"));
    if let Some(path) = out {
        output::line(&format!("wrote: {path}"));
    }
    Ok(())
}

fn report_rejected(e: &ValidationError) -> Result<()> {
    if output::is_json() {
        return output::print(&Rejected {
            ok: false,
            error: e.kind().as_str(),
            path: e.path(),
            id: e.id(),
            message: e.to_string(),
        });
    }

    output::status(false, &format!("[{}] {e}", e.kind().as_str()))
}
