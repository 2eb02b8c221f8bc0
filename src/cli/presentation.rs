//! Presentation: render trees, node listings and mirror results as text.

use crate::cli::parse::RenderFormat;
use crate::error::AppError;
use crate::mirror::{MirrorMode, MirrorReport};
use crate::tree::{NodeRef, ScanWarning, Snapshot};
use comfy_table::Table;
use std::path::Path;

const CHECKSUM_PREFIX_LEN: usize = 16;

pub fn format_snapshot(snapshot: &Snapshot, format: RenderFormat) -> Result<String, AppError> {
    let text = match format {
        RenderFormat::Json => snapshot.to_json()?,
        RenderFormat::Yaml => snapshot.to_yaml()?,
    };
    Ok(text)
}

/// Table of nodes with their type, depth and shortened checksum.
pub fn format_node_table(nodes: &[NodeRef<'_>]) -> String {
    if nodes.is_empty() {
        return "No entries.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Path", "Type", "Depth", "Checksum"]);
    for node in nodes {
        let checksum = node
            .checksum()
            .map(|c| c.chars().take(CHECKSUM_PREFIX_LEN).collect::<String>())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            node.path().display().to_string(),
            node.node_type().to_string(),
            node.depth().to_string(),
            checksum,
        ]);
    }
    table.to_string()
}

pub fn format_warnings(warnings: &[ScanWarning]) -> String {
    let mut s = format!("Warnings ({}):", warnings.len());
    for w in warnings {
        s.push_str(&format!("\n  - {}", w));
    }
    s
}

pub fn format_mirror_report(
    mode: MirrorMode,
    source: &Path,
    destination: &Path,
    report: &MirrorReport,
) -> String {
    let verb = match mode {
        MirrorMode::Copy => "Copied",
        MirrorMode::Replicate => "Replicated",
        MirrorMode::Replace => "Replaced",
    };
    format!(
        "{} {} -> {}\n  Directories created: {}\n  Files written: {}\n  Files skipped: {}",
        verb,
        source.display(),
        destination.display(),
        report.directories_created,
        report.files_written,
        report.files_skipped
    )
}
