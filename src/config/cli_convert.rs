//! CLI value parsing and conversion helpers

use crate::config::cli::LayoutArg;
use crate::config::LayoutMode;
use anyhow::Result;

/// Parse a record count with an optional decimal suffix
///
/// Accepts plain integers ("250000") or a k/m/g suffix ("250k", "2m", "1g"),
/// case-insensitive. Suffixes are decimal: 1k = 1,000.
pub fn parse_count(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        anyhow::bail!("empty record count");
    }

    let lower = trimmed.to_ascii_lowercase();
    let (digits, multiplier) = match lower.as_bytes().last() {
        Some(b'k') => (&lower[..lower.len() - 1], 1_000usize),
        Some(b'm') => (&lower[..lower.len() - 1], 1_000_000),
        Some(b'g') => (&lower[..lower.len() - 1], 1_000_000_000),
        _ => (lower.as_str(), 1),
    };

    let value: usize = digits
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid record count: {}", input))?;

    value
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("record count overflows: {}", input))
}

/// Convert the CLI layout argument to the config layout mode
pub fn convert_layout(layout: LayoutArg) -> LayoutMode {
    match layout {
        LayoutArg::Records => LayoutMode::Records,
        LayoutArg::Columns => LayoutMode::Columns,
        LayoutArg::Both => LayoutMode::Both,
    }
}
