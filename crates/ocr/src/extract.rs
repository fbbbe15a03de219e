use std::sync::OnceLock;

use orna_core::{RecognizedText, StatKey, StatMap};
use regex::Regex;

// ── Compiled rule table ──────────────────────────────────────────────────────

/// One `(key, pattern)` pair per stat, matched case-insensitively against the
/// joined text. Rules are independent; several may hit the same line.
fn stat_rules() -> &'static [(StatKey, Regex)] {
    static RULES: OnceLock<Vec<(StatKey, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        StatKey::ALL
            .into_iter()
            .map(|key| {
                let pattern = format!(r"(?i){}[:\s]+(\d+)", regex::escape(key.label()));
                (key, Regex::new(&pattern).expect("invalid regex"))
            })
            .collect()
    })
}

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Pull every recognizable stat out of OCR text. Stats without a match
    /// are left out of the map.
    pub fn extract_stats(text: &RecognizedText) -> StatMap {
        let joined = text.joined();
        let stats: StatMap = stat_rules()
            .iter()
            .filter_map(|(key, re)| first_value(re, &joined).map(|v| (*key, v)))
            .collect();
        tracing::debug!(detected = stats.len(), "extracted stats");
        stats
    }
}

/// Digits captured by the first match. A run too long for `u32` counts as
/// not detected.
fn first_value(re: &Regex, text: &str) -> Option<u32> {
    let c = re.captures(text)?;
    c.get(1)?.as_str().parse().ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
