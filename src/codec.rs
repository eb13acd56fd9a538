//! Spread notation.
//!
//! Two textual forms are understood:
//! - compact: `252/4/0/252/0/0` in HP/Atk/Def/SpA/SpD/Spe order
//! - labeled (Showdown): `252 HP / 4 Def / 252 SpA`, optionally prefixed with
//!   `EVs:` or `IVs:`, any subset in any order.
//!
//! Parsing never fails. Anything that cannot be read falls back to the
//! caller's default for that stat.

use crate::consts::MAX_IV;
use crate::stats::{Stat, StatTable};
use itertools::Itertools;

pub fn parse_spread(text: &str, default_value: u16) -> StatTable {
    let text = text.trim();
    if text.is_empty() {
        return StatTable::splat(default_value);
    }

    parse_compact(text, default_value).unwrap_or_else(|| parse_labeled(text, default_value))
}

/// Missing stats default to 0.
pub fn parse_evs(text: &str) -> StatTable {
    parse_spread(text, 0)
}

/// Missing stats (or a missing string) default to 31.
pub fn parse_ivs(text: Option<&str>) -> StatTable {
    match text {
        Some(t) => parse_spread(t, MAX_IV),
        None => StatTable::perfect_ivs(),
    }
}

fn parse_compact(text: &str, default_value: u16) -> Option<StatTable> {
    let parts: Vec<&str> = text.split('/').map(str::trim).collect();
    if parts.len() != 6 || parts[0].chars().any(|c| c.is_alphabetic()) {
        return None;
    }

    let mut table = StatTable::splat(default_value);
    for (stat, part) in Stat::ALL.iter().zip(&parts) {
        if let Ok(v) = part.parse::<u16>() {
            table[*stat] = v;
        }
    }
    Some(table)
}

fn strip_prefix(text: &str) -> &str {
    let lower = text.to_ascii_lowercase();
    for prefix in ["evs:", "ivs:", "ev:", "iv:"] {
        if lower.starts_with(prefix) {
            return text[prefix.len()..].trim_start();
        }
    }
    text
}

fn parse_labeled(text: &str, default_value: u16) -> StatTable {
    let mut table = StatTable::splat(default_value);

    for part in strip_prefix(text).split('/') {
        let part = part.trim();
        let Some((num, label)) = part.split_once(char::is_whitespace) else {
            continue;
        };
        let (Ok(value), Some(stat)) = (num.parse::<u16>(), Stat::from_label(label)) else {
            continue;
        };
        table[stat] = value;
    }

    table
}

/// `H/A/D/SA/SD/S`
pub fn to_compact(table: &StatTable) -> String {
    table.iter().map(|(_, v)| v).join("/")
}

/// `252 HP / 4 Def / 252 SpA`, omitting zeros.
pub fn to_labeled(table: &StatTable) -> String {
    let parts = table
        .iter()
        .filter(|&(_, v)| v > 0)
        .map(|(s, v)| format!("{} {}", v, s.label()))
        .join(" / ");

    if parts.is_empty() {
        "0 HP".to_string()
    } else {
        parts
    }
}

/// IV line convention: only stats below 31 are listed. Empty when all are 31.
pub fn to_labeled_ivs(table: &StatTable) -> String {
    table
        .iter()
        .filter(|&(_, v)| v != MAX_IV)
        .map(|(s, v)| format!("{} {}", v, s.label()))
        .join(" / ")
}
