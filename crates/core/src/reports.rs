//! Report aggregation over already loaded sharpening and saw lists.
//!
//! Grouped counts are ordered by count descending, then by key, so report
//! tables are stable across reloads.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::Datelike;
use serde::Serialize;

use crate::filtering::DateRange;
use crate::models::saw::Saw;
use crate::models::sharpening::SharpeningView;

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// One row of a grouped report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: usize,
}

/// Group `items` by `key` and count each group.
pub fn count_by<T, K, F>(items: &[T], key: F) -> Vec<GroupCount<K>>
where
    K: Eq + Hash + Ord + Clone,
    F: Fn(&T) -> K,
{
    let mut counts: HashMap<K, usize> = HashMap::new();
    for item in items {
        *counts.entry(key(item)).or_default() += 1;
    }

    let mut rows: Vec<GroupCount<K>> = counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    rows
}

/// Sharpenings per sharpening-type name.
pub fn by_sharpening_type(rows: &[SharpeningView]) -> Vec<GroupCount<String>> {
    count_by(rows, |r| r.sharpening_type_name.clone())
}

/// Sharpenings per client name.
pub fn by_client(rows: &[SharpeningView]) -> Vec<GroupCount<String>> {
    count_by(rows, |r| r.client_name.clone())
}

/// Sharpenings per intake month, keyed `YYYY-MM`.
pub fn by_intake_month(rows: &[SharpeningView]) -> Vec<GroupCount<String>> {
    count_by(rows, |r| {
        let at = r.sharpening.intake_at;
        format!("{:04}-{:02}", at.year(), at.month())
    })
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Headline numbers shown on the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_saws: usize,
    pub active_saws: usize,
    pub retired_saws: usize,
    pub pending_sharpenings: usize,
    pub completed_sharpenings: usize,
    /// Completions whose exit falls inside the requested window.
    pub completed_in_window: usize,
}

impl DashboardSummary {
    pub fn compute(saws: &[Saw], sharpenings: &[SharpeningView], window: DateRange) -> Self {
        let active_saws = saws.iter().filter(|s| s.active).count();
        let pending_sharpenings = sharpenings
            .iter()
            .filter(|r| r.sharpening.is_pending())
            .count();
        let completed_in_window = sharpenings
            .iter()
            .filter_map(|r| r.sharpening.exit_at)
            .filter(|exit| window.contains(*exit))
            .count();

        Self {
            total_saws: saws.len(),
            active_saws,
            retired_saws: saws.len() - active_saws,
            pending_sharpenings,
            completed_sharpenings: sharpenings.len() - pending_sharpenings,
            completed_in_window,
        }
    }
}
