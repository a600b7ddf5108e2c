//! Per-person workload board: merges the performance and capacity datasets
//! into ranked rows.
//!
//! The official rank is recomputed from scratch on every merge via a side
//! sort by score; it is never cached on the row inputs, so re-sorting the
//! board by any display column cannot move anyone's rank badge.

use std::collections::HashMap;

use rollout_types::{
    CapacityRecord, MergedWorkloadRow, PerformanceRecord, SortDirection, WorkloadSortKey,
};

/// Merge the two per-person datasets into one board, ranked by score.
///
/// A person present in only one source still appears, with the other side's
/// fields defaulted to zero and Low risk. The returned list is sorted by
/// score descending; use [`sort_rows`] for a different display order.
pub fn merge(
    performance: &[PerformanceRecord],
    capacity: &[CapacityRecord],
) -> Vec<MergedWorkloadRow> {
    let mut rows: Vec<MergedWorkloadRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for perf in performance {
        let idx = slot(&mut rows, &mut index, &perf.name);
        let row = &mut rows[idx];
        row.score = perf.score;
        row.completed_count = perf.completed_count;
        row.completed_points = perf.completed_points;
        row.wip_count = perf.wip_count;
        row.on_time_pct = perf.on_time_pct;
    }

    for cap in capacity {
        let idx = slot(&mut rows, &mut index, &cap.name);
        let row = &mut rows[idx];
        row.current_points = cap.current_points;
        row.max_points = cap.max_points;
        row.utilization_pct = cap.utilization_pct;
        row.risk = cap.risk;
        row.networks = cap.networks.clone();
        row.total_stores = cap.store_count;
    }

    for row in &mut rows {
        row.workload_index = row.current_points + row.completed_points;
        row.total_stores += row.completed_count;
    }

    assign_ranks(&mut rows);
    rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    rows
}

/// Re-sort rows for display. Ranks are left untouched, so the rank badge is
/// invariant to the chosen column.
pub fn sort_rows(rows: &mut [MergedWorkloadRow], key: WorkloadSortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = match key {
            WorkloadSortKey::Score => a.score.total_cmp(&b.score),
            WorkloadSortKey::Name => a.name.cmp(&b.name),
            WorkloadSortKey::WorkloadIndex => a.workload_index.total_cmp(&b.workload_index),
            WorkloadSortKey::TotalStores => a.total_stores.cmp(&b.total_stores),
            WorkloadSortKey::OnTimePct => a.on_time_pct.total_cmp(&b.on_time_pct),
            WorkloadSortKey::Utilization => a.utilization_pct.total_cmp(&b.utilization_pct),
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Stable side sort by score descending; ties keep input order.
fn assign_ranks(rows: &mut [MergedWorkloadRow]) {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| rows[b].score.total_cmp(&rows[a].score));
    for (pos, idx) in order.into_iter().enumerate() {
        rows[idx].rank = pos as u32 + 1;
    }
}

fn slot(rows: &mut Vec<MergedWorkloadRow>, index: &mut HashMap<String, usize>, name: &str) -> usize {
    if let Some(&idx) = index.get(name) {
        return idx;
    }
    rows.push(MergedWorkloadRow {
        name: name.to_string(),
        ..MergedWorkloadRow::default()
    });
    let idx = rows.len() - 1;
    index.insert(name.to_string(), idx);
    idx
}
