//! In-memory record filtering for the monitor grid.
//!
//! [`apply`] is a pure function: the same records and spec always produce the
//! same order-preserving subsequence. Predicates combine with logical AND and
//! an inactive predicate (empty/`None`/`false` spec field) never restricts.

use rollout_types::{FilterSpec, StoreRecord};

/// Filter `records` down to the subsequence matching every active predicate
/// in `spec`.
pub fn apply(records: &[StoreRecord], spec: &FilterSpec) -> Vec<StoreRecord> {
    if spec.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches(record, spec))
        .cloned()
        .collect()
}

/// Evaluate every active predicate against one record, cheapest first.
pub fn matches(record: &StoreRecord, spec: &FilterSpec) -> bool {
    if spec.high_risk && !record.is_high_risk() {
        return false;
    }
    if spec.late && !record.is_late() {
        return false;
    }
    if let Some(assignee) = &spec.assignee
        && record.assignee.as_deref() != Some(assignee.as_str())
    {
        return false;
    }
    if let Some(financial) = &spec.financial_status
        && record.financial_status.as_deref() != Some(financial.as_str())
    {
        return false;
    }
    if !spec.statuses.is_empty() && !spec.statuses.iter().any(|s| *s == record.status) {
        return false;
    }
    if !spec.start.contains(record.start_date) {
        return false;
    }
    if !spec.finish.contains(record.finish_date) {
        return false;
    }
    // Substring search allocates a lowercased copy, so it runs last.
    if let Some(search) = spec.search.as_deref() {
        let needle = search.trim().to_lowercase();
        if !needle.is_empty()
            && !record.name.to_lowercase().contains(&needle)
            && !record.id.to_string().contains(&needle)
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rollout_types::DateRange;

    fn record(id: i64, name: &str, status: &str) -> StoreRecord {
        StoreRecord {
            id,
            name: name.to_string(),
            status: status.to_string(),
            assignee: None,
            network: None,
            financial_status: None,
            risk_score: 0.0,
            days_in_transit: None,
            contract_days: None,
            start_date: None,
            finish_date: None,
            predicted_date: None,
            prediction: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_spec_is_identity() {
        let records = vec![record(1, "Loja A", "in_transit"), record(2, "Loja B", "done")];
        assert_eq!(apply(&records, &FilterSpec::default()), records);
    }

    #[test]
    fn high_risk_keeps_scores_above_threshold() {
        let mut records = vec![
            record(1, "A", "x"),
            record(2, "B", "x"),
            record(3, "C", "x"),
        ];
        records[0].risk_score = 5.0;
        records[1].risk_score = 25.0;
        records[2].risk_score = 21.0;

        let spec = FilterSpec {
            high_risk: true,
            ..FilterSpec::default()
        };
        let kept: Vec<i64> = apply(&records, &spec).iter().map(|r| r.id).collect();
        assert_eq!(kept, vec![2, 3]);
    }

    #[test]
    fn combined_spec_equals_sequential_application() {
        let mut records = vec![
            record(1, "Loja Norte", "in_transit"),
            record(2, "Loja Sul", "in_transit"),
            record(3, "Loja Norte II", "done"),
        ];
        records[0].risk_score = 30.0;
        records[2].risk_score = 40.0;

        let by_status = FilterSpec {
            statuses: vec!["in_transit".to_string()],
            ..FilterSpec::default()
        };
        let by_risk = FilterSpec {
            high_risk: true,
            ..FilterSpec::default()
        };
        let combined = FilterSpec {
            statuses: vec!["in_transit".to_string()],
            high_risk: true,
            ..FilterSpec::default()
        };

        let sequential = apply(&apply(&records, &by_status), &by_risk);
        assert_eq!(apply(&records, &combined), sequential);
        assert_eq!(sequential.len(), 1);
        assert_eq!(sequential[0].id, 1);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_id() {
        let records = vec![record(104, "Loja Centro", "x"), record(2, "Outra", "x")];

        let by_name = FilterSpec {
            search: Some("CENTRO".to_string()),
            ..FilterSpec::default()
        };
        assert_eq!(apply(&records, &by_name).len(), 1);

        let by_id = FilterSpec {
            search: Some("104".to_string()),
            ..FilterSpec::default()
        };
        assert_eq!(apply(&records, &by_id)[0].id, 104);
    }

    #[test]
    fn date_bound_excludes_null_dates() {
        let mut with_date = record(1, "A", "x");
        with_date.start_date = Some(date(2026, 3, 15));
        let without_date = record(2, "B", "x");

        let spec = FilterSpec {
            start: DateRange {
                from: Some(date(2026, 3, 1)),
                to: Some(date(2026, 3, 31)),
            },
            ..FilterSpec::default()
        };
        let kept = apply(&[with_date, without_date], &spec);
        assert_eq!(kept.len(), 1, "null start date must not match the bound");
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn late_filter_requires_elapsed_past_contract() {
        let mut late = record(1, "A", "x");
        late.days_in_transit = Some(50);
        late.contract_days = Some(45);
        let mut on_time = record(2, "B", "x");
        on_time.days_in_transit = Some(45);
        on_time.contract_days = Some(45);

        let spec = FilterSpec {
            late: true,
            ..FilterSpec::default()
        };
        let kept = apply(&[late, on_time], &spec);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }
}
