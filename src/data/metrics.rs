use std::collections::HashMap;

use super::filter::FilteredView;

// ---------------------------------------------------------------------------
// Summary metrics (the four KPI cards)
// ---------------------------------------------------------------------------

/// Scalar statistics over a filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub count: usize,
    /// Most frequent role title; empty when the view is empty.
    pub modal_role: String,
}

impl SummaryMetrics {
    /// Compute the metrics. An empty view yields zeros and an empty role.
    pub fn compute(view: &FilteredView<'_>) -> Self {
        if view.is_empty() {
            return Self::default();
        }

        let count = view.len();
        let total: f64 = view.iter().map(|r| r.salary_usd).sum();
        let max_salary = view
            .iter()
            .map(|r| r.salary_usd)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean_salary: total / count as f64,
            max_salary,
            count,
            modal_role: modal_role(view).unwrap_or_default(),
        }
    }
}

/// Most frequent role. Ties go to the role seen first in dataset order.
pub fn modal_role(view: &FilteredView<'_>) -> Option<String> {
    // role -> (count, first position)
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, rec) in view.iter().enumerate() {
        tally.entry(rec.role.as_str()).or_insert((0, pos)).0 += 1;
    }

    tally
        .into_iter()
        .max_by(|(_, (ca, pa)), (_, (cb, pb))| ca.cmp(cb).then(pb.cmp(pa)))
        .map(|(role, _)| role.to_string())
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// Format a dollar amount as `$1,234,567` (rounded to whole dollars).
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Format a count as `1,234`.
pub fn format_count(n: usize) -> String {
    group_thousands(n as u64)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::fixtures::{record, two_records};
    use crate::data::model::{Dimension, SalaryDataset};

    #[test]
    fn two_record_example() {
        let ds = SalaryDataset::from_records(two_records());
        let view = apply(&ds, &FilterSelection::all(&ds));
        let m = SummaryMetrics::compute(&view);

        assert_eq!(m.mean_salary, 105_000.0);
        assert_eq!(m.max_salary, 150_000.0);
        assert_eq!(m.count, 2);
        assert_eq!(m.modal_role, "Data Scientist");
    }

    #[test]
    fn empty_view_is_zeroed() {
        let ds = SalaryDataset::from_records(two_records());
        let mut sel = FilterSelection::all(&ds);
        sel.select_none(Dimension::Seniority);
        let m = SummaryMetrics::compute(&apply(&ds, &sel));

        assert_eq!(m, SummaryMetrics::default());
        assert_eq!(m.mean_salary, 0.0);
        assert_eq!(m.max_salary, 0.0);
        assert_eq!(m.count, 0);
        assert_eq!(m.modal_role, "");
    }

    #[test]
    fn mode_prefers_highest_count_then_first_seen() {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "mid", "full-time", "M", "Analyst", "remote", 1.0, "USA"),
            record(2023, "mid", "full-time", "M", "Engineer", "remote", 1.0, "USA"),
            record(2023, "mid", "full-time", "M", "Engineer", "remote", 1.0, "USA"),
            record(2023, "mid", "full-time", "M", "Analyst", "remote", 1.0, "USA"),
            record(2023, "mid", "full-time", "M", "Scientist", "remote", 1.0, "USA"),
        ]);
        let view = apply(&ds, &FilterSelection::all(&ds));
        assert_eq!(modal_role(&view).as_deref(), Some("Analyst"));

        let ds = SalaryDataset::from_records(vec![
            record(2023, "mid", "full-time", "M", "Analyst", "remote", 1.0, "USA"),
            record(2023, "mid", "full-time", "M", "Engineer", "remote", 1.0, "USA"),
            record(2023, "mid", "full-time", "M", "Engineer", "remote", 1.0, "USA"),
        ]);
        let view = apply(&ds, &FilterSelection::all(&ds));
        assert_eq!(modal_role(&view).as_deref(), Some("Engineer"));
    }

    #[test]
    fn formats_currency_and_counts() {
        assert_eq!(format_usd(105_000.0), "$105,000");
        assert_eq!(format_usd(1_234_567.6), "$1,234,568");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345_678), "12,345,678");
    }
}
