use super::charts::{
    data_scientist_mean_by_country, remote_distribution, salary_histogram,
    top_roles_by_mean_salary, CategoryCount, ChartData, GroupMean, SalaryHistogram,
};
use super::filter::FilteredView;
use super::metrics::SummaryMetrics;

// ---------------------------------------------------------------------------
// DashboardSnapshot – everything the central panel renders
// ---------------------------------------------------------------------------

/// Metrics and chart tables derived from one filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub metrics: SummaryMetrics,
    pub top_roles: ChartData<Vec<GroupMean>>,
    pub histogram: ChartData<SalaryHistogram>,
    pub remote: ChartData<Vec<CategoryCount>>,
    pub data_scientists_by_country: ChartData<Vec<GroupMean>>,
}

impl DashboardSnapshot {
    /// Run the aggregator and all four chart preparers over `view`.
    pub fn compute(view: &FilteredView<'_>) -> Self {
        Self {
            metrics: SummaryMetrics::compute(view),
            top_roles: top_roles_by_mean_salary(view),
            histogram: salary_histogram(view),
            remote: remote_distribution(view),
            data_scientists_by_country: data_scientist_mean_by_country(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::fixtures::two_records;
    use crate::data::model::SalaryDataset;

    #[test]
    fn snapshot_of_example_dataset() {
        let ds = SalaryDataset::from_records(two_records());
        let snap = DashboardSnapshot::compute(&apply(&ds, &FilterSelection::all(&ds)));

        assert_eq!(snap.metrics.count, 2);
        assert_eq!(snap.top_roles.ready().map(Vec::len), Some(2));
        assert_eq!(snap.histogram.ready().map(|h| h.counts.iter().sum::<usize>()), Some(2));
        assert_eq!(
            snap.data_scientists_by_country,
            ChartData::Ready(vec![GroupMean {
                label: "USA".into(),
                mean_salary: 150_000.0
            }])
        );
    }

    #[test]
    fn snapshot_of_empty_view_is_default() {
        let ds = SalaryDataset::from_records(two_records());
        let snap = DashboardSnapshot::compute(&apply(&ds, &FilterSelection::default()));
        assert_eq!(snap, DashboardSnapshot::default());
    }
}
