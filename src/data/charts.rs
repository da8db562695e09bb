use std::collections::BTreeMap;

use super::filter::FilteredView;

/// Number of roles kept by [`top_roles_by_mean_salary`].
pub const TOP_ROLES: usize = 10;

/// Number of bins of the salary histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Role whose salaries feed the per-country chart.
pub const DATA_SCIENTIST: &str = "Data Scientist";

// ---------------------------------------------------------------------------
// ChartData – result of a chart preparer
// ---------------------------------------------------------------------------

/// Output of a chart preparer: either a payload or an explicit "no data".
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData<T> {
    NoData,
    Ready(T),
}

impl<T> ChartData<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ChartData::Ready(v) => Some(v),
            ChartData::NoData => None,
        }
    }
}

impl<T> Default for ChartData<T> {
    fn default() -> Self {
        ChartData::NoData
    }
}

/// A labelled mean salary (one bar).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub label: String,
    pub mean_salary: f64,
}

/// Mean salary per key, keys in ascending order.
fn grouped_means<'a, I>(pairs: I) -> Vec<GroupMean>
where
    I: Iterator<Item = (&'a str, f64)>,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (key, salary) in pairs {
        let slot = groups.entry(key).or_insert((0.0, 0));
        slot.0 += salary;
        slot.1 += 1;
    }
    groups
        .into_iter()
        .map(|(label, (sum, n))| GroupMean {
            label: label.to_string(),
            mean_salary: sum / n as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Top roles by mean salary
// ---------------------------------------------------------------------------

/// The ten roles with the highest mean salary, sorted ascending by mean so a
/// horizontal bar chart shows the largest at the top.
pub fn top_roles_by_mean_salary(view: &FilteredView<'_>) -> ChartData<Vec<GroupMean>> {
    if view.is_empty() {
        return ChartData::NoData;
    }

    let mut means = grouped_means(view.iter().map(|r| (r.role.as_str(), r.salary_usd)));
    // Stable sort: equal means keep role-name order.
    means.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    means.truncate(TOP_ROLES);
    means.sort_by(|a, b| a.mean_salary.total_cmp(&b.mean_salary));
    ChartData::Ready(means)
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

/// Equal-width bins spanning the observed salary range.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryHistogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl SalaryHistogram {
    /// `(lower, upper, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts.iter().enumerate().map(|(i, &c)| {
            let lo = self.start + i as f64 * self.bin_width;
            (lo, lo + self.bin_width, c)
        })
    }
}

/// Bin the salaries of the view into [`HISTOGRAM_BINS`] equal-width bins.
pub fn salary_histogram(view: &FilteredView<'_>) -> ChartData<SalaryHistogram> {
    if view.is_empty() {
        return ChartData::NoData;
    }

    let (min, max) = view.iter().map(|r| r.salary_usd).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), v| (lo.min(v), hi.max(v)),
    );
    let (start, end) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let bin_width = (end - start) / HISTOGRAM_BINS as f64;

    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for rec in view.iter() {
        let pos = ((rec.salary_usd - start) / bin_width).floor();
        // The last bin is closed on the right so `max` lands inside it.
        let idx = if pos <= 0.0 {
            0
        } else {
            (pos as usize).min(HISTOGRAM_BINS - 1)
        };
        counts[idx] += 1;
    }

    ChartData::Ready(SalaryHistogram {
        start,
        bin_width,
        counts,
    })
}

// ---------------------------------------------------------------------------
// Remote-work distribution
// ---------------------------------------------------------------------------

/// Count of records for one remote-work category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
    /// Share of the view, in `0.0..=1.0`.
    pub share: f64,
}

/// Records per remote-work category, most frequent first.
pub fn remote_distribution(view: &FilteredView<'_>) -> ChartData<Vec<CategoryCount>> {
    if view.is_empty() {
        return ChartData::NoData;
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in view.iter() {
        *counts.entry(rec.remote.as_str()).or_default() += 1;
    }

    let total = view.len() as f64;
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
            share: count as f64 / total,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    ChartData::Ready(out)
}

// ---------------------------------------------------------------------------
// Data Scientist mean salary per country
// ---------------------------------------------------------------------------

/// Mean Data Scientist salary per residence country (ISO3), by country code.
pub fn data_scientist_mean_by_country(view: &FilteredView<'_>) -> ChartData<Vec<GroupMean>> {
    let means = grouped_means(
        view.iter()
            .filter(|r| r.role == DATA_SCIENTIST)
            .map(|r| (r.residence_iso3.as_str(), r.salary_usd)),
    );
    if means.is_empty() {
        return ChartData::NoData;
    }
    ChartData::Ready(means)
}
