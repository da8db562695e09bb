use std::collections::BTreeSet;

use super::model::{Dimension, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Filter selection: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Allowed values for each of the four filter dimensions.
///
/// A record passes when its year, seniority, contract and company size are
/// all members of the corresponding set. An empty set lets nothing through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contracts: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

impl FilterSelection {
    /// Every observed value selected (i.e., show everything).
    pub fn all(dataset: &SalaryDataset) -> Self {
        Self {
            years: dataset.years.clone(),
            seniorities: dataset.seniorities.clone(),
            contracts: dataset.contracts.clone(),
            company_sizes: dataset.company_sizes.clone(),
        }
    }

    /// Select every observed value of one dimension.
    pub fn select_all(&mut self, dimension: Dimension, dataset: &SalaryDataset) {
        match dimension {
            Dimension::Year => self.years = dataset.years.clone(),
            Dimension::Seniority => self.seniorities = dataset.seniorities.clone(),
            Dimension::Contract => self.contracts = dataset.contracts.clone(),
            Dimension::CompanySize => self.company_sizes = dataset.company_sizes.clone(),
        }
    }

    /// Deselect every value of one dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Year => self.years.clear(),
            Dimension::Seniority => self.seniorities.clear(),
            Dimension::Contract => self.contracts.clear(),
            Dimension::CompanySize => self.company_sizes.clear(),
        }
    }

    /// Whether a single record satisfies all four dimensions.
    pub fn accepts(&self, record: &SalaryRecord) -> bool {
        self.years.contains(&record.year)
            && self.seniorities.contains(&record.seniority)
            && self.contracts.contains(&record.contract)
            && self.company_sizes.contains(&record.company_size)
    }
}

/// Toggle membership of `value` in a selection set.
pub fn toggle<T: Ord + Clone>(selected: &mut BTreeSet<T>, value: &T) {
    if !selected.remove(value) {
        selected.insert(value.clone());
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// The records of a dataset that pass a [`FilterSelection`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a SalaryRecord>,
    /// Position of each record in the dataset.
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalaryRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn records(&self) -> &[&'a SalaryRecord] {
        &self.records
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Build the filtered view for a selection.
pub fn apply<'a>(dataset: &'a SalaryDataset, selection: &FilterSelection) -> FilteredView<'a> {
    let (indices, records) = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.accepts(rec))
        .unzip();
    FilteredView { records, indices }
}

/// Rebuild a view from indices previously taken from [`FilteredView::indices`].
pub fn view_of<'a>(dataset: &'a SalaryDataset, indices: &[usize]) -> FilteredView<'a> {
    let (indices, records) = indices
        .iter()
        .filter_map(|&i| dataset.records.get(i).map(|rec| (i, rec)))
        .unzip();
    FilteredView { records, indices }
}
