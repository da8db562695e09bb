use std::path::Path;

use crate::data::filter::{self, FilterSelection, FilteredView};
use crate::data::loader;
use crate::data::model::{Dimension, SalaryDataset};
use crate::data::snapshot::DashboardSnapshot;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SalaryDataset>,

    /// Current filter selection.
    pub selection: FilterSelection,

    /// Indices of records passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics and chart tables for `visible_indices`.
    pub snapshot: DashboardSnapshot,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset, select everything and recompute.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.selection = FilterSelection::all(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Load `path`, keeping the current dataset if loading fails.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                let distinct: Vec<String> = Dimension::ALL
                    .iter()
                    .map(|&d| format!("{d}: {}", dataset.distinct_count(d)))
                    .collect();
                log::info!(
                    "Loaded {} records from {} ({})",
                    dataset.len(),
                    path.display(),
                    distinct.join(", ")
                );
                if dataset.is_empty() {
                    log::warn!("{} contains no records", path.display());
                }
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute `visible_indices` and the snapshot after a selection change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.snapshot = DashboardSnapshot::default();
            return;
        };
        let view = filter::apply(ds, &self.selection);
        self.snapshot = DashboardSnapshot::compute(&view);
        self.visible_indices = view.indices().to_vec();
        log::debug!("{} of {} records visible", self.visible_indices.len(), ds.len());
    }

    /// The records currently passing the filter.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.dataset
            .as_ref()
            .map(|ds| filter::view_of(ds, &self.visible_indices))
    }

    /// Select all values of a dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all(dimension, ds);
            self.refilter();
        }
    }

    /// Deselect all values of a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.selection.select_none(dimension);
        self.refilter();
    }
}
