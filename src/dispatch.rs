use std::sync::Arc;

use crate::data::error::InvalidFilterError;
use crate::data::filter::FilterState;
use crate::data::model::Dataset;
use crate::views::ViewBatch;

// ---------------------------------------------------------------------------
// Events and subscriptions
// ---------------------------------------------------------------------------

/// A change requested through one of the filter selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Passed(String),
    ParentEducation(String),
}

impl FilterChange {
    fn apply_to(&self, filters: &mut FilterState) -> Result<(), InvalidFilterError> {
        match self {
            FilterChange::Passed(v) => filters.set_passed_filter(v),
            FilterChange::ParentEducation(v) => filters.set_parent_education_filter(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Recomputing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Arc<ViewBatch>)>;

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Owns the session's filter state and the last published batch.
///
/// Every accepted filter change recomputes all four views from the same
/// filter state and publishes them together; a rejected change publishes
/// nothing. `on_filter_change` takes `&mut self`, so one event is fully
/// handled before the next can start.
pub struct Dispatcher {
    dataset: Arc<Dataset>,
    filters: FilterState,
    current: Arc<ViewBatch>,
    phase: Phase,
    generation: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Dispatcher {
    /// Start with `{All, All}` and its batch already computed.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let filters = FilterState::new(&dataset);
        let current = Arc::new(ViewBatch::derive(&dataset, &filters));
        Dispatcher {
            dataset,
            filters,
            current,
            phase: Phase::Idle,
            generation: 0,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Arc<ViewBatch>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Validate `change`, recompute every view and publish the batch.
    ///
    /// On `InvalidFilterError` the filter state, the current batch and the
    /// generation counter are left as they were.
    pub fn on_filter_change(
        &mut self,
        change: FilterChange,
    ) -> Result<Arc<ViewBatch>, InvalidFilterError> {
        self.phase = Phase::Recomputing;

        let mut candidate = self.filters.clone();
        if let Err(e) = change.apply_to(&mut candidate) {
            self.phase = Phase::Idle;
            log::warn!("Rejected filter change {change:?}: {e}");
            return Err(e);
        }

        let batch = Arc::new(ViewBatch::derive(&self.dataset, &candidate));
        self.filters = candidate;
        self.current = Arc::clone(&batch);
        self.generation += 1;
        log::debug!(
            "Publishing batch #{} ({}) with {} rows",
            self.generation,
            self.filters,
            batch.row_count()
        );

        for (_, listener) in &mut self.listeners {
            listener(&batch);
        }

        self.phase = Phase::Idle;
        Ok(batch)
    }

    /// The last published batch (the initial one before any change).
    pub fn current(&self) -> Arc<ViewBatch> {
        Arc::clone(&self.current)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of batches published since start-up.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}
