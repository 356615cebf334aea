//! Time-ordered schedule of condition changes for the driver.

use crate::manager::ConditionsManager;
use crate::update::ConditionUpdate;

/// Scheduled future condition changes, ordered ascending by time.
///
/// The driver walks this once from front to back: each entry is applied the
/// first time simulated time reaches it and never again.
#[derive(Debug, Clone, Default)]
pub struct EvolvingConditions {
    entries: Vec<(f64, ConditionUpdate)>,
}

impl EvolvingConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the schedule from a manager: one entry per specified time,
    /// carrying only the cells explicitly set there plus that time's exact
    /// concentration event.
    pub fn from_manager(manager: &ConditionsManager) -> Self {
        Self {
            entries: manager.evolving_entries(),
        }
    }

    /// Add a condition change at a specific time point, keeping the
    /// schedule sorted. An existing entry at exactly that time is replaced.
    pub fn add_condition(&mut self, time: f64, update: ConditionUpdate) {
        match self
            .entries
            .iter()
            .position(|(t, _)| t.total_cmp(&time).is_ge())
        {
            Some(index) if self.entries[index].0 == time => {
                self.entries[index].1 = update;
            }
            Some(index) => self.entries.insert(index, (time, update)),
            None => self.entries.push((time, update)),
        }
    }

    pub fn entries(&self) -> &[(f64, ConditionUpdate)] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&(f64, ConditionUpdate)> {
        self.entries.get(index)
    }

    /// Number of time points in the schedule.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
