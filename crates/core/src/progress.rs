use std::collections::BTreeSet;
use std::num::NonZeroU32;

use thiserror::Error;

use crate::model::ModuleId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("unknown learning module: {0}")]
    UnknownModule(ModuleId),
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Which modules the learner has finished in this session.
///
/// Modules are only ever added. The percentage is measured against a configured
/// `total_modules`, which is independent of how many modules are known.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    known: BTreeSet<ModuleId>,
    completed: BTreeSet<ModuleId>,
    total_modules: NonZeroU32,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(known: impl IntoIterator<Item = ModuleId>, total_modules: NonZeroU32) -> Self {
        Self {
            known: known.into_iter().collect(),
            completed: BTreeSet::new(),
            total_modules,
        }
    }

    /// Records `module` as completed.
    ///
    /// Returns `true` if the module was newly completed, `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownModule` if `module` is not on the learning path.
    pub fn mark_completed(&mut self, module: &ModuleId) -> Result<bool, ProgressError> {
        if !self.known.contains(module) {
            return Err(ProgressError::UnknownModule(module.clone()));
        }
        Ok(self.completed.insert(module.clone()))
    }

    #[must_use]
    pub fn is_completed(&self, module: &ModuleId) -> bool {
        self.completed.contains(module)
    }

    /// Completion percentage in `[0, 100]`.
    #[must_use]
    pub fn overall_progress(&self) -> f64 {
        let done = self.completed.len() as f64;
        let pct = done / f64::from(self.total_modules.get()) * 100.0;
        pct.min(100.0)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn total_modules(&self) -> u32 {
        self.total_modules.get()
    }

    pub fn completed(&self) -> impl Iterator<Item = &ModuleId> {
        self.completed.iter()
    }
}
