// crates/coursekit-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Attempt Store
// Description: Map-backed attempt store for hosts and tests.
// Purpose: Provide a deterministic reference implementation of the attempt
// store interface.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The in-memory store keeps attempt records in an ordered map keyed by
//! learner and exercise. It is the reference implementation used by tests
//! and by hosts that persist state through their own field store after the
//! fact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::attempts::AttemptState;
use crate::core::identifiers::ExerciseId;
use crate::core::identifiers::LearnerId;
use crate::interfaces::AttemptStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Map-backed attempt store.
///
/// # Invariants
/// - Records that were never saved load as [`AttemptState::default`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttemptStore {
    /// Attempt records keyed by learner and exercise.
    records: BTreeMap<(LearnerId, ExerciseId), AttemptState>,
}

impl InMemoryAttemptStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { records: BTreeMap::new() }
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AttemptStore for InMemoryAttemptStore {
    fn load(
        &self,
        learner: &LearnerId,
        exercise: &ExerciseId,
    ) -> Result<AttemptState, StoreError> {
        Ok(self
            .records
            .get(&(learner.clone(), exercise.clone()))
            .cloned()
            .unwrap_or_default())
    }

    fn save(
        &mut self,
        learner: &LearnerId,
        exercise: &ExerciseId,
        state: &AttemptState,
    ) -> Result<(), StoreError> {
        self.records.insert((learner.clone(), exercise.clone()), state.clone());
        Ok(())
    }
}
