// crates/coursekit-core/src/interfaces/mod.rs
// ============================================================================
// Module: Coursekit Interfaces
// Description: Host-agnostic interfaces for attempt storage, grade
// publication, and diagram registration.
// Purpose: Define the contract surfaces used by the submission runtime.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the grading core integrates with the host without
//! embedding host-specific details. The host serializes concurrent submit
//! calls per learner; implementations here may assume at most one in-flight
//! submission per attempt record.
//!
//! Grade publication is fire-and-forget: the runtime swallows publication
//! failures so a downstream notification failure never rolls back local
//! state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::attempts::AttemptState;
use crate::core::identifiers::ExerciseId;
use crate::core::identifiers::LearnerId;
use crate::core::shapes::ShapeRecord;

// ============================================================================
// SECTION: Attempt Store
// ============================================================================

/// Attempt store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing field store reported an error.
    #[error("attempt store error: {0}")]
    Backend(String),
}

/// Host-owned persistence for attempt records.
///
/// The store owns field persistence mechanics; the core defines only the
/// record shape and its defaults. A record that was never saved loads as
/// [`AttemptState::default`].
pub trait AttemptStore {
    /// Loads the attempt record for one learner and exercise, creating the
    /// fresh default on first access.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store cannot be read.
    fn load(&self, learner: &LearnerId, exercise: &ExerciseId)
    -> Result<AttemptState, StoreError>;

    /// Persists the attempt record for one learner and exercise.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store cannot be written.
    fn save(
        &mut self,
        learner: &LearnerId,
        exercise: &ExerciseId,
        state: &AttemptState,
    ) -> Result<(), StoreError>;
}

// ============================================================================
// SECTION: Grade Publication
// ============================================================================

/// Event name used for grade publication.
pub const GRADE_EVENT: &str = "grade";

/// Grade payload published to the host after every accepted submission.
///
/// # Invariants
/// - `value` stays within `[0, max_value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeEvent {
    /// Unweighted earned score.
    pub value: f64,
    /// Unweighted maximum score.
    pub max_value: f64,
}

/// Grade publication errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - The runtime swallows these errors; they never reach the caller.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Publication sink reported an error.
    #[error("grade publication failed: {0}")]
    Sink(String),
}

/// Host-owned grade publication sink.
pub trait GradePublisher {
    /// Publishes a named event with a grade payload.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when delivery fails; the runtime treats
    /// delivery as best-effort and does not retry synchronously.
    fn publish(
        &self,
        event_name: &str,
        exercise: &ExerciseId,
        learner: &LearnerId,
        payload: &GradeEvent,
    ) -> Result<(), PublishError>;
}

impl<T: GradePublisher + ?Sized> GradePublisher for &T {
    fn publish(
        &self,
        event_name: &str,
        exercise: &ExerciseId,
        learner: &LearnerId,
        payload: &GradeEvent,
    ) -> Result<(), PublishError> {
        (**self).publish(event_name, exercise, learner, payload)
    }
}

// ============================================================================
// SECTION: Diagram Registry
// ============================================================================

/// Explicit registry of named initial diagrams.
///
/// The host populates the registry at startup and passes it into the
/// submission handler at construction; nothing in the core scans
/// directories or loads resources implicitly.
///
/// # Invariants
/// - Entries are sanitized shape sequences keyed by stable names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramRegistry {
    /// Registered diagrams keyed by name, ordered for stable iteration.
    entries: BTreeMap<String, Vec<ShapeRecord>>,
}

impl DiagramRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Registers a sanitized diagram under a name, replacing any previous
    /// entry.
    pub fn insert(&mut self, name: impl Into<String>, diagram: Vec<ShapeRecord>) {
        self.entries.insert(name.into(), diagram);
    }

    /// Returns the diagram registered under a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[ShapeRecord]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Returns the registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of registered diagrams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no diagrams are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
