//! In-memory workout storage.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// A recorded workout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workout {
    pub id: u64,
    /// Exercise performed, e.g. "deadlift".
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub notes: Option<String>,
    /// Seconds since epoch at creation.
    pub recorded_at: u64,
}

/// Payload for creating a workout; the store assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A thread-safe store for workout data.
///
/// Cloning is cheap; clones share the same underlying map.
#[derive(Clone, Default)]
pub struct WorkoutStore {
    workouts: Arc<DashMap<u64, Workout>>,
    next_id: Arc<AtomicU64>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new workout, assigning the next id.
    pub fn insert(&self, new: NewWorkout) -> Workout {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let workout = Workout {
            id,
            exercise: new.exercise,
            sets: new.sets,
            reps: new.reps,
            notes: new.notes,
            recorded_at,
        };
        self.workouts.insert(id, workout.clone());
        workout
    }

    pub fn get(&self, id: u64) -> Option<Workout> {
        self.workouts.get(&id).map(|entry| entry.value().clone())
    }

    /// All workouts, ordered by id.
    pub fn list(&self) -> Vec<Workout> {
        let mut all: Vec<Workout> = self
            .workouts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|workout| workout.id);
        all
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
