use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single logged workout session.
///
/// Shared fields live in this envelope, kind specific fields and the
/// metrics derived from them live in [`WorkoutKind`]. Every field is set
/// once at construction and never mutated afterwards, so the derived
/// values stay consistent with their inputs for the whole lifetime of
/// the value, including across a JSON round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Position of the session, x is latitude and y is longitude.
    pub position: Point,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Display string in the form "Running on August 7".
    pub description: String,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

/// Kind discriminant plus the per kind payload.
///
/// Derived metrics are stored next to the inputs they came from, so
/// deserializing reconstructs the exact variant without re-deriving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkoutKind {
    Running {
        cadence_spm: u32,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkoutError {
    #[error("Distance must be a positive number of kilometers")]
    InvalidDistance,
    #[error("Duration must be a positive number of minutes")]
    InvalidDuration,
    #[error("Cadence must be a positive number of steps per minute")]
    InvalidCadence,
    #[error("Elevation gain must be zero or more meters")]
    InvalidElevation,
}

impl WorkoutKind {
    /// Capitalized kind name, as used in the description string.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "Running",
            WorkoutKind::Cycling { .. } => "Cycling",
        }
    }

    /// Lowercase kind name, matches the serialized `kind` tag.
    pub fn slug(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "running",
            WorkoutKind::Cycling { .. } => "cycling",
        }
    }
}

impl Workout {
    /// Build a running session. Pace is derived here, exactly once.
    pub fn running(
        position: Point,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: u32,
    ) -> Result<Self, WorkoutError> {
        validate_shared(distance_km, duration_min)?;
        if cadence_spm == 0 {
            return Err(WorkoutError::InvalidCadence);
        }

        let pace_min_per_km = duration_min / distance_km;
        Ok(Self::assemble(
            position,
            distance_km,
            duration_min,
            WorkoutKind::Running {
                cadence_spm,
                pace_min_per_km,
            },
        ))
    }

    /// Build a cycling session. Speed is derived here, exactly once.
    pub fn cycling(
        position: Point,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<Self, WorkoutError> {
        validate_shared(distance_km, duration_min)?;
        if !elevation_gain_m.is_finite() || elevation_gain_m < 0.0 {
            return Err(WorkoutError::InvalidElevation);
        }

        let speed_km_per_h = distance_km / (duration_min / 60.0);
        Ok(Self::assemble(
            position,
            distance_km,
            duration_min,
            WorkoutKind::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            },
        ))
    }

    fn assemble(position: Point, distance_km: f64, duration_min: f64, kind: WorkoutKind) -> Self {
        let timestamp = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            position,
            distance_km,
            duration_min,
            description: format!("{} on {}", kind.label(), timestamp.format("%B %-d")),
            kind,
        }
    }
}

fn validate_shared(distance_km: f64, duration_min: f64) -> Result<(), WorkoutError> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(WorkoutError::InvalidDistance);
    }
    if !duration_min.is_finite() || duration_min <= 0.0 {
        return Err(WorkoutError::InvalidDuration);
    }
    Ok(())
}
