use geo_types::Point;
use workout_tracker_lib::workout::{Workout, WorkoutError, WorkoutKind};

use crate::storage::WorkoutStore;
use crate::views::{Panel, WorkoutMap};

/// Default zoom the map is initialized and recentered with.
pub const MAP_ZOOM: f64 = 13.0;

/// Kind discriminant as chosen in the form's type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutType {
    Running,
    Cycling,
}

/// Raw form contents, field strings exactly as the user typed them.
/// Only the field belonging to the chosen kind is read.
#[derive(Debug, Clone)]
pub struct WorkoutForm {
    pub kind: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Discrete frontend events. Handlers run to completion one at a time,
/// so the collection never needs locking.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Geolocation resolved with the user's position.
    LocationFound(Point),
    /// Geolocation was denied or is unsupported.
    LocationUnavailable,
    /// One shot signal that the map widget finished initializing.
    MapReady,
    MapClicked(Point),
    FormSubmitted(WorkoutForm),
    EntrySelected(String),
    EntryDeleted(String),
    DeleteAllRequested,
}

/// The session store and view synchronizer.
///
/// Owns the authoritative workout collection and keeps the map markers,
/// the list entries and the persisted blob consistent with it. One
/// instance is constructed explicitly and handed to whichever layer
/// wires up the event sources.
pub struct App<M, P, S> {
    workouts: Vec<Workout>,
    /// Set by a map click, consumed by the next successful submission.
    pending_location: Option<Point>,
    /// The map initializes asynchronously after geolocation, so marker
    /// rendering is gated on this flag rather than on hydration.
    map_ready: bool,
    zoom: f64,
    map: M,
    panel: P,
    store: S,
}

impl<M, P, S> App<M, P, S>
where
    M: WorkoutMap,
    P: Panel,
    S: WorkoutStore,
{
    pub fn new(map: M, panel: P, store: S) -> Self {
        Self {
            workouts: Vec::new(),
            pending_location: None,
            map_ready: false,
            zoom: MAP_ZOOM,
            map,
            panel,
            store,
        }
    }

    /// Hydrate the collection from whatever the store holds. Called once
    /// at startup. An absent or unreadable blob leaves the collection
    /// empty without bothering the user.
    ///
    /// List entries are rendered right away, markers only once the map
    /// has reported ready, in whichever order the two happen.
    pub fn restore_from_storage(&mut self) {
        let Some(raw) = self.store.load() else {
            return;
        };

        match serde_json::from_str::<Vec<Workout>>(&raw) {
            Ok(workouts) => {
                tracing::debug!("Restored {} stored workouts", workouts.len());
                self.workouts = workouts;
                for workout in &self.workouts {
                    self.panel.render_entry(workout);
                }
                if self.map_ready {
                    for workout in &self.workouts {
                        self.map.add_marker(
                            &workout.id,
                            workout.position,
                            &popup_text(workout),
                            &popup_class(workout),
                        );
                    }
                }
            }
            Err(err) => {
                tracing::warn!("Discarding unreadable workout data: {err}");
            }
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::LocationFound(position) => self.map.set_view(position, self.zoom),
            AppEvent::LocationUnavailable => {
                self.panel.alert("Could not get your current location")
            }
            AppEvent::MapReady => self.map_loaded(),
            AppEvent::MapClicked(position) => self.open_form(position),
            AppEvent::FormSubmitted(form) => self.submit_workout(form),
            AppEvent::EntrySelected(id) => self.focus_workout(&id),
            AppEvent::EntryDeleted(id) => self.delete_workout(&id),
            AppEvent::DeleteAllRequested => self.delete_all(),
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    fn map_loaded(&mut self) {
        self.map_ready = true;
        for workout in &self.workouts {
            self.map.add_marker(
                &workout.id,
                workout.position,
                &popup_text(workout),
                &popup_class(workout),
            );
        }
    }

    fn open_form(&mut self, position: Point) {
        self.pending_location = Some(position);
        self.panel.show_form();
    }

    /// All or nothing: a rejected submission must not touch the
    /// collection, either view or the store, and the form stays open
    /// for correction.
    fn submit_workout(&mut self, form: WorkoutForm) {
        let Some(position) = self.pending_location else {
            tracing::warn!("Form submitted without a pending map location");
            return;
        };

        let workout = match build_workout(&form, position) {
            Ok(workout) => workout,
            Err(err) => {
                self.panel.alert(&err.to_string());
                return;
            }
        };

        self.map.add_marker(
            &workout.id,
            workout.position,
            &popup_text(&workout),
            &popup_class(&workout),
        );
        self.panel.render_entry(&workout);
        self.workouts.push(workout);

        self.pending_location = None;
        self.panel.clear_fields();
        self.panel.hide_form();

        self.persist();
    }

    fn focus_workout(&mut self, workout_id: &str) {
        // Clicks on non-entry chrome arrive with ids we never issued.
        let Some(workout) = self.workouts.iter().find(|w| w.id == workout_id) else {
            return;
        };

        if self.map_ready {
            self.map.pan_to(workout.position, self.zoom);
        }
        self.panel.toggle_action_buttons(workout_id);
    }

    fn delete_workout(&mut self, workout_id: &str) {
        let Some(index) = self.workouts.iter().position(|w| w.id == workout_id) else {
            return;
        };

        let workout = self.workouts.remove(index);
        if self.map_ready {
            self.map.remove_marker(&workout.id);
        }
        self.panel.remove_entry(&workout.id);
        self.persist();
    }

    fn delete_all(&mut self) {
        tracing::info!("Deleting all workouts");
        if let Err(err) = self.store.clear() {
            tracing::error!("Failed to clear stored workouts: {err:?}");
        }
        self.panel.reload();
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.workouts) {
            Ok(payload) => {
                if let Err(err) = self.store.save(&payload) {
                    tracing::error!("Failed to persist workouts: {err:?}");
                }
            }
            Err(err) => tracing::error!("Failed to serialize workouts: {err}"),
        }
    }
}

fn build_workout(form: &WorkoutForm, position: Point) -> Result<Workout, WorkoutError> {
    let distance_km = parse_field(&form.distance).ok_or(WorkoutError::InvalidDistance)?;
    let duration_min = parse_field(&form.duration).ok_or(WorkoutError::InvalidDuration)?;

    match form.kind {
        WorkoutType::Running => {
            let cadence_spm = form
                .cadence
                .trim()
                .parse::<u32>()
                .map_err(|_| WorkoutError::InvalidCadence)?;
            Workout::running(position, distance_km, duration_min, cadence_spm)
        }
        WorkoutType::Cycling => {
            let elevation_gain_m =
                parse_field(&form.elevation).ok_or(WorkoutError::InvalidElevation)?;
            Workout::cycling(position, distance_km, duration_min, elevation_gain_m)
        }
    }
}

fn parse_field(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn popup_text(workout: &Workout) -> String {
    let icon = match workout.kind {
        WorkoutKind::Running { .. } => "🏃",
        WorkoutKind::Cycling { .. } => "🚴",
    };
    format!("{icon} {}", workout.description)
}

fn popup_class(workout: &Workout) -> String {
    format!("{}-popup", workout.kind.slug())
}
