use geo_types::Point;
use workout_tracker_lib::workout::Workout;

/// Consumed side of the map widget.
///
/// The widget initializes asynchronously after a geolocation lookup, so
/// it also produces events the wiring layer feeds back into the
/// controller: a click event carrying coordinates ([`crate::AppEvent::MapClicked`])
/// and a one shot ready event ([`crate::AppEvent::MapReady`]).
pub trait WorkoutMap {
    /// Center the map on `position`, initializing it on the first call.
    fn set_view(&mut self, position: Point, zoom: f64);

    /// Animated recenter on `position`.
    fn pan_to(&mut self, position: Point, zoom: f64);

    /// Place a popup marker for the workout with the given id.
    fn add_marker(&mut self, workout_id: &str, position: Point, popup_text: &str, style_class: &str);

    /// Drop the marker belonging to `workout_id`. Unknown ids are ignored.
    fn remove_marker(&mut self, workout_id: &str);
}

/// Consumed side of the form and workout list.
///
/// Produces submit events carrying the raw field strings
/// ([`crate::AppEvent::FormSubmitted`]) and click events on rendered
/// entries carrying the entry id ([`crate::AppEvent::EntrySelected`],
/// [`crate::AppEvent::EntryDeleted`]). Which kind specific input row is
/// visible for the chosen workout type is the panel's own business, the
/// controller never sees it.
pub trait Panel {
    fn show_form(&mut self);

    fn hide_form(&mut self);

    /// Blank all form fields.
    fn clear_fields(&mut self);

    /// Append a list entry for `workout`. Entries appear in creation order.
    fn render_entry(&mut self, workout: &Workout);

    /// Drop the list entry belonging to `workout_id`. Unknown ids are ignored.
    fn remove_entry(&mut self, workout_id: &str);

    /// Reveal the action buttons of exactly this entry, hiding all others.
    /// Transient UI state, never persisted.
    fn toggle_action_buttons(&mut self, workout_id: &str);

    /// Blocking user visible message.
    fn alert(&mut self, message: &str);

    /// Restart the whole frontend, equivalent to launching with an empty
    /// collection when storage was cleared first.
    fn reload(&mut self);
}
