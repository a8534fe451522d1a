//! The date picker controller.
//!
//! [`Datepicker`] owns a [`NavigationState`] and replaces it through pure
//! transitions. Views consume a [`RenderPayload`], route cell events back
//! through [`Datepicker::dispatch`] and execute the returned
//! [`FocusRequest`]s once they drew the new state.

use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::calendar::{CalendarDay, MonthGrid};

pub mod binding;
pub mod state;

pub use binding::{Command, DayBinding, DayEvent, DayId, Key};
pub use state::{
    clamp_navigable, first_navigable_day, last_navigable_day, FocusRequest, GridWindow,
    MonthStep, NavigationState, Transition,
};

/// How a view should arrange the previous, current and next month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Horizontal
    }
}

/// Everything a view gets to see of the picker.
#[derive(Debug, Clone, Copy)]
pub struct RenderPayload<'a> {
    pub selected_date: Option<NaiveDate>,
    pub highlighted_date: NaiveDate,
    pub today: NaiveDate,
    pub orientation: Orientation,
    pub current_month_weeks: &'a MonthGrid,
    pub previous_month_weeks: &'a MonthGrid,
    pub next_month_weeks: &'a MonthGrid,
}

impl RenderPayload<'_> {
    pub fn day_binding(&self, day: &NaiveDate) -> DayBinding {
        DayBinding::new(*day)
    }

    pub fn is_selected(&self, day: &NaiveDate) -> bool {
        self.selected_date.as_ref() == Some(day)
    }

    pub fn is_highlighted(&self, day: &NaiveDate) -> bool {
        self.highlighted_date == *day
    }

    pub fn is_today(&self, day: &NaiveDate) -> bool {
        self.today == *day
    }
}

pub struct Datepicker<F>
where
    F: FnMut(NaiveDate),
{
    state: NavigationState,
    today: NaiveDate,
    orientation: Orientation,
    on_change: F,
}

impl<F> Datepicker<F>
where
    F: FnMut(NaiveDate),
{
    /// Creates a picker showing `value`, or today if there is none. `value`
    /// also becomes the initial selection.
    pub fn new(value: Option<NaiveDate>, on_change: F) -> Self {
        Self::with_today(value, Local::now().date_naive(), on_change)
    }

    pub fn with_today(value: Option<NaiveDate>, today: NaiveDate, on_change: F) -> Self {
        Datepicker {
            state: NavigationState::new(value.unwrap_or(today), value),
            today,
            orientation: Orientation::default(),
            on_change,
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Focus request for the initially highlighted day, issued once the
    /// view is in place.
    pub fn mount(&mut self) -> FocusRequest {
        self.highlight_date(self.state.highlighted_date())
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn highlighted_date(&self) -> NaiveDate {
        self.state.highlighted_date()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.state.selected_date()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn update_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn highlight_date<D: CalendarDay>(&mut self, date: D) -> FocusRequest {
        let transition = self.state.highlight(date.calendar_day());
        self.commit(transition)
    }

    pub fn select_date<D: CalendarDay>(&mut self, date: D) -> FocusRequest {
        let transition = self.state.select(date.calendar_day());
        self.commit(transition)
    }

    pub fn day_binding<D: CalendarDay>(&self, date: &D) -> DayBinding {
        DayBinding::new(date.calendar_day())
    }

    /// Handles an event received by the cell of `day`.
    pub fn dispatch(&mut self, day: NaiveDate, event: DayEvent) -> Option<FocusRequest> {
        match Command::for_event(self.state.highlighted_date(), day, event)? {
            Command::Highlight(target) => Some(self.highlight_date(target)),
            Command::Select(target) => Some(self.select_date(target)),
        }
    }

    /// Key pressed while the highlighted cell has focus.
    pub fn handle_key(&mut self, key: Key) -> Option<FocusRequest> {
        self.dispatch(self.state.highlighted_date(), DayEvent::KeyUp(key))
    }

    pub fn render<'s, R, V>(&'s self, view: V) -> R
    where
        V: FnOnce(RenderPayload<'s>) -> R,
    {
        view(RenderPayload {
            selected_date: self.state.selected_date(),
            highlighted_date: self.state.highlighted_date(),
            today: self.today,
            orientation: self.orientation,
            current_month_weeks: self.state.current_month_weeks(),
            previous_month_weeks: self.state.previous_month_weeks(),
            next_month_weeks: self.state.next_month_weeks(),
        })
    }

    fn commit(&mut self, transition: Transition) -> FocusRequest {
        let Transition {
            state,
            focus,
            notify,
        } = transition;

        self.state = state;

        if let Some(day) = notify {
            log::info!("Selected {}", day);
            (self.on_change)(day);
        }

        focus
    }
}
