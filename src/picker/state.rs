use chrono::NaiveDate;
use std::rc::Rc;

use super::binding::DayId;
use crate::calendar::{
    build_month_grid, day_in_next_month, day_in_previous_month, MonthGrid, MonthIndex,
};

/// Earliest day the picker moves to. Padding of the previous month grid of
/// any later day stays within chrono's range.
pub fn first_navigable_day() -> NaiveDate {
    day_in_next_month(&day_in_next_month(&NaiveDate::MIN))
}

/// Latest day the picker moves to, mirroring [`first_navigable_day`].
pub fn last_navigable_day() -> NaiveDate {
    day_in_previous_month(&day_in_previous_month(&NaiveDate::MAX))
}

/// Pulls `day` into the navigable range.
pub fn clamp_navigable(day: NaiveDate) -> NaiveDate {
    let clamped = day.clamp(first_navigable_day(), last_navigable_day());
    if clamped != day {
        log::debug!("{} is out of range, using {}", day, clamped);
    }
    clamped
}

/// How far a highlight move travels in whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Same,
    Previous,
    Next,
    Jump,
}

impl MonthStep {
    pub fn between(from: &NaiveDate, to: &NaiveDate) -> Self {
        match MonthIndex::from(*to).months_since(&MonthIndex::from(*from)) {
            0 => MonthStep::Same,
            -1 => MonthStep::Previous,
            1 => MonthStep::Next,
            _ => MonthStep::Jump,
        }
    }
}

/// Grids of the month before, of and after the highlighted month.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWindow {
    slots: [Rc<MonthGrid>; 3],
}

impl GridWindow {
    const PREVIOUS: usize = 0;
    const CURRENT: usize = 1;
    const NEXT: usize = 2;

    pub fn centered_on(day: &NaiveDate) -> Self {
        GridWindow {
            slots: [
                Rc::new(build_month_grid(&day_in_previous_month(day))),
                Rc::new(build_month_grid(day)),
                Rc::new(build_month_grid(&day_in_next_month(day))),
            ],
        }
    }

    /// Grid at a month offset of -1, 0 or 1 from the highlighted month.
    pub fn at(&self, offset: i32) -> Option<&Rc<MonthGrid>> {
        match offset {
            -1 => Some(&self.slots[Self::PREVIOUS]),
            0 => Some(&self.slots[Self::CURRENT]),
            1 => Some(&self.slots[Self::NEXT]),
            _ => None,
        }
    }

    pub fn previous(&self) -> &Rc<MonthGrid> {
        &self.slots[Self::PREVIOUS]
    }

    pub fn current(&self) -> &Rc<MonthGrid> {
        &self.slots[Self::CURRENT]
    }

    pub fn next(&self) -> &Rc<MonthGrid> {
        &self.slots[Self::NEXT]
    }

    /// `day` lies in the month before the current one.
    fn slide_back(&self, day: &NaiveDate) -> Self {
        GridWindow {
            slots: [
                Rc::new(build_month_grid(&day_in_previous_month(day))),
                Rc::clone(&self.slots[Self::PREVIOUS]),
                Rc::clone(&self.slots[Self::CURRENT]),
            ],
        }
    }

    /// `day` lies in the month after the current one.
    fn slide_forward(&self, day: &NaiveDate) -> Self {
        GridWindow {
            slots: [
                Rc::clone(&self.slots[Self::CURRENT]),
                Rc::clone(&self.slots[Self::NEXT]),
                Rc::new(build_month_grid(&day_in_next_month(day))),
            ],
        }
    }

    fn moved(&self, step: MonthStep, day: &NaiveDate) -> Self {
        match step {
            MonthStep::Same => self.clone(),
            MonthStep::Previous => self.slide_back(day),
            MonthStep::Next => self.slide_forward(day),
            MonthStep::Jump => GridWindow::centered_on(day),
        }
    }
}

/// Asks the view to move input focus to the cell with the given id once the
/// accompanying state is visible. Views without such a cell ignore it.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRequest(DayId);

impl FocusRequest {
    pub fn new(day: &NaiveDate) -> Self {
        FocusRequest(DayId::of(day))
    }

    pub fn target(&self) -> &DayId {
        &self.0
    }
}

/// Result of a state transition. `state` has to be committed before
/// `notify` is reported and `focus` is executed.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: NavigationState,
    pub focus: FocusRequest,
    pub notify: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    highlighted: NaiveDate,
    selected: Option<NaiveDate>,
    window: GridWindow,
}

impl NavigationState {
    /// Days outside the navigable range are clamped into it.
    pub fn new(highlighted: NaiveDate, selected: Option<NaiveDate>) -> Self {
        let highlighted = clamp_navigable(highlighted);
        let selected = selected.map(clamp_navigable);
        NavigationState {
            highlighted,
            selected,
            window: GridWindow::centered_on(&highlighted),
        }
    }

    pub fn highlighted_date(&self) -> NaiveDate {
        self.highlighted
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn window(&self) -> &GridWindow {
        &self.window
    }

    pub fn current_month_weeks(&self) -> &MonthGrid {
        self.window.current()
    }

    pub fn previous_month_weeks(&self) -> &MonthGrid {
        self.window.previous()
    }

    pub fn next_month_weeks(&self) -> &MonthGrid {
        self.window.next()
    }

    pub fn highlight(&self, day: NaiveDate) -> Transition {
        let day = clamp_navigable(day);
        let step = MonthStep::between(&self.highlighted, &day);
        log::debug!("Highlight {} -> {} ({:?})", self.highlighted, day, step);

        Transition {
            state: NavigationState {
                highlighted: day,
                selected: self.selected,
                window: self.window.moved(step, &day),
            },
            focus: FocusRequest::new(&day),
            notify: None,
        }
    }

    /// Selects and highlights `day`. A notification is only attached if
    /// `day` is a different calendar day than the previous selection.
    pub fn select(&self, day: NaiveDate) -> Transition {
        let day = clamp_navigable(day);
        let previous = self.selected;
        let selected = NavigationState {
            selected: Some(day),
            ..self.clone()
        };

        let mut transition = selected.highlight(day);
        if previous != Some(day) {
            transition.notify = Some(day);
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn assert_consistent(state: &NavigationState) {
        let day = state.highlighted_date();
        assert_eq!(*state.current_month_weeks(), build_month_grid(&day));
        assert_eq!(
            *state.previous_month_weeks(),
            build_month_grid(&day_in_previous_month(&day))
        );
        assert_eq!(
            *state.next_month_weeks(),
            build_month_grid(&day_in_next_month(&day))
        );
    }

    #[test]
    fn classifies_month_steps() {
        let day = ymd(2024, 1, 31);

        assert_eq!(MonthStep::between(&day, &ymd(2024, 1, 1)), MonthStep::Same);
        assert_eq!(MonthStep::between(&day, &ymd(2023, 12, 1)), MonthStep::Previous);
        assert_eq!(MonthStep::between(&day, &ymd(2024, 2, 29)), MonthStep::Next);
        assert_eq!(MonthStep::between(&day, &ymd(2024, 3, 1)), MonthStep::Jump);
        assert_eq!(MonthStep::between(&day, &ymd(2023, 1, 15)), MonthStep::Jump);
    }

    #[test]
    fn same_month_keeps_grids() {
        let state = NavigationState::new(ymd(2024, 2, 15), None);
        let next = state.highlight(ymd(2024, 2, 3)).state;

        assert_eq!(next.highlighted_date(), ymd(2024, 2, 3));
        for offset in -1..=1 {
            assert!(Rc::ptr_eq(
                state.window().at(offset).unwrap(),
                next.window().at(offset).unwrap()
            ));
        }
    }

    #[test]
    fn highlighting_the_highlighted_day_changes_nothing() {
        let state = NavigationState::new(ymd(2024, 2, 15), None);
        let next = state.highlight(ymd(2024, 2, 15)).state;

        assert_eq!(next, state);
        assert!(Rc::ptr_eq(state.window().previous(), next.window().previous()));
        assert!(Rc::ptr_eq(state.window().next(), next.window().next()));
    }

    #[test]
    fn sliding_forward_reuses_two_grids() {
        let state = NavigationState::new(ymd(2024, 2, 15), None);
        let next = state.highlight(ymd(2024, 3, 1)).state;

        assert!(Rc::ptr_eq(next.window().previous(), state.window().current()));
        assert!(Rc::ptr_eq(next.window().current(), state.window().next()));
        assert_eq!(*next.previous_month_weeks(), build_month_grid(&ymd(2024, 2, 1)));
        assert_consistent(&next);
    }

    #[test]
    fn sliding_back_reuses_two_grids() {
        let state = NavigationState::new(ymd(2024, 1, 3), None);
        let prev = state.highlight(ymd(2023, 12, 27)).state;

        assert!(Rc::ptr_eq(prev.window().current(), state.window().previous()));
        assert!(Rc::ptr_eq(prev.window().next(), state.window().current()));
        assert_eq!(prev.previous_month_weeks().month().to_string(), "November 2023");
        assert_consistent(&prev);
    }

    #[test]
    fn jumps_rebuild_everything() {
        let state = NavigationState::new(ymd(2024, 2, 15), None);
        let jumped = state.highlight(ymd(2030, 7, 4)).state;

        for offset in -1..=1 {
            assert!(!Rc::ptr_eq(
                state.window().at(offset).unwrap(),
                jumped.window().at(offset).unwrap()
            ));
        }
        assert_consistent(&jumped);
    }

    #[test]
    fn window_stays_consistent_while_walking() {
        let mut state = NavigationState::new(ymd(2023, 11, 20), None);
        let steps = [1, 7, -7, 30, -1, 45, -60, 400, 3, -365, 14];

        for _ in 0..5 {
            for step in steps {
                let day = state.highlighted_date() + Duration::days(step);
                state = state.highlight(day).state;
                assert_consistent(&state);
            }
        }
    }

    #[test]
    fn highlight_requests_focus_but_never_notifies() {
        let state = NavigationState::new(ymd(2024, 2, 15), Some(ymd(2024, 2, 1)));
        let transition = state.highlight(ymd(2024, 2, 20));

        assert_eq!(transition.focus.target(), &DayId::of(&ymd(2024, 2, 20)));
        assert_eq!(transition.notify, None);
        assert_eq!(transition.state.selected_date(), Some(ymd(2024, 2, 1)));
    }

    #[test]
    fn select_notifies_only_on_change() {
        let state = NavigationState::new(ymd(2024, 2, 15), None);

        let first = state.select(ymd(2024, 3, 2));
        assert_eq!(first.notify, Some(ymd(2024, 3, 2)));
        assert_eq!(first.state.selected_date(), Some(ymd(2024, 3, 2)));
        assert_eq!(first.state.highlighted_date(), ymd(2024, 3, 2));
        assert_consistent(&first.state);

        let again = first.state.select(ymd(2024, 3, 2));
        assert_eq!(again.notify, None);

        let other = again.state.select(ymd(2024, 3, 3));
        assert_eq!(other.notify, Some(ymd(2024, 3, 3)));
    }

    #[test]
    fn reselecting_initial_value_is_silent() {
        let state = NavigationState::new(ymd(2024, 2, 15), Some(ymd(2024, 2, 15)));

        assert_eq!(state.select(ymd(2024, 2, 15)).notify, None);
    }

    #[test]
    fn window_exists_at_both_ends_of_the_range() {
        let late = NavigationState::new(NaiveDate::MAX - Duration::days(15), None);
        assert_eq!(late.highlighted_date(), last_navigable_day());
        assert_consistent(&late);

        let early = NavigationState::new(NaiveDate::MIN, Some(NaiveDate::MIN));
        assert_eq!(early.highlighted_date(), first_navigable_day());
        assert_eq!(early.selected_date(), Some(first_navigable_day()));
        assert_consistent(&early);
    }

    #[test]
    fn moves_past_the_range_stop_at_its_edge() {
        let state = NavigationState::new(ymd(2024, 2, 15), None);

        let jumped = state.highlight(NaiveDate::MAX).state;
        assert_eq!(jumped.highlighted_date(), last_navigable_day());
        assert_consistent(&jumped);

        let selected = jumped.select(NaiveDate::MIN);
        assert_eq!(selected.notify, Some(first_navigable_day()));
        assert_consistent(&selected.state);
    }
}
