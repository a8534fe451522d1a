use chrono::{DateTime, Local, NaiveDate};
use std::cell::Cell;
use std::rc::Rc;

use unsegen::base::style::*;

use crate::picker::{Datepicker, DayId, FocusRequest, Key, Orientation};

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub day_text_style: TextFormatModifier,
    pub outside_day_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub focus_day_char: Option<char>,
    pub selected_day_style: StyleModifier,
    pub selected_day_text_style: TextFormatModifier,
    pub today_day_style: StyleModifier,
    pub today_day_char: Option<char>,
    pub month_header_style: StyleModifier,
    pub month_header_text_style: TextFormatModifier,
    pub weekday_header_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            day_text_style: TextFormatModifier::default(),
            outside_day_style: StyleModifier::default().fg_color(Color::LightBlack),
            focus_day_style: StyleModifier::default().bg_color(Color::Blue),
            focus_day_char: None,
            selected_day_style: StyleModifier::default().invert(true),
            selected_day_text_style: TextFormatModifier::default().bold(true),
            today_day_style: StyleModifier::default().fg_color(Color::Green),
            today_day_char: Some('*'),
            month_header_style: StyleModifier::default().fg_color(Color::Yellow),
            month_header_text_style: TextFormatModifier::default().bold(true),
            weekday_header_style: StyleModifier::default().fg_color(Color::Yellow),
        }
    }
}

type ChangeHandler = Box<dyn FnMut(NaiveDate)>;

/// Host side state of the terminal view: the picker plus what the view
/// keeps on its own (focus, clock, theme).
pub struct Context {
    picker: Datepicker<ChangeHandler>,
    pub theme: Theme,
    focused: Option<DayId>,
    last_change: Rc<Cell<Option<NaiveDate>>>,
    now: DateTime<Local>,
}

impl Context {
    pub fn new(value: Option<NaiveDate>, orientation: Orientation) -> Self {
        let now = Local::now();
        let last_change = Rc::new(Cell::new(None));

        let sink = Rc::clone(&last_change);
        let on_change: ChangeHandler = Box::new(move |day| sink.set(Some(day)));

        Context {
            picker: Datepicker::with_today(value, now.date_naive(), on_change)
                .orientation(orientation),
            theme: Theme::default(),
            focused: None,
            last_change,
            now,
        }
    }

    pub fn picker(&self) -> &Datepicker<ChangeHandler> {
        &self.picker
    }

    pub fn focused(&self) -> Option<&DayId> {
        self.focused.as_ref()
    }

    /// Last day reported through the change notification.
    pub fn last_change(&self) -> Option<NaiveDate> {
        self.last_change.get()
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }

    pub fn update(&mut self) {
        self.now = Local::now();
        self.picker.update_today(self.now.date_naive());
    }

    pub fn mount(&mut self) {
        let request = self.picker.mount();
        self.focus(request);
    }

    pub fn handle_key(&mut self, key: Key) {
        if let Some(request) = self.picker.handle_key(key) {
            self.focus(request);
        }
    }

    /// Moves focus to the requested cell if one of the drawn months has it.
    fn focus(&mut self, request: FocusRequest) {
        let target = request.target();
        let on_screen = self.picker.render(|payload| {
            payload
                .previous_month_weeks
                .days()
                .chain(payload.current_month_weeks.days())
                .chain(payload.next_month_weeks.days())
                .any(|day| payload.day_binding(day).id == *target)
        });

        if on_screen {
            self.focused = Some(target.clone());
        } else {
            log::warn!("No cell {} on screen, ignoring focus request", target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn mount_focuses_initial_value() {
        let mut context = Context::new(Some(ymd(2024, 2, 15)), Orientation::Horizontal);
        assert_eq!(context.focused(), None);

        context.mount();
        assert_eq!(context.focused(), Some(&DayId::of(&ymd(2024, 2, 15))));
    }

    #[test]
    fn keys_move_focus_and_report_selection() {
        let mut context = Context::new(Some(ymd(2024, 2, 29)), Orientation::Horizontal);
        context.mount();

        context.handle_key(Key::Right);
        assert_eq!(context.focused(), Some(&DayId::of(&ymd(2024, 3, 1))));
        assert_eq!(context.last_change(), None);

        context.handle_key(Key::Enter);
        assert_eq!(context.last_change(), Some(ymd(2024, 3, 1)));
        assert_eq!(context.picker().selected_date(), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn focus_on_cells_off_screen_is_ignored() {
        let mut context = Context::new(Some(ymd(2024, 2, 15)), Orientation::Horizontal);
        context.mount();

        context.focus(FocusRequest::new(&ymd(2031, 8, 9)));
        assert_eq!(context.focused(), Some(&DayId::of(&ymd(2024, 2, 15))));

        // padding days of the previous grid are drawn too
        context.focus(FocusRequest::new(&ymd(2023, 12, 31)));
        assert_eq!(context.focused(), Some(&DayId::of(&ymd(2023, 12, 31))));

        context.focus(FocusRequest::new(&ymd(2023, 11, 30)));
        assert_eq!(context.focused(), Some(&DayId::of(&ymd(2023, 12, 31))));
    }
}
