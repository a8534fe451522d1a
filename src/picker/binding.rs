use chrono::{Datelike, Duration, NaiveDate};
use derive_more::Display;

/// Stable identifier of a day cell, unique per (year, month, day).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct DayId(String);

impl DayId {
    const PREFIX: &'static str = "datepicker__";

    pub fn of(day: &NaiveDate) -> Self {
        DayId(format!(
            "{}{}-{}-{}",
            Self::PREFIX,
            day.year(),
            day.month0(),
            day.day()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&NaiveDate> for DayId {
    fn from(day: &NaiveDate) -> Self {
        DayId::of(day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Up,
    Right,
    Down,
    Enter,
    Space,
    Tab,
    Other,
}

impl Key {
    /// Maps browser style key codes.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            37 => Key::Left,
            38 => Key::Up,
            39 => Key::Right,
            40 => Key::Down,
            13 => Key::Enter,
            32 => Key::Space,
            9 => Key::Tab,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayEvent {
    Click,
    KeyUp(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Highlight(NaiveDate),
    Select(NaiveDate),
}

impl Command {
    /// Resolves an event received by the cell of `day`. Cursor movement is
    /// relative to `highlighted`, not to the cell the event arrived at.
    /// Moves leaving chrono's range resolve to nothing.
    pub fn for_event(highlighted: NaiveDate, day: NaiveDate, event: DayEvent) -> Option<Self> {
        let target = match event {
            DayEvent::Click | DayEvent::KeyUp(Key::Enter) | DayEvent::KeyUp(Key::Space) => {
                return Some(Command::Select(day));
            }
            DayEvent::KeyUp(Key::Tab) => day,
            DayEvent::KeyUp(Key::Left) => highlighted.checked_sub_signed(Duration::days(1))?,
            DayEvent::KeyUp(Key::Right) => highlighted.checked_add_signed(Duration::days(1))?,
            DayEvent::KeyUp(Key::Up) => highlighted.checked_sub_signed(Duration::weeks(1))?,
            DayEvent::KeyUp(Key::Down) => highlighted.checked_add_signed(Duration::weeks(1))?,
            DayEvent::KeyUp(Key::Other) => return None,
        };

        Some(Command::Highlight(target))
    }
}

/// What a view needs to wire up the cell of a single day. Events for the
/// cell go back through `Datepicker::dispatch` together with `day`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBinding {
    pub id: DayId,
    pub day: NaiveDate,
    pub tab_index: i32,
}

impl DayBinding {
    pub fn new(day: NaiveDate) -> Self {
        DayBinding {
            id: DayId::of(&day),
            day,
            tab_index: 0,
        }
    }
}
