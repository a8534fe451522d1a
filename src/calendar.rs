//! Month arithmetic and the week grid of a calendar month.
//!
//! Weeks start on Sunday (day-of-week index 0). A [`MonthGrid`] always
//! consists of complete weeks, borrowing days from the neighbouring months
//! to fill the first and last row.

use chrono::{DateTime, Datelike, Duration, Month, NaiveDate, NaiveDateTime, TimeZone};
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{Error, ErrorKind, Result};

pub const DAYS_PER_WEEK: usize = 7;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const HEADER: &[&str] = &["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Position of `date` inside a week row, 0 being the first day of the week.
pub fn weekday_index<D: Datelike>(date: &D) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Anything that names a calendar day. Time of day is discarded, so two
/// values on the same day compare equal after conversion.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

pub fn first_of_month(day: &NaiveDate) -> NaiveDate {
    *day - Duration::days(day.day0() as i64)
}

pub fn last_of_month(day: &NaiveDate) -> NaiveDate {
    let month = MonthIndex::from(*day);
    first_of_month(day) + Duration::days(month.num_days() as i64 - 1)
}

/// Parses a day given as `YYYY-MM-DD`.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|err| {
        Error::new(
            ErrorKind::DateParse,
            &format!("'{}' is not a YYYY-MM-DD date ({})", input, err),
        )
    })
}

/// Last day of the month preceding the month of `day`.
pub fn day_in_previous_month(day: &NaiveDate) -> NaiveDate {
    first_of_month(day) - Duration::days(1)
}

/// First day of the month following the month of `day`.
pub fn day_in_next_month(day: &NaiveDate) -> NaiveDate {
    last_of_month(day) + Duration::days(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    fn from_ordinal(ordinal: i64) -> Self {
        MonthIndex {
            index: MONTHS[ordinal.rem_euclid(12) as usize],
            year: ordinal.div_euclid(12) as i32,
        }
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + self.month0() as i64
    }

    pub fn month(&self) -> Month {
        self.index
    }

    /// Zero based month, January being 0.
    pub fn month0(&self) -> u32 {
        self.index.number_from_month() - 1
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.index, self.year)
    }

    pub fn next(&self) -> Self {
        MonthIndex {
            index: self.index.succ(),
            year: if self.index == Month::December {
                self.year + 1
            } else {
                self.year
            },
        }
    }

    pub fn prev(&self) -> Self {
        MonthIndex {
            index: self.index.pred(),
            year: if self.index == Month::January {
                self.year - 1
            } else {
                self.year
            },
        }
    }

    /// Signed number of months from `other` to `self`.
    pub fn months_since(&self, other: &MonthIndex) -> i64 {
        self.ordinal() - other.ordinal()
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(MONTHS[m.month0() as usize], m.year())
    }
}

impl Add<i32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: i32) -> Self::Output {
        MonthIndex::from_ordinal(self.ordinal() + rhs as i64)
    }
}

impl Sub<i32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: i32) -> Self::Output {
        MonthIndex::from_ordinal(self.ordinal() - rhs as i64)
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index.name(), self.year)
    }
}

/// Seven consecutive days, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRow([NaiveDate; DAYS_PER_WEEK]);

impl WeekRow {
    fn from_slice(days: &[NaiveDate]) -> Self {
        WeekRow(std::array::from_fn(|idx| days[idx]))
    }

    pub fn days(&self) -> &[NaiveDate; DAYS_PER_WEEK] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.iter()
    }

    pub fn first(&self) -> NaiveDate {
        self.0[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.0[DAYS_PER_WEEK - 1]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: MonthIndex,
    weeks: Vec<WeekRow>,
}

impl MonthGrid {
    pub fn month(&self) -> MonthIndex {
        self.month
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    pub fn num_weeks(&self) -> usize {
        self.weeks.len()
    }

    /// All days of the grid including the ones borrowed from adjacent months.
    pub fn days(&self) -> impl Iterator<Item = &NaiveDate> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.weeks[0].first()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.weeks[self.weeks.len() - 1].last()
    }

    pub fn contains(&self, day: &NaiveDate) -> bool {
        (self.first_day()..=self.last_day()).contains(day)
    }

    /// Whether `day` belongs to the month itself rather than the padding.
    pub fn is_in_month(&self, day: &NaiveDate) -> bool {
        MonthIndex::from(*day) == self.month
    }

    /// Row and column of `day` within the grid.
    pub fn position_of(&self, day: &NaiveDate) -> Option<(usize, usize)> {
        if !self.contains(day) {
            return None;
        }
        let offset = day.signed_duration_since(self.first_day()).num_days() as usize;
        Some((offset / DAYS_PER_WEEK, offset % DAYS_PER_WEEK))
    }
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = DAYS_PER_WEEK * 3 - 1;
        writeln!(f, "{:^width$}", self.month.to_string(), width = width)?;
        writeln!(f, "{}", HEADER.iter().join(" "))?;
        for week in &self.weeks {
            let line = week
                .iter()
                .map(|day| {
                    if self.is_in_month(day) {
                        format!("{:>2}", day.day())
                    } else {
                        "  ".to_owned()
                    }
                })
                .join(" ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

/// Number of week rows the days of a month touch, counting a new row for
/// every day that starts a week except the first one.
fn weeks_spanned(first: &NaiveDate, num_days: u32) -> usize {
    let lead = weekday_index(first);
    1 + (1..num_days)
        .filter(|offset| (lead + offset) % DAYS_PER_WEEK as u32 == 0)
        .count()
}

/// Builds the week grid of the month `date` lies in.
///
/// Padding days are derived by walking backwards from the first and
/// forwards from the last day of the month, so the neighbouring months are
/// never built themselves.
pub fn build_month_grid<D: CalendarDay>(date: &D) -> MonthGrid {
    let date = date.calendar_day();
    let month = MonthIndex::from(date);
    let num_days = month.num_days();

    let first = first_of_month(&date);
    let last = first + Duration::days(num_days as i64 - 1);

    let lead = weekday_index(&first) as i64;
    let trail = DAYS_PER_WEEK as i64 - 1 - weekday_index(&last) as i64;

    let days: Vec<NaiveDate> = (-lead..num_days as i64 + trail)
        .map(|offset| first + Duration::days(offset))
        .collect();

    let weeks: Vec<WeekRow> = days
        .chunks_exact(DAYS_PER_WEEK)
        .map(WeekRow::from_slice)
        .collect();

    debug_assert_eq!(weeks.len(), weeks_spanned(&first, num_days));

    MonthGrid { month, weeks }
}
