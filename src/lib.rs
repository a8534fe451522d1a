//! A month calendar with a highlighted and a selected day.
//!
//! [`calendar`] turns months into padded week grids, [`picker`] keeps the
//! navigation state and everything else hosts the picker in a terminal.

pub mod calendar;
pub mod config;
pub mod error;
pub mod events;
pub mod picker;
pub mod ui;

pub use calendar::{build_month_grid, CalendarDay, MonthGrid, MonthIndex, WeekRow};
pub use picker::{Datepicker, NavigationState, RenderPayload};
