use chrono::{Datelike, NaiveDate};
use std::fmt::{Display, Write};
use unsegen::base::*;
use unsegen::widget::*;

use super::Theme;
use crate::calendar::{MonthGrid, DAYS_PER_WEEK};
use crate::picker::{DayId, Orientation, RenderPayload};

pub struct DayCell<'a> {
    day: NaiveDate,
    focused: bool,
    is_today: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    const CELL_WIDTH: usize = 4;

    fn new(day: NaiveDate, theme: &'a Theme) -> Self {
        DayCell {
            day,
            focused: false,
            is_today: false,
            theme,
        }
    }

    fn focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arg_today = if self.is_today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_focus = if self.focused {
            self.theme.focus_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, "{}{}{:>2}", arg_today, arg_focus, self.day.day())
    }
}

/// One month of the picker, drawn from its grid.
pub struct MonthPane<'a> {
    grid: &'a MonthGrid,
    payload: RenderPayload<'a>,
    focused: Option<&'a DayId>,
    theme: &'a Theme,
}

impl<'a> MonthPane<'a> {
    const MAX_ROWS: usize = 6;
    const HEADER_ROWS: usize = 2;

    const HEADER: &'static [&'static str] = &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    pub fn new(
        grid: &'a MonthGrid,
        payload: RenderPayload<'a>,
        focused: Option<&'a DayId>,
        theme: &'a Theme,
    ) -> Self {
        MonthPane {
            grid,
            payload,
            focused,
            theme,
        }
    }

    fn width() -> usize {
        DAYS_PER_WEEK * DayCell::CELL_WIDTH
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(Self::width()),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::MAX_ROWS),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.theme;

        let mut cursor = Cursor::new(&mut window).style_modifier(
            theme
                .month_header_style
                .format(theme.month_header_text_style),
        );

        if let Err(err) = write!(
            &mut cursor,
            "{:^width$}",
            self.grid.month().to_string(),
            width = Self::width()
        ) {
            log::warn!("Error while writing month header: {}", err);
        }

        cursor.move_to(ColIndex::new(0), RowIndex::new(1));
        cursor.set_style_modifier(theme.weekday_header_style);
        for &head in Self::HEADER {
            if let Err(err) = write!(
                &mut cursor,
                "{:>width$}",
                &head,
                width = DayCell::CELL_WIDTH
            ) {
                log::warn!("Error while writing weekday header: {}", err);
            }
        }

        for (row, week) in self.grid.weeks().iter().enumerate() {
            cursor.move_to(
                ColIndex::new(0),
                RowIndex::new((Self::HEADER_ROWS + row) as i32),
            );

            for day in week.iter() {
                let focused = self.focused == Some(&self.payload.day_binding(day).id);
                let cell = DayCell::new(*day, theme)
                    .focus(focused)
                    .today(self.payload.is_today(day));

                cursor.set_style_modifier(theme.day_style.format(theme.day_text_style));
                if !self.grid.is_in_month(day) {
                    cursor.apply_style_modifier(theme.outside_day_style);
                }
                if cell.is_today {
                    cursor.apply_style_modifier(theme.today_day_style);
                }
                if self.payload.is_selected(day) {
                    cursor.apply_style_modifier(
                        theme
                            .selected_day_style
                            .format(theme.selected_day_text_style),
                    );
                }
                if focused {
                    cursor.apply_style_modifier(theme.focus_day_style);
                }

                if let Err(err) = write!(&mut cursor, "{}", cell) {
                    log::warn!("Error while writing day {}: {}", day, err);
                }
            }
        }
    }
}

/// Previous, current and next month side by side or stacked, depending on
/// the payload's orientation.
pub struct CalendarWindow<'a> {
    payload: RenderPayload<'a>,
    focused: Option<&'a DayId>,
    theme: &'a Theme,
}

impl<'a> CalendarWindow<'a> {
    pub fn new(payload: RenderPayload<'a>, focused: Option<&'a DayId>, theme: &'a Theme) -> Self {
        CalendarWindow {
            payload,
            focused,
            theme,
        }
    }

    fn pane(&self, grid: &'a MonthGrid) -> MonthPane<'a> {
        MonthPane::new(grid, self.payload, self.focused, self.theme)
    }

    fn layout(&self) -> Box<dyn Widget + 'a> {
        let months = [
            self.payload.previous_month_weeks,
            self.payload.current_month_weeks,
            self.payload.next_month_weeks,
        ];

        match self.payload.orientation {
            Orientation::Horizontal => Box::new(
                months
                    .iter()
                    .fold(HLayout::new().separator(GraphemeCluster::space()), |layout, grid| {
                        layout.widget(self.pane(*grid))
                    }),
            ),
            Orientation::Vertical => Box::new(
                months
                    .iter()
                    .fold(VLayout::new().separator(GraphemeCluster::space()), |layout, grid| {
                        layout.widget(self.pane(*grid))
                    }),
            ),
        }
    }
}

impl Widget for CalendarWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        self.layout().space_demand()
    }

    fn draw(&self, window: Window, hints: RenderingHints) {
        self.layout().draw(window, hints)
    }
}
