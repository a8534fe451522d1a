use chrono::{Duration, NaiveDate};
use std::cell::RefCell;
use std::rc::Rc;

use datepicker::calendar::{build_month_grid, weekday_index, DAYS_PER_WEEK};
use datepicker::picker::{DayEvent, DayId, Key};
use datepicker::Datepicker;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn leap_february_scenario() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let mut picker = Datepicker::with_today(None, ymd(2024, 2, 15), move |day| {
        sink.borrow_mut().push(day)
    });

    let focus = picker.mount();
    assert_eq!(focus.target(), &DayId::of(&ymd(2024, 2, 15)));

    picker.render(|payload| {
        let weeks = payload.current_month_weeks.weeks();
        assert_eq!(weeks.len(), 5);

        let first_row = weeks[0].days();
        assert_eq!(first_row[..4], [
            ymd(2024, 1, 28),
            ymd(2024, 1, 29),
            ymd(2024, 1, 30),
            ymd(2024, 1, 31),
        ]);
        assert_eq!(first_row[4], ymd(2024, 2, 1));

        let last_row = weeks[4].days();
        assert_eq!(last_row[4], ymd(2024, 2, 29));
        assert_eq!(last_row[5..], [ymd(2024, 3, 1), ymd(2024, 3, 2)]);

        assert_eq!(payload.selected_date, None);
        assert_eq!(payload.highlighted_date, ymd(2024, 2, 15));
    });

    // Walk past the end of the month and commit with the space bar
    for _ in 0..14 {
        let _ = picker.handle_key(Key::Right);
    }
    assert_eq!(picker.highlighted_date(), ymd(2024, 2, 29));
    let _ = picker.handle_key(Key::Right);
    let _ = picker.handle_key(Key::Space);
    let _ = picker.dispatch(ymd(2024, 3, 1), DayEvent::Click);

    assert_eq!(*changes.borrow(), vec![ymd(2024, 3, 1)]);
    picker.render(|payload| {
        assert_eq!(payload.selected_date, Some(ymd(2024, 3, 1)));
        assert_eq!(*payload.previous_month_weeks, build_month_grid(&ymd(2024, 2, 15)));
        assert_eq!(*payload.next_month_weeks, build_month_grid(&ymd(2024, 4, 1)));
    });
}

#[test]
fn grids_hold_for_four_centuries() {
    let mut day = ymd(1800, 1, 1);
    while day < ymd(2200, 1, 1) {
        let grid = build_month_grid(&day);

        for week in grid.weeks() {
            for (idx, d) in week.iter().enumerate() {
                assert_eq!(weekday_index(d) as usize, idx);
            }
        }
        assert_eq!(
            grid.last_day() - grid.first_day(),
            Duration::days((grid.num_weeks() * DAYS_PER_WEEK - 1) as i64)
        );

        day = grid.last_day() + Duration::days(1);
        assert!(!grid.is_in_month(&day));
        // step into the middle of the following month
        day += Duration::days(14);
    }
}

#[test]
fn keyboard_walk_keeps_cache_consistent() {
    let mut picker = Datepicker::with_today(Some(ymd(2023, 12, 31)), ymd(2023, 12, 31), |_| {});
    let keys = [Key::Down, Key::Down, Key::Left, Key::Up, Key::Right, Key::Down];

    for _ in 0..40 {
        for key in keys.iter() {
            let _ = picker.handle_key(*key);

            let highlighted = picker.highlighted_date();
            let state = picker.state();
            assert!(state.current_month_weeks().is_in_month(&highlighted));
            assert_eq!(*state.current_month_weeks(), build_month_grid(&highlighted));
            assert_eq!(
                state.previous_month_weeks().month(),
                state.current_month_weeks().month().prev()
            );
            assert_eq!(
                state.next_month_weeks().month(),
                state.current_month_weeks().month().next()
            );
        }
    }
}
