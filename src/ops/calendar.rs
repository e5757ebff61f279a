use chrono::{Datelike, Local, Months, NaiveDate};

/// Weekday column headers, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Day 1 of `date`'s month
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in `date`'s month (28..=31)
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Weekday of day 1, 0 = Sunday .. 6 = Saturday
pub fn first_weekday_of_month(date: NaiveDate) -> u32 {
    first_of_month(date).weekday().num_days_from_sunday()
}

/// "October 2026"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a.day() == b.day() && a.month() == b.month() && a.year() == b.year()
}

/// Whether `date` is the current local date
pub fn is_today(date: NaiveDate) -> bool {
    is_same_day(date, Local::now().date_naive())
}

/// Day 1 of the month `delta` months away from `date`'s month
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let first = first_of_month(date);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

/// Flat, week-aligned cell sequence. `None` cells pad before day 1 and after
/// the last day so the length is a multiple of 7.
pub fn build_grid(first_weekday: u32, days: u32) -> Vec<Option<u32>> {
    let used = first_weekday + days;
    let total = used.div_ceil(7) * 7;
    (0..total)
        .map(|i| {
            if i < first_weekday || i >= used {
                None
            } else {
                Some(i - first_weekday + 1)
            }
        })
        .collect()
}

/// Grid cells for `date`'s month
pub fn month_grid(date: NaiveDate) -> Vec<Option<u32>> {
    build_grid(first_weekday_of_month(date), days_in_month(date))
}

/// Index of `day` in the grid of a month starting on `first_weekday`
pub fn cell_index(first_weekday: u32, day: u32) -> usize {
    (first_weekday + day - 1) as usize
}
