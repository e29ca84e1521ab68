use chrono::{Datelike, NaiveDate};

/// Highest frame index available in the weekly background set.
pub const MAX_WEEK_FRAME: u32 = 52;

/// Week of the year counted with Sunday as the first day, 1-based.
///
/// Week 1 runs from January 1st through the first Saturday. Years whose
/// final days spill into a 53rd or 54th week clamp to the last frame.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let days = date.ordinal0() + 7 - date.weekday().num_days_from_sunday();
    (days / 7 + 1).min(MAX_WEEK_FRAME)
}

/// File name of the seasonal background frame for `date`.
pub fn weekly_frame_name(date: NaiveDate) -> String {
    format!("week-{:02}.webp", week_of_year(date))
}

#[cfg(test)]
mod tests {
    use super::{week_of_year, weekly_frame_name};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn early_january_falls_in_week_one() {
        assert_eq!(week_of_year(date(2020, 1, 1)), 1);
        assert_eq!(week_of_year(date(2021, 1, 1)), 1);
        assert_eq!(week_of_year(date(2020, 1, 4)), 1);
    }

    #[test]
    fn sunday_starts_a_new_week() {
        // 2020-01-05 was the first Sunday of that year.
        assert_eq!(week_of_year(date(2020, 1, 4)), 1);
        assert_eq!(week_of_year(date(2020, 1, 5)), 2);
    }

    #[test]
    fn late_december_clamps_to_the_last_frame() {
        // A Sunday on December 31st would count as a 54th week.
        assert_eq!(week_of_year(date(2023, 12, 31)), 52);
        assert_eq!(week_of_year(date(2023, 12, 24)), 52);
    }

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(weekly_frame_name(date(2020, 1, 1)), "week-01.webp");
        assert_eq!(weekly_frame_name(date(2008, 6, 29)), "week-27.webp");
    }
}
