//! Resolves the fixed period labels into half-open `[start, end)` ranges.
//!
//! Days, weeks and months are evaluated in a single reference offset
//! (Asia/Jakarta by default), never the caller's. The resulting instants are
//! UTC so they compare directly against stored `created_at` values.

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, TimeZone, Utc};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodSelector {
    Today,
    Yesterday,
    ThisWeek,
    PastWeek,
    ThisMonth,
    PastMonth,
}

impl PeriodSelector {
    pub const ALL: [PeriodSelector; 6] = [
        PeriodSelector::Today,
        PeriodSelector::Yesterday,
        PeriodSelector::ThisWeek,
        PeriodSelector::PastWeek,
        PeriodSelector::ThisMonth,
        PeriodSelector::PastMonth,
    ];

    /// Label shown on the reply keyboard. Detection matches it byte for byte.
    pub fn label(self) -> &'static str {
        match self {
            PeriodSelector::Today => "hari ini",
            PeriodSelector::Yesterday => "kemarin",
            PeriodSelector::ThisWeek => "pekan ini",
            PeriodSelector::PastWeek => "pekan lalu",
            PeriodSelector::ThisMonth => "bulan ini",
            PeriodSelector::PastMonth => "bulan lalu",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|selector| selector.label() == label)
    }
}

/// First day of the week used by `pekan ini` / `pekan lalu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn days_since_start(self, date: NaiveDate) -> u64 {
        let weekday = date.weekday();
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday() as u64,
            WeekStart::Monday => weekday.num_days_from_monday() as u64,
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "minggu" => Ok(WeekStart::Sunday),
            "monday" | "senin" => Ok(WeekStart::Monday),
            other => Err(format!("unknown week start: {}", other)),
        }
    }
}

/// Half-open `[start, end)` range in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Where "now" is and how weeks are counted.
#[derive(Debug, Clone, Copy)]
pub struct PeriodResolver {
    pub offset: FixedOffset,
    pub week_start: WeekStart,
}

impl PeriodResolver {
    pub fn new(offset: FixedOffset, week_start: WeekStart) -> Self {
        Self { offset, week_start }
    }

    pub fn resolve(&self, selector: PeriodSelector, now: DateTime<Utc>) -> DateRange {
        let today = now.with_timezone(&self.offset).date_naive();
        let tomorrow = shift_days(today, 1, true);
        let begin_of_week = shift_days(today, self.week_start.days_since_start(today), false);
        let begin_of_month = today.with_day(1).unwrap_or(today);

        let (start, end) = match selector {
            PeriodSelector::Today => (today, tomorrow),
            PeriodSelector::Yesterday => (shift_days(today, 1, false), today),
            PeriodSelector::ThisWeek => (begin_of_week, tomorrow),
            PeriodSelector::PastWeek => (shift_days(begin_of_week, 7, false), begin_of_week),
            PeriodSelector::ThisMonth => (begin_of_month, tomorrow),
            PeriodSelector::PastMonth => (
                begin_of_month
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(begin_of_month),
                begin_of_month,
            ),
        };

        DateRange {
            start: self.midnight(start),
            end: self.midnight(end),
        }
    }

    /// Resolves a raw label; unknown labels have no range.
    pub fn resolve_label(&self, label: &str, now: DateTime<Utc>) -> Option<DateRange> {
        PeriodSelector::from_label(label).map(|selector| self.resolve(selector, now))
    }

    /// Calendar date of `instant` in the reference offset.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    fn midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        // A fixed offset has no gaps or folds, so local midnight always maps to one instant.
        self.offset
            .from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

fn shift_days(date: NaiveDate, days: u64, forward: bool) -> NaiveDate {
    let shifted = if forward {
        date.checked_add_days(Days::new(days))
    } else {
        date.checked_sub_days(Days::new(days))
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jakarta() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn resolver(week_start: WeekStart) -> PeriodResolver {
        PeriodResolver::new(jakarta(), week_start)
    }

    /// Local Jakarta wall clock time as a UTC instant.
    fn wib(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        jakarta()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_labels_round_trip() {
        for selector in PeriodSelector::ALL {
            assert_eq!(PeriodSelector::from_label(selector.label()), Some(selector));
        }
        assert_eq!(PeriodSelector::from_label("Hari Ini"), None);
        assert_eq!(PeriodSelector::from_label("minggu ini"), None);
    }

    #[test]
    fn test_today_uses_reference_offset() {
        // 20:00 UTC on the 15th is already 03:00 on the 16th in Jakarta
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 20, 0, 0).unwrap();
        let range = resolver(WeekStart::Sunday).resolve(PeriodSelector::Today, now);

        assert_eq!(range.start, wib(2026, 10, 16, 0, 0));
        assert_eq!(range.end, wib(2026, 10, 17, 0, 0));
        assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 10, 15, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_adjacent_periods_are_contiguous() {
        let now = wib(2026, 10, 16, 9, 30);
        let r = resolver(WeekStart::Sunday);

        let today = r.resolve(PeriodSelector::Today, now);
        let yesterday = r.resolve(PeriodSelector::Yesterday, now);
        let this_week = r.resolve(PeriodSelector::ThisWeek, now);
        let past_week = r.resolve(PeriodSelector::PastWeek, now);
        let this_month = r.resolve(PeriodSelector::ThisMonth, now);
        let past_month = r.resolve(PeriodSelector::PastMonth, now);

        assert_eq!(yesterday.end, today.start);
        assert_eq!(past_week.end, this_week.start);
        assert_eq!(past_month.end, this_month.start);
        assert_eq!(this_week.end, today.end);
        assert_eq!(this_month.end, today.end);
    }

    #[test]
    fn test_week_starting_sunday() {
        // 2026-10-16 is a Friday
        let now = wib(2026, 10, 16, 9, 30);
        let r = resolver(WeekStart::Sunday);

        let this_week = r.resolve(PeriodSelector::ThisWeek, now);
        assert_eq!(this_week.start, wib(2026, 10, 11, 0, 0));

        let past_week = r.resolve(PeriodSelector::PastWeek, now);
        assert_eq!(past_week.start, wib(2026, 10, 4, 0, 0));
        assert_eq!(past_week.end, wib(2026, 10, 11, 0, 0));
    }

    #[test]
    fn test_week_starting_monday() {
        let now = wib(2026, 10, 16, 9, 30);
        let this_week = resolver(WeekStart::Monday).resolve(PeriodSelector::ThisWeek, now);
        assert_eq!(this_week.start, wib(2026, 10, 12, 0, 0));
    }

    #[test]
    fn test_sunday_is_its_own_week_start() {
        let now = wib(2026, 10, 18, 8, 0);
        let this_week = resolver(WeekStart::Sunday).resolve(PeriodSelector::ThisWeek, now);
        assert_eq!(this_week.start, wib(2026, 10, 18, 0, 0));
        assert_eq!(this_week.end, wib(2026, 10, 19, 0, 0));
    }

    #[test]
    fn test_months_cross_year_boundary() {
        let now = wib(2026, 1, 5, 12, 0);
        let r = resolver(WeekStart::Sunday);

        let this_month = r.resolve(PeriodSelector::ThisMonth, now);
        assert_eq!(this_month.start, wib(2026, 1, 1, 0, 0));

        let past_month = r.resolve(PeriodSelector::PastMonth, now);
        assert_eq!(past_month.start, wib(2025, 12, 1, 0, 0));
        assert_eq!(past_month.end, wib(2026, 1, 1, 0, 0));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let now = wib(2026, 3, 31, 23, 59);
        let r = resolver(WeekStart::Sunday);
        for selector in PeriodSelector::ALL {
            assert_eq!(r.resolve(selector, now), r.resolve(selector, now));
        }
    }

    #[test]
    fn test_unknown_label_has_no_range() {
        let now = wib(2026, 10, 16, 9, 30);
        assert_eq!(resolver(WeekStart::Sunday).resolve_label("tahun ini", now), None);
    }

    #[test]
    fn test_range_is_half_open() {
        let now = wib(2026, 10, 16, 9, 30);
        let today = resolver(WeekStart::Sunday).resolve(PeriodSelector::Today, now);
        assert!(today.contains(today.start));
        assert!(!today.contains(today.end));
    }

    #[test]
    fn test_week_start_parsing() {
        assert_eq!("Sunday".parse::<WeekStart>(), Ok(WeekStart::Sunday));
        assert_eq!("senin".parse::<WeekStart>(), Ok(WeekStart::Monday));
        assert!("friday".parse::<WeekStart>().is_err());
    }
}
