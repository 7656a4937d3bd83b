//! The immutable rule model and its evaluation pipeline.

mod date;

pub use date::{CalendarDate, DateFieldError, SexagenaryYear};

use almanac_cal::gregorian;
use almanac_core::{MinuteOfDay, Weekday, WeekdaySet};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// An nth-weekday shift applied after the raw date is resolved
/// ("2nd saturday before", "monday after"). `nth == 0` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayShift {
    pub weekday: Weekday,
    pub nth: u32,
    pub after: bool,
}

/// What a matched conditional branch does to the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchAction {
    /// Replace the time of day, keeping the date.
    StartTime(MinuteOfDay),
    /// Move to the strictly next/previous given weekday, keeping the time.
    Move { weekday: Weekday, next: bool },
}

/// One "if <weekdays> then ..." branch. Branches are evaluated in
/// declaration order and only the first match applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalBranch {
    pub when: WeekdaySet,
    pub action: BranchAction,
}

/// One "and if <weekdays> then next/previous <weekday>" branch producing
/// an auxiliary date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraBranch {
    pub when: WeekdaySet,
    pub weekday: Weekday,
    pub next: bool,
}

/// Year-class constraints. Set flags are OR'd; all-unset means no
/// constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearFilter {
    pub even: bool,
    pub odd: bool,
    pub leap: bool,
    pub non_leap: bool,
}

impl YearFilter {
    fn is_empty(self) -> bool {
        !(self.even || self.odd || self.leap || self.non_leap)
    }

    fn allows(self, date: NaiveDate) -> bool {
        if self.is_empty() {
            return true;
        }
        let year = date.year();
        self.even && year.rem_euclid(2) == 0
            || self.odd && year.rem_euclid(2) == 1
            || self.leap && date.leap_year()
            || self.non_leap && !date.leap_year()
    }
}

/// "every N years since Y". A rule with intervals applies only to years
/// matching at least one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearInterval {
    pub interval: u32,
    pub start_year: i32,
}

impl YearInterval {
    fn allows(self, year: i32) -> bool {
        let elapsed = i64::from(year) - i64::from(self.start_year);
        self.interval > 0 && elapsed >= 0 && elapsed.rem_euclid(i64::from(self.interval)) == 0
    }
}

/// The open date interval a rule is valid in. Absent bounds are
/// unbounded; bounds themselves are excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityWindow {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl ValidityWindow {
    fn contains(self, date: NaiveDate) -> bool {
        self.since.is_none_or(|since| date > since)
            && self.until.is_none_or(|until| date < until)
    }
}

/// A parsed holiday rule. Built once by the parser, never mutated, and
/// evaluated statelessly against any number of default years.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub(crate) date: CalendarDate,
    pub(crate) substitute_check: bool,
    pub(crate) start_time: Option<MinuteOfDay>,
    pub(crate) range_minutes: Option<u32>,
    pub(crate) day_offset: u32,
    pub(crate) day_offset_after: bool,
    pub(crate) shifts: Vec<WeekdayShift>,
    pub(crate) branches: Vec<ConditionalBranch>,
    pub(crate) extras: Vec<ExtraBranch>,
    pub(crate) enabled_weekdays: WeekdaySet,
    pub(crate) disabled_weekdays: WeekdaySet,
    pub(crate) year_filter: YearFilter,
    pub(crate) year_intervals: Vec<YearInterval>,
    pub(crate) validity: ValidityWindow,
}

impl Rule {
    /// A bare rule for the given raw date, with no modifiers.
    #[must_use]
    pub fn new(date: CalendarDate) -> Self {
        Self {
            date,
            substitute_check: false,
            start_time: None,
            range_minutes: None,
            day_offset: 0,
            day_offset_after: true,
            shifts: Vec::new(),
            branches: Vec::new(),
            extras: Vec::new(),
            enabled_weekdays: WeekdaySet::EMPTY,
            disabled_weekdays: WeekdaySet::EMPTY,
            year_filter: YearFilter::default(),
            year_intervals: Vec::new(),
            validity: ValidityWindow::default(),
        }
    }

    /// The raw, unshifted calendar date this rule is anchored on.
    #[must_use]
    pub fn date(&self) -> &CalendarDate {
        &self.date
    }

    /// Attaches a validity window. The rule grammar has no clause for
    /// windows; the holiday-database layer derives them from its own
    /// metadata and attaches them here.
    #[must_use]
    pub fn with_validity(mut self, since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        self.validity = ValidityWindow { since, until };
        self
    }

    /// The holiday's start instant in the given default year, or `None`
    /// when the rule does not apply that year.
    #[must_use]
    pub fn calculate(&self, default_year: i32) -> Option<NaiveDateTime> {
        let raw = self.calculate_raw(default_year)?;
        let shifted = self.apply_offsets(raw)?;
        let adjusted = self.apply_branches(shifted)?;
        tracing::trace!(?adjusted, default_year, "rule resolved before filters");
        Some(adjusted)
            .filter(|dt| self.year_filter.allows(dt.date()))
            .filter(|dt| self.weekdays_allow(dt.date()))
            .filter(|dt| self.intervals_allow(dt.date().year()))
            .filter(|dt| self.validity.contains(dt.date()))
    }

    /// Date-only projection of [`calculate`](Self::calculate).
    #[must_use]
    pub fn calculate_date(&self, default_year: i32) -> Option<NaiveDate> {
        self.calculate(default_year).map(|dt| dt.date())
    }

    /// The holiday's end instant: start plus the rule's range, or 23:59
    /// of the same day when no range is given.
    #[must_use]
    pub fn calculate_end(&self, default_year: i32) -> Option<NaiveDateTime> {
        let start = self.calculate(default_year)?;
        match self.range_minutes {
            Some(minutes) => {
                start.checked_add_signed(chrono::Duration::minutes(i64::from(minutes)))
            }
            None => Some(start.date().and_time(MinuteOfDay::MAX.to_time())),
        }
    }

    /// Date-only projection of [`calculate_end`](Self::calculate_end).
    #[must_use]
    pub fn calculate_date_end(&self, default_year: i32) -> Option<NaiveDate> {
        self.calculate_end(default_year).map(|dt| dt.date())
    }

    /// Auxiliary dates triggered by the weekday of the offset-and-branch
    /// adjusted date, in declaration order. Independent of the year,
    /// weekday, interval, and validity filters.
    #[must_use]
    pub fn calculate_extra(&self, default_year: i32) -> Vec<NaiveDate> {
        let Some(raw) = self.calculate_raw(default_year) else {
            return Vec::new();
        };
        let Some(base) = self.apply_offsets(raw).and_then(|dt| self.apply_branches(dt)) else {
            return Vec::new();
        };
        let weekday = Weekday::from(base.date().weekday());
        self.extras
            .iter()
            .filter(|extra| extra.when.contains(weekday))
            .filter_map(|extra| gregorian::step_weekday(base.date(), extra.weekday, extra.next))
            .collect()
    }

    /// Whether this rule marks a substitute holiday: substitute checking
    /// is on and the raw, unshifted date's weekday is named by some
    /// conditional branch.
    #[must_use]
    pub fn is_substitute(&self, default_year: i32) -> bool {
        if !self.substitute_check {
            return false;
        }
        let Some(raw) = self.calculate_raw(default_year) else {
            return false;
        };
        let weekday = Weekday::from(raw.date().weekday());
        self.branches.iter().any(|branch| branch.when.contains(weekday))
    }

    /// The raw date-time before any offset, branch, or filter: the
    /// resolved calendar date with the rule's start time applied.
    #[must_use]
    pub fn calculate_raw(&self, default_year: i32) -> Option<NaiveDateTime> {
        let resolved = self.date.resolve(default_year)?;
        match self.start_time {
            Some(start) => Some(resolved.date().and_time(start.to_time())),
            None => Some(resolved),
        }
    }

    fn apply_offsets(&self, datetime: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut result = datetime;
        if self.day_offset != 0 {
            let days = i64::from(self.day_offset);
            result = gregorian::shift_days(result, if self.day_offset_after { days } else { -days })?;
        }
        for shift in &self.shifts {
            result = gregorian::shift_weekday(result, shift.weekday, shift.nth, shift.after)?;
        }
        Some(result)
    }

    fn apply_branches(&self, datetime: NaiveDateTime) -> Option<NaiveDateTime> {
        let weekday = Weekday::from(datetime.date().weekday());
        for branch in &self.branches {
            if !branch.when.contains(weekday) {
                continue;
            }
            return match branch.action {
                BranchAction::StartTime(start) => {
                    Some(datetime.date().and_time(start.to_time()))
                }
                BranchAction::Move { weekday, next } => {
                    let moved = gregorian::step_weekday(datetime.date(), weekday, next)?;
                    Some(moved.and_time(datetime.time()))
                }
            };
        }
        Some(datetime)
    }

    fn weekdays_allow(&self, date: NaiveDate) -> bool {
        let weekday = Weekday::from(date.weekday());
        if !self.enabled_weekdays.is_empty() {
            return self.enabled_weekdays.contains(weekday);
        }
        if !self.disabled_weekdays.is_empty() {
            return !self.disabled_weekdays.contains(weekday);
        }
        true
    }

    fn intervals_allow(&self, year: i32) -> bool {
        self.year_intervals.is_empty()
            || self.year_intervals.iter().any(|interval| interval.allows(year))
    }
}
