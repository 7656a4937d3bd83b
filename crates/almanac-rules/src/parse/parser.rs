//! Recursive-descent parser for rule expressions.

use almanac_cal::EastAsianKind;
use almanac_core::{MinuteOfDay, Weekday, WeekdaySet, ZoneSpec};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{Token, TokenKind, lex};
use crate::months::{HebrewMonth, HijriMonth, gregorian_month_from_name};
use crate::rule::{
    BranchAction, CalendarDate, ConditionalBranch, ExtraBranch, Rule, SexagenaryYear, WeekdayShift,
    YearInterval,
};

/// Parses a rule expression into an immutable [`Rule`].
///
/// ## Errors
///
/// Returns a positioned [`ParseError`]: lexical for characters or words
/// outside the rule language, syntax for grammar violations and
/// out-of-range numeric literals.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn parse(text: &str) -> ParseResult<Rule> {
    tracing::debug!("parsing rule expression");
    let stream = lex(text)?;
    let mut parser = Parser {
        tokens: stream.tokens,
        pos: 0,
        end_line: stream.end_line,
        end_column: stream.end_column,
    };
    let rule = parser.parse_rule()?;
    tracing::debug!("rule expression parsed");
    Ok(rule)
}

/// Direction word following a weekday phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Before,
    After,
    InMonth,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    end_line: usize,
    end_column: usize,
}

impl Parser {
    fn parse_rule(&mut self) -> ParseResult<Rule> {
        let substitute_check = self.take_keyword("substitutes");

        let (date, day_offset, shifts) = self.parse_date_expr()?;
        let start_time = self.parse_time_opt()?;
        let range_minutes = self.parse_duration_opt()?;

        let mut rule = Rule::new(date);
        rule.substitute_check = substitute_check;
        rule.start_time = start_time;
        rule.range_minutes = range_minutes;
        if let Some((days, after)) = day_offset {
            rule.day_offset = days;
            rule.day_offset_after = after;
        }
        rule.shifts = shifts;

        while self.take_keyword("if") {
            rule.branches.push(self.parse_branch()?);
        }
        while self.at_keyword(0, "and") {
            self.advance();
            self.expect_keyword("if")?;
            rule.extras.push(self.parse_extra_branch()?);
        }
        while self.at_keyword(0, "in") {
            self.advance();
            self.parse_year_class(&mut rule)?;
        }
        if self.take_keyword("on") {
            rule.enabled_weekdays = self.parse_weekday_set()?;
        } else if self.at_keyword(0, "not") {
            self.advance();
            self.expect_keyword("on")?;
            rule.disabled_weekdays = self.parse_weekday_set()?;
        }
        while self.take_keyword("every") {
            rule.year_intervals.push(self.parse_year_interval()?);
        }

        if let Some(token) = self.peek() {
            return Err(ParseError::unexpected(
                token.line,
                token.column,
                "end of rule",
                &token_text(token),
            ));
        }
        Ok(rule)
    }

    // ---- date expression -------------------------------------------------

    fn parse_date_expr(
        &mut self,
    ) -> ParseResult<(CalendarDate, Option<(u32, bool)>, Vec<WeekdayShift>)> {
        let mut day_offset: Option<(u32, bool)> = None;
        let mut prefixes: Vec<WeekdayShift> = Vec::new();

        let date = loop {
            // "<N> days before|after" prefix.
            if matches!(self.kind(0), Some(TokenKind::Number(_)))
                && (self.at_keyword(1, "day") || self.at_keyword(1, "days"))
            {
                let (days, line, column) = self.expect_number("a day count")?;
                self.advance(); // "day"/"days"
                let after = self.expect_direction_word()?;
                if day_offset.is_some() {
                    return Err(ParseError::unexpected(
                        line,
                        column,
                        "a single day offset",
                        "a second day offset",
                    ));
                }
                day_offset = Some((days, after));
                continue;
            }

            // "[Nth] <weekday> before|after|in" phrase.
            if self.at_weekday_phrase() {
                let (nth, nth_pos) = match self.kind(0) {
                    Some(&TokenKind::Ordinal(n)) => {
                        let token = self.advance();
                        (n, (token.line, token.column))
                    }
                    _ => {
                        let (line, column) = self.position();
                        (1, (line, column))
                    }
                };
                let weekday = self.expect_weekday()?;
                let direction = self.expect_phrase_direction()?;

                match direction {
                    Direction::InMonth => {
                        let (month, _) = self.expect_month_name()?;
                        break self.checked_date(nth_pos, || {
                            CalendarDate::nth_weekday(None, month, weekday, nth, false)
                        })?;
                    }
                    Direction::Before if self.at_bare_month_name() => {
                        let (month, _) = self.expect_month_name()?;
                        break self.checked_date(nth_pos, || {
                            CalendarDate::nth_weekday(None, month, weekday, nth, true)
                        })?;
                    }
                    Direction::Before | Direction::After => {
                        if nth > 100 {
                            return Err(ParseError::out_of_range(
                                nth_pos.0,
                                nth_pos.1,
                                "weekday shift count",
                                i64::from(nth),
                            ));
                        }
                        if prefixes.len() == 2 {
                            return Err(ParseError::unexpected(
                                nth_pos.0,
                                nth_pos.1,
                                "at most two weekday shifts",
                                "a third weekday shift",
                            ));
                        }
                        prefixes.push(WeekdayShift {
                            weekday,
                            nth,
                            after: direction == Direction::After,
                        });
                        continue;
                    }
                }
            }

            break self.parse_base_literal()?;
        };

        // The prefix nearest the base date applies first.
        prefixes.reverse();
        Ok((date, day_offset, prefixes))
    }

    /// Whether the cursor sits on `[Nth] <weekday> before|after|in`.
    fn at_weekday_phrase(&self) -> bool {
        match self.kind(0) {
            Some(TokenKind::Ordinal(_)) => true,
            Some(TokenKind::Word(word)) => {
                Weekday::from_name(word).is_some()
                    && (self.at_keyword(1, "before")
                        || self.at_keyword(1, "after")
                        || self.at_keyword(1, "in"))
            }
            _ => false,
        }
    }

    /// Whether the cursor sits on a month name used as a bare literal
    /// (not the month of an equinox/solstice phrase).
    fn at_bare_month_name(&self) -> bool {
        match self.kind(0) {
            Some(TokenKind::Word(word)) => {
                gregorian_month_from_name(word).is_some()
                    && !self.at_keyword(1, "equinox")
                    && !self.at_keyword(1, "solstice")
            }
            _ => false,
        }
    }

    fn parse_base_literal(&mut self) -> ParseResult<CalendarDate> {
        let (line, column) = self.position();
        match self.kind(0).cloned() {
            Some(TokenKind::Number(first)) => {
                self.advance();
                match self.kind(0) {
                    Some(TokenKind::Minus) => self.parse_gregorian_numeric(first, line, column),
                    Some(TokenKind::Word(_)) => self.parse_named_month_day(first, line, column),
                    _ => Err(self.unexpected_here("'-' or a month name")),
                }
            }
            Some(TokenKind::Word(word)) => {
                let lower = word.to_ascii_lowercase();
                match lower.as_str() {
                    "easter" | "orthodox" => {
                        self.advance();
                        let offset = self.parse_easter_offset()?;
                        Ok(CalendarDate::easter(None, lower == "orthodox", offset))
                    }
                    "chinese" | "korean" | "vietnamese" => {
                        self.advance();
                        let kind = EastAsianKind::from_name(&lower).unwrap_or(EastAsianKind::Chinese);
                        self.parse_east_asian(kind)
                    }
                    "bengali-revised" => {
                        self.advance();
                        self.parse_bengali(line, column)
                    }
                    _ => {
                        if let Some(month) = gregorian_month_from_name(&word) {
                            self.advance();
                            self.parse_month_led(month, line, column)
                        } else {
                            Err(self.unexpected_here("a date"))
                        }
                    }
                }
            }
            _ => Err(self.unexpected_here("a date")),
        }
    }

    /// `YYYY-MM-DD` or `MM-DD`, the leading number already consumed.
    fn parse_gregorian_numeric(
        &mut self,
        first: u32,
        line: usize,
        column: usize,
    ) -> ParseResult<CalendarDate> {
        self.advance(); // '-'
        let (second, ..) = self.expect_number("a month or day")?;
        if matches!(self.kind(0), Some(TokenKind::Minus))
            && matches!(self.kind(1), Some(TokenKind::Number(_)))
        {
            self.advance();
            let (day, ..) = self.expect_number("a day")?;
            let year = i32::try_from(first).unwrap_or_default();
            self.checked_date((line, column), || {
                CalendarDate::gregorian(Some(year), second, day)
            })
        } else {
            self.checked_date((line, column), || CalendarDate::gregorian(None, first, second))
        }
    }

    /// `<day> <month-name>` for the Hijri and Hebrew calendars, the day
    /// already consumed.
    fn parse_named_month_day(
        &mut self,
        day: u32,
        line: usize,
        column: usize,
    ) -> ParseResult<CalendarDate> {
        let token = self.advance();
        let TokenKind::Word(word) = token.kind else {
            return Err(self.unexpected_here("a month name"));
        };
        if HijriMonth::is_name_prefix(&word) {
            let part = self.advance_word("the rest of the month name")?;
            let full = format!("{word} {part}");
            let month = HijriMonth::from_name(&full).ok_or_else(|| {
                ParseError::unexpected(token.line, token.column, "a Hijri month", &full)
            })?;
            return self.checked_date((line, column), || CalendarDate::hijri(None, month, day));
        }
        if let Some(month) = HijriMonth::from_name(&word) {
            return self.checked_date((line, column), || CalendarDate::hijri(None, month, day));
        }
        if let Some(month) = HebrewMonth::from_name(&word) {
            return self.checked_date((line, column), || CalendarDate::hebrew(None, month, day));
        }
        Err(ParseError::unexpected(
            token.line,
            token.column,
            "a month name",
            &word,
        ))
    }

    /// A month-name-led literal: `march equinox`, `june solstice`, or a
    /// bare month meaning its first day.
    fn parse_month_led(
        &mut self,
        month: u32,
        line: usize,
        column: usize,
    ) -> ParseResult<CalendarDate> {
        if self.at_keyword(0, "equinox") {
            self.advance();
            let zone = self.parse_zone_opt()?;
            return self.checked_date((line, column), || CalendarDate::equinox(None, month, zone));
        }
        if self.at_keyword(0, "solstice") {
            self.advance();
            let zone = self.parse_zone_opt()?;
            return self.checked_date((line, column), || CalendarDate::solstice(None, month, zone));
        }
        self.checked_date((line, column), || CalendarDate::gregorian(None, month, 1))
    }

    /// Signed day offset after `easter`/`orthodox`. A bare number is an
    /// offset only when it is not the hour of a start time.
    fn parse_easter_offset(&mut self) -> ParseResult<i32> {
        match self.kind(0) {
            Some(TokenKind::Plus) => {
                self.advance();
                let (n, ..) = self.expect_number("an offset")?;
                Ok(i32::try_from(n).unwrap_or_default())
            }
            Some(TokenKind::Minus) => {
                self.advance();
                let (n, ..) = self.expect_number("an offset")?;
                Ok(-i32::try_from(n).unwrap_or_default())
            }
            Some(&TokenKind::Number(n)) if !matches!(self.kind(1), Some(TokenKind::Colon)) => {
                self.advance();
                Ok(i32::try_from(n).unwrap_or_default())
            }
            _ => Ok(0),
        }
    }

    /// Dash-separated number body of an East-Asian date, with an
    /// optional trailing `solarterm`.
    fn parse_east_asian(&mut self, kind: EastAsianKind) -> ParseResult<CalendarDate> {
        let mut numbers = vec![self.expect_number("a date component")?];
        while matches!(self.kind(0), Some(TokenKind::Minus))
            && matches!(self.kind(1), Some(TokenKind::Number(_)))
        {
            self.advance();
            numbers.push(self.expect_number("a date component")?);
        }
        let solar_term = self.take_keyword("solarterm");

        let cycle_of = |numbers: &[(u32, usize, usize)]| -> ParseResult<SexagenaryYear> {
            let (cycle, ..) = numbers[0];
            let (year_of_cycle, line, column) = numbers[1];
            if !(1..=60).contains(&year_of_cycle) {
                return Err(ParseError::out_of_range(
                    line,
                    column,
                    "year of cycle",
                    i64::from(year_of_cycle),
                ));
            }
            Ok(SexagenaryYear {
                cycle: i32::try_from(cycle).unwrap_or_default(),
                year_of_cycle,
            })
        };

        if solar_term {
            let (cycle, rest) = match numbers.len() {
                2 => (None, &numbers[..]),
                4 => (Some(cycle_of(&numbers)?), &numbers[2..]),
                _ => {
                    let (_, line, column) = numbers[0];
                    return Err(ParseError::unexpected(
                        line,
                        column,
                        "term-day or cycle-year-term-day",
                        "a different field count",
                    ));
                }
            };
            let (term, line, column) = rest[0];
            if !(1..=24).contains(&term) {
                return Err(ParseError::out_of_range(line, column, "solar term", i64::from(term)));
            }
            let (term_day, line, column) = rest[1];
            if !(1..=15).contains(&term_day) {
                return Err(ParseError::out_of_range(
                    line,
                    column,
                    "solar term day",
                    i64::from(term_day),
                ));
            }
            return self.checked_date((line, column), || {
                CalendarDate::east_asian_solar_term(kind, cycle, term, term_day)
            });
        }

        let (cycle, rest) = match numbers.len() {
            3 => (None, &numbers[..]),
            5 => (Some(cycle_of(&numbers)?), &numbers[2..]),
            _ => {
                let (_, line, column) = numbers[0];
                return Err(ParseError::unexpected(
                    line,
                    column,
                    "month-leap-day or cycle-year-month-leap-day",
                    "a different field count",
                ));
            }
        };
        let (month, line, column) = rest[0];
        if !(1..=12).contains(&month) {
            return Err(ParseError::out_of_range(line, column, "month", i64::from(month)));
        }
        let (leap, line, column) = rest[1];
        if leap > 1 {
            return Err(ParseError::out_of_range(line, column, "leap flag", i64::from(leap)));
        }
        let (day, line, column) = rest[2];
        if day > 30 {
            return Err(ParseError::out_of_range(line, column, "day", i64::from(day)));
        }
        self.checked_date((line, column), || {
            CalendarDate::east_asian_lunar(kind, cycle, month, leap == 1, day)
        })
    }

    /// `[year-]month-day` body of a `bengali-revised` literal.
    fn parse_bengali(&mut self, line: usize, column: usize) -> ParseResult<CalendarDate> {
        let mut numbers = vec![self.expect_number("a date component")?];
        while matches!(self.kind(0), Some(TokenKind::Minus))
            && matches!(self.kind(1), Some(TokenKind::Number(_)))
        {
            self.advance();
            numbers.push(self.expect_number("a date component")?);
        }
        match numbers.len() {
            2 => self.checked_date((line, column), || {
                CalendarDate::bengali_revised(None, numbers[0].0, numbers[1].0)
            }),
            3 => {
                let year = i32::try_from(numbers[0].0).unwrap_or_default();
                self.checked_date((line, column), || {
                    CalendarDate::bengali_revised(Some(year), numbers[1].0, numbers[2].0)
                })
            }
            _ => Err(ParseError::unexpected(
                line,
                column,
                "month-day or year-month-day",
                "a different field count",
            )),
        }
    }

    /// Optional `in <zone>` clause of an astronomical literal. Consumed
    /// only when what follows `in` is zone-shaped, so `in even years`
    /// stays available to the filter clauses.
    fn parse_zone_opt(&mut self) -> ParseResult<ZoneSpec> {
        if !self.at_keyword(0, "in") {
            return Ok(ZoneSpec::default());
        }
        match self.kind(1) {
            Some(TokenKind::Plus | TokenKind::Minus) => {
                self.advance(); // "in"
                let negative = matches!(self.advance().kind, TokenKind::Minus);
                let (hours, line, column) = self.expect_number("offset hours")?;
                self.expect_colon()?;
                let (minutes, ..) = self.expect_number("offset minutes")?;
                ZoneSpec::from_offset(negative, hours, minutes).ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::InvalidLiteral,
                        line,
                        column,
                        format!("invalid zone offset: {hours}:{minutes:02}"),
                    )
                })
            }
            Some(TokenKind::Word(word))
                if word.contains('/')
                    || word.eq_ignore_ascii_case("gmt")
                    || word.eq_ignore_ascii_case("utc") =>
            {
                self.advance(); // "in"
                let token = self.advance();
                let TokenKind::Word(name) = token.kind else {
                    return Err(self.unexpected_here("a zone name"));
                };
                ZoneSpec::from_name(&name).ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::InvalidLiteral,
                        token.line,
                        token.column,
                        format!("unknown timezone: {name}"),
                    )
                })
            }
            _ => Ok(ZoneSpec::default()),
        }
    }

    // ---- time, duration, clauses ----------------------------------------

    fn parse_time_opt(&mut self) -> ParseResult<Option<MinuteOfDay>> {
        if matches!(self.kind(0), Some(TokenKind::Number(_)))
            && matches!(self.kind(1), Some(TokenKind::Colon))
        {
            let (hour, line, column) = self.expect_number("an hour")?;
            self.expect_colon()?;
            let (minute, ..) = self.expect_number("a minute")?;
            let time = MinuteOfDay::from_hm(hour, minute).ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::InvalidLiteral,
                    line,
                    column,
                    format!("invalid time: {hour}:{minute:02}"),
                )
            })?;
            return Ok(Some(time));
        }
        Ok(None)
    }

    fn parse_duration_opt(&mut self) -> ParseResult<Option<u32>> {
        let Some(TokenKind::Word(word)) = self.kind(0) else {
            return Ok(None);
        };
        if !word.chars().next().is_some_and(|c| c.eq_ignore_ascii_case(&'p')) {
            return Ok(None);
        }
        let token = self.advance();
        let TokenKind::Word(word) = token.kind else {
            return Err(self.unexpected_here("a duration"));
        };
        duration_minutes(&word).map(Some).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::InvalidLiteral,
                token.line,
                token.column,
                format!("invalid duration: {word}"),
            )
        })
    }

    /// `<weekday-set> then (<time> | next|previous <weekday>)`, the `if`
    /// already consumed.
    fn parse_branch(&mut self) -> ParseResult<ConditionalBranch> {
        let when = self.parse_weekday_set()?;
        self.expect_keyword("then")?;
        if matches!(self.kind(0), Some(TokenKind::Number(_)))
            && matches!(self.kind(1), Some(TokenKind::Colon))
        {
            let time = self.parse_time_opt()?.ok_or_else(|| self.unexpected_here("a time"))?;
            return Ok(ConditionalBranch {
                when,
                action: BranchAction::StartTime(time),
            });
        }
        let (weekday, next) = self.parse_move_target()?;
        Ok(ConditionalBranch {
            when,
            action: BranchAction::Move { weekday, next },
        })
    }

    /// `<weekday-set> then next|previous <weekday>`, the `and if` already
    /// consumed.
    fn parse_extra_branch(&mut self) -> ParseResult<ExtraBranch> {
        let when = self.parse_weekday_set()?;
        self.expect_keyword("then")?;
        let (weekday, next) = self.parse_move_target()?;
        Ok(ExtraBranch { when, weekday, next })
    }

    fn parse_move_target(&mut self) -> ParseResult<(Weekday, bool)> {
        let next = if self.take_keyword("next") {
            true
        } else if self.take_keyword("previous") {
            false
        } else {
            return Err(self.unexpected_here("'next' or 'previous'"));
        };
        let weekday = self.expect_weekday()?;
        Ok((weekday, next))
    }

    /// `even|odd|leap|non-leap years`, the `in` already consumed.
    fn parse_year_class(&mut self, rule: &mut Rule) -> ParseResult<()> {
        let (line, column) = self.position();
        let token = self.advance_word("a year class")?;
        match token.to_ascii_lowercase().as_str() {
            "even" => rule.year_filter.even = true,
            "odd" => rule.year_filter.odd = true,
            "leap" => rule.year_filter.leap = true,
            "non-leap" => rule.year_filter.non_leap = true,
            other => {
                return Err(ParseError::unexpected(line, column, "a year class", other));
            }
        }
        if !self.take_keyword("years") && !self.take_keyword("year") {
            return Err(self.unexpected_here("'years'"));
        }
        Ok(())
    }

    /// `<interval> years since <year>`, the `every` already consumed.
    fn parse_year_interval(&mut self) -> ParseResult<YearInterval> {
        let (interval, line, column) = self.expect_number("an interval")?;
        if interval == 0 {
            return Err(ParseError::out_of_range(line, column, "interval", 0));
        }
        if !self.take_keyword("years") && !self.take_keyword("year") {
            return Err(self.unexpected_here("'years'"));
        }
        self.expect_keyword("since")?;
        let (start, ..) = self.expect_number("a start year")?;
        Ok(YearInterval {
            interval,
            start_year: i32::try_from(start).unwrap_or_default(),
        })
    }

    fn parse_weekday_set(&mut self) -> ParseResult<WeekdaySet> {
        let mut set = WeekdaySet::EMPTY;
        loop {
            set.insert(self.expect_weekday()?);
            if matches!(self.kind(0), Some(TokenKind::Comma)) {
                self.advance();
            } else {
                return Ok(set);
            }
        }
    }

    // ---- token helpers ---------------------------------------------------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn kind(&self, ahead: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + ahead).map(|t| &t.kind)
    }

    /// Consumes and returns the current token. Callers must have peeked.
    fn advance(&mut self) -> Token {
        let token = self.tokens.get(self.pos).cloned().unwrap_or(Token {
            kind: TokenKind::Comma,
            line: self.end_line,
            column: self.end_column,
        });
        self.pos += 1;
        token
    }

    fn position(&self) -> (usize, usize) {
        self.peek()
            .map_or((self.end_line, self.end_column), |t| (t.line, t.column))
    }

    fn at_keyword(&self, ahead: usize, keyword: &str) -> bool {
        matches!(self.kind(ahead), Some(TokenKind::Word(w)) if w.eq_ignore_ascii_case(keyword))
    }

    fn take_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(0, keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        if self.take_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected_here(&format!("'{keyword}'")))
        }
    }

    fn expect_colon(&mut self) -> ParseResult<()> {
        if matches!(self.kind(0), Some(TokenKind::Colon)) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected_here("':'"))
        }
    }

    fn expect_number(&mut self, what: &str) -> ParseResult<(u32, usize, usize)> {
        match self.kind(0) {
            Some(&TokenKind::Number(n)) => {
                let token = self.advance();
                Ok((n, token.line, token.column))
            }
            _ => Err(self.unexpected_here(what)),
        }
    }

    fn expect_weekday(&mut self) -> ParseResult<Weekday> {
        match self.kind(0) {
            Some(TokenKind::Word(w)) => {
                if let Some(weekday) = Weekday::from_name(w) {
                    self.advance();
                    Ok(weekday)
                } else {
                    Err(self.unexpected_here("a weekday"))
                }
            }
            _ => Err(self.unexpected_here("a weekday")),
        }
    }

    /// `before`/`after` of a day-offset prefix.
    fn expect_direction_word(&mut self) -> ParseResult<bool> {
        if self.take_keyword("after") {
            Ok(true)
        } else if self.take_keyword("before") {
            Ok(false)
        } else {
            Err(self.unexpected_here("'before' or 'after'"))
        }
    }

    /// `before`/`after`/`in` of a weekday phrase.
    fn expect_phrase_direction(&mut self) -> ParseResult<Direction> {
        if self.take_keyword("after") {
            Ok(Direction::After)
        } else if self.take_keyword("before") {
            Ok(Direction::Before)
        } else if self.take_keyword("in") {
            Ok(Direction::InMonth)
        } else {
            Err(self.unexpected_here("'before', 'after', or 'in'"))
        }
    }

    fn expect_month_name(&mut self) -> ParseResult<(u32, (usize, usize))> {
        let (line, column) = self.position();
        match self.kind(0) {
            Some(TokenKind::Word(w)) => {
                if let Some(month) = gregorian_month_from_name(w) {
                    self.advance();
                    Ok((month, (line, column)))
                } else {
                    Err(self.unexpected_here("a month name"))
                }
            }
            _ => Err(self.unexpected_here("a month name")),
        }
    }

    fn advance_word(&mut self, what: &str) -> ParseResult<String> {
        match self.kind(0).cloned() {
            Some(TokenKind::Word(word)) => {
                self.advance();
                Ok(word)
            }
            _ => Err(self.unexpected_here(what)),
        }
    }

    /// Runs a checked `CalendarDate` constructor, reporting any field
    /// error at the given position.
    fn checked_date(
        &self,
        (line, column): (usize, usize),
        build: impl FnOnce() -> Result<CalendarDate, crate::rule::DateFieldError>,
    ) -> ParseResult<CalendarDate> {
        build().map_err(|e| ParseError::out_of_range(line, column, e.field, e.value))
    }

    fn unexpected_here(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => {
                ParseError::unexpected(token.line, token.column, expected, &token_text(token))
            }
            None => ParseError::new(
                ParseErrorKind::UnexpectedEof,
                self.end_line,
                self.end_column,
                format!("expected {expected}"),
            ),
        }
    }
}

fn token_text(token: &Token) -> String {
    match &token.kind {
        TokenKind::Number(n) => n.to_string(),
        TokenKind::Ordinal(n) => {
            let suffix = match (n % 100, n % 10) {
                (11..=13, _) => "th",
                (_, 1) => "st",
                (_, 2) => "nd",
                (_, 3) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
        TokenKind::Word(w) => w.clone(),
        TokenKind::Plus => "+".into(),
        TokenKind::Minus => "-".into(),
        TokenKind::Colon => ":".into(),
        TokenKind::Comma => ",".into(),
    }
}

/// Parses an ISO-8601-style `P[nD][T[nH][nM]]` duration into minutes.
fn duration_minutes(word: &str) -> Option<u32> {
    let mut chars = word.chars().peekable();
    chars.next()?; // 'P'

    let mut total: u32 = 0;
    let mut in_time = false;
    let mut saw_component = false;
    while let Some(&c) = chars.peek() {
        if c.eq_ignore_ascii_case(&'t') {
            if in_time {
                return None;
            }
            in_time = true;
            chars.next();
            continue;
        }
        let mut digits = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() {
                digits.push(d);
                chars.next();
            } else {
                break;
            }
        }
        let value: u32 = digits.parse().ok()?;
        let unit = chars.next()?;
        let minutes = match unit.to_ascii_lowercase() {
            'd' if !in_time => value.checked_mul(24 * 60)?,
            'h' if in_time => value.checked_mul(60)?,
            'm' if in_time => value,
            _ => return None,
        };
        total = total.checked_add(minutes)?;
        saw_component = true;
    }
    saw_component.then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(duration_minutes("P0DT0H0M"), Some(0));
        assert_eq!(duration_minutes("PT5H"), Some(300));
        assert_eq!(duration_minutes("P1DT12H"), Some(2160));
        assert_eq!(duration_minutes("P3D"), Some(4320));
        assert_eq!(duration_minutes("PT5M"), Some(5));
        assert_eq!(duration_minutes("P"), None);
        assert_eq!(duration_minutes("P5M"), None); // months unsupported
        assert_eq!(duration_minutes("PT3W"), None);
    }

    #[test]
    fn parses_a_bare_gregorian_date() {
        let rule = parse("2021-05-01").unwrap();
        assert_eq!(
            *rule.date(),
            CalendarDate::Gregorian {
                year: Some(2021),
                month: 5,
                day: 1
            }
        );
    }

    #[test]
    fn solar_term_index_out_of_range_is_a_syntax_error() {
        let err = parse("chinese 25-01 solarterm").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ValueOutOfRange);
        assert!(!err.is_lexical());
        assert_eq!((err.line, err.column), (1, 9));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = parse("easter easter").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn unknown_words_are_lexical() {
        let err = parse("notaword").unwrap_err();
        assert!(err.is_lexical());
    }
}
