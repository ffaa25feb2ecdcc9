//! Working-day calendars
//!
//! Resolves a currency code to the set of weekdays on which that currency
//! does not settle, and rolls dates forward past those days.
//!
//! The built-in table closes Saturday and Sunday for every currency except
//! `AED` and `SAR`, which close Friday and Saturday. A calendar file can
//! replace the default set and add or override currencies:
//!
//! ```toml
//! default = ["Sat", "Sun"]
//!
//! [currencies]
//! AED = ["Fri", "Sat"]
//! ILS = ["Fri", "Sat"]
//! ```

use crate::types::SettlementError;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Set of weekdays on which a currency does not settle
pub type ClosedDays = HashSet<Weekday>;

/// On-disk calendar configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CalendarConfig {
    default: Option<Vec<String>>,
    #[serde(default)]
    currencies: HashMap<String, Vec<String>>,
}

/// Per-currency working-day calendar with a default fallback
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingDayCalendar {
    default: ClosedDays,
    currencies: HashMap<String, ClosedDays>,
}

impl Default for WorkingDayCalendar {
    fn default() -> Self {
        let friday_saturday: ClosedDays = [Weekday::Fri, Weekday::Sat].into_iter().collect();

        WorkingDayCalendar {
            default: Self::weekend(),
            currencies: HashMap::from([
                ("AED".to_string(), friday_saturday.clone()),
                ("SAR".to_string(), friday_saturday),
            ]),
        }
    }
}

impl WorkingDayCalendar {
    /// Create a calendar from a default closed-day set and per-currency overrides
    ///
    /// Currency codes are normalised to upper case.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError` if any set closes all seven weekdays, since
    /// no settlement date could ever be found for it.
    pub fn new(
        default: ClosedDays,
        currencies: HashMap<String, ClosedDays>,
    ) -> Result<Self, SettlementError> {
        check_open_days("default", &default)?;

        let mut normalised = HashMap::with_capacity(currencies.len());
        for (currency, closed) in currencies {
            let currency = normalise_currency(&currency);
            check_open_days(&currency, &closed)?;
            if normalised.contains_key(&currency) {
                return Err(duplicate_currency(&currency));
            }
            normalised.insert(currency, closed);
        }

        Ok(WorkingDayCalendar {
            default,
            currencies: normalised,
        })
    }

    /// Parse a calendar from TOML text
    ///
    /// Currencies listed in the text are added on top of the built-in table,
    /// replacing built-in entries with the same code. `default`, when
    /// present, replaces the Saturday/Sunday fallback.
    pub fn from_toml_str(text: &str) -> Result<Self, SettlementError> {
        let config: CalendarConfig = toml::from_str(text)?;
        let builtin = Self::default();

        let default = match config.default {
            Some(names) => parse_weekdays("default", &names)?,
            None => builtin.default,
        };

        let mut currencies = builtin.currencies;
        let mut configured = HashSet::with_capacity(config.currencies.len());
        for (currency, names) in config.currencies {
            let code = normalise_currency(&currency);
            if !configured.insert(code.clone()) {
                return Err(duplicate_currency(&code));
            }
            let closed = parse_weekdays(&currency, &names)?;
            currencies.insert(code, closed);
        }

        Self::new(default, currencies)
    }

    /// Load a calendar from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettlementError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SettlementError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => SettlementError::from(e),
        })?;

        Self::from_toml_str(&text)
    }

    /// Saturday and Sunday
    pub fn weekend() -> ClosedDays {
        [Weekday::Sat, Weekday::Sun].into_iter().collect()
    }

    /// Weekdays on which `currency` does not settle
    ///
    /// Unknown currencies resolve to the default set.
    pub fn non_working_days(&self, currency: &str) -> &ClosedDays {
        self.currencies
            .get(&normalise_currency(currency))
            .unwrap_or(&self.default)
    }

    /// Whether `date` is a settlement day for `currency`
    pub fn is_working_day(&self, currency: &str, date: NaiveDate) -> bool {
        !self.non_working_days(currency).contains(&date.weekday())
    }

    /// First working day for `currency` on or after `date`
    ///
    /// Steps one day at a time and re-checks, so runs of consecutive closed
    /// days are skipped in full. A date that is already a working day is
    /// returned unchanged. Returns `None` only when the step would leave the
    /// representable date range.
    pub fn roll_forward(&self, currency: &str, date: NaiveDate) -> Option<NaiveDate> {
        let closed = self.non_working_days(currency);
        let mut current = date;

        while closed.contains(&current.weekday()) {
            current = current.checked_add_days(Days::new(1))?;
        }

        Some(current)
    }

    /// Currencies with an explicit entry, sorted
    pub fn currencies(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.currencies.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

fn duplicate_currency(code: &str) -> SettlementError {
    SettlementError::calendar(format!(
        "currency '{}' is listed more than once (codes are case-insensitive)",
        code
    ))
}

fn normalise_currency(currency: &str) -> String {
    currency.trim().to_ascii_uppercase()
}

fn check_open_days(name: &str, closed: &ClosedDays) -> Result<(), SettlementError> {
    if closed.len() >= 7 {
        return Err(SettlementError::calendar(format!(
            "'{}' closes every weekday",
            name
        )));
    }
    Ok(())
}

fn parse_weekdays(name: &str, names: &[String]) -> Result<ClosedDays, SettlementError> {
    names
        .iter()
        .map(|day| {
            day.trim().parse::<Weekday>().map_err(|_| {
                SettlementError::calendar(format!("unknown weekday '{}' for '{}'", day, name))
            })
        })
        .collect()
}
