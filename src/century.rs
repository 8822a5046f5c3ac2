//! Century policies for two-digit birth years
//!
//! A fiscal code stores only the last two digits of the birth year. Parsing
//! never picks a century; callers that need a full date must say how.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How to expand a two-digit year into a full year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "value")]
pub enum CenturyPolicy {
    /// Always add the given century base (e.g. `1900`)
    Fixed(u16),
    /// Years below the pivot belong to the 2000s, the rest to the 1900s
    Pivot(u8),
    /// The latest year not after the reference year
    NotAfter(u16),
}

impl Default for CenturyPolicy {
    fn default() -> Self {
        CenturyPolicy::Pivot(70)
    }
}

impl CenturyPolicy {
    /// Latest year not after today's year
    pub fn not_after_today() -> Self {
        let year = chrono::Local::now().date_naive().year();
        CenturyPolicy::NotAfter(u16::try_from(year).unwrap_or(u16::MAX))
    }

    /// Expand a two-digit year (0-99).
    ///
    /// `None` when no year ending in `yy` fits the policy: a `NotAfter`
    /// reference earlier than the first such year, or a `Fixed` base whose
    /// expansion overflows.
    pub fn full_year(&self, yy: u8) -> Option<u16> {
        let yy = u16::from(yy % 100);
        match *self {
            CenturyPolicy::Fixed(base) => (base - base % 100).checked_add(yy),
            CenturyPolicy::Pivot(pivot) => {
                if yy < u16::from(pivot) {
                    Some(2000 + yy)
                } else {
                    Some(1900 + yy)
                }
            }
            CenturyPolicy::NotAfter(reference) => {
                let candidate = (reference - reference % 100).checked_add(yy)?;
                if candidate > reference {
                    candidate.checked_sub(100)
                } else {
                    Some(candidate)
                }
            }
        }
    }

    /// Full calendar date, or `None` if the expanded year makes it impossible
    /// (29 February of a non-leap year, or no year for `yy` at all).
    pub fn birth_date(&self, yy: u8, month: u8, day: u8) -> Option<NaiveDate> {
        let year = i32::from(self.full_year(yy)?);
        NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
    }
}
