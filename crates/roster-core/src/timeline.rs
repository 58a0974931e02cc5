//! Date-ranged records and the "active at an instant" rule.
//!
//! Contracts, consultant contracts and consultant roles all carry a start and
//! an optional end. A record is active at `t` iff it has started by `t` and
//! has not yet ended: `start <= t && (end is None || end > t)`.

use chrono::{DateTime, Utc};

/// A record that is valid over a half-open date range `[start, end)`.
pub trait Dated {
  fn start_date(&self) -> DateTime<Utc>;
  fn end_date(&self) -> Option<DateTime<Utc>>;

  fn is_active_at(&self, at: DateTime<Utc>) -> bool {
    is_active(self.start_date(), self.end_date(), at)
  }
}

/// The bare rule, for callers holding dates that are not yet part of a record.
pub fn is_active(
  start: DateTime<Utc>,
  end: Option<DateTime<Utc>>,
  at: DateTime<Utc>,
) -> bool {
  start <= at && end.is_none_or(|end| end > at)
}

/// Pick the active record with the latest start date. When two share a
/// start date the one that comes first in `records` wins.
pub fn latest_active<'a, T, I>(records: I, at: DateTime<Utc>) -> Option<&'a T>
where
  T: Dated + 'a,
  I: IntoIterator<Item = &'a T>,
{
  records
    .into_iter()
    .filter(|r| r.is_active_at(at))
    .fold(None, |best: Option<&T>, r| match best {
      Some(b) if r.start_date() <= b.start_date() => Some(b),
      _ => Some(r),
    })
}
