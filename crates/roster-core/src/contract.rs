//! Contracts and the consultant-contract join records hanging off them.
//!
//! A [`Contract`] ties a client to any number of consultant assignments. Each
//! assignment is a [`ConsultantContract`] carrying its own role, utilization
//! and date range.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, timeline::Dated};

// ─── Utilization ─────────────────────────────────────────────────────────────

/// Engagement intensity. Serialised as its numeric code (`0` or `1`).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(try_from = "i64", into = "i64")]
#[strum(serialize_all = "snake_case")]
pub enum Utilization {
  FullTime,
  PartTime,
}

impl Utilization {
  pub fn code(self) -> i64 {
    match self {
      Self::FullTime => 0,
      Self::PartTime => 1,
    }
  }
}

impl TryFrom<i64> for Utilization {
  type Error = Error;

  fn try_from(code: i64) -> Result<Self, Self::Error> {
    match code {
      0 => Ok(Self::FullTime),
      1 => Ok(Self::PartTime),
      other => Err(Error::UnknownUtilization(other)),
    }
  }
}

impl From<Utilization> for i64 {
  fn from(u: Utilization) -> Self { u.code() }
}

// ─── Contract ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
  pub id:            Uuid,
  pub contract_name: String,
  pub start_date:    DateTime<Utc>,
  pub end_date:      Option<DateTime<Utc>>,
  pub client_id:     Uuid,
}

impl Dated for Contract {
  fn start_date(&self) -> DateTime<Utc> { self.start_date }
  fn end_date(&self) -> Option<DateTime<Utc>> { self.end_date }
}

/// Input to [`crate::store::ResourceStore::add_contract`].
#[derive(Debug, Clone)]
pub struct NewContract {
  pub contract_name: String,
  pub start_date:    DateTime<Utc>,
  pub end_date:      Option<DateTime<Utc>>,
  pub client_id:     Uuid,
}

impl NewContract {
  pub fn into_contract(self, id: Uuid) -> Contract {
    Contract {
      id,
      contract_name: self.contract_name,
      start_date: self.start_date,
      end_date: self.end_date,
      client_id: self.client_id,
    }
  }
}

/// The client a contract belongs to never changes.
#[derive(Debug, Clone, Default)]
pub struct ContractPatch {
  pub contract_name: Option<String>,
  pub end_date:      Option<DateTime<Utc>>,
}

impl ContractPatch {
  pub fn apply(self, contract: &mut Contract) {
    if let Some(name) = self.contract_name {
      contract.contract_name = name;
    }
    if let Some(end) = self.end_date {
      contract.end_date = Some(end);
    }
  }
}

// ─── ConsultantContract ──────────────────────────────────────────────────────

/// One consultant's assignment within one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantContract {
  pub id:            Uuid,
  pub consultant_id: Uuid,
  pub contract_id:   Uuid,
  /// Free-text label, e.g. "Senior Developer".
  pub role:          String,
  pub utilization:   Utilization,
  pub start_date:    DateTime<Utc>,
  pub end_date:      Option<DateTime<Utc>>,
}

impl Dated for ConsultantContract {
  fn start_date(&self) -> DateTime<Utc> { self.start_date }
  fn end_date(&self) -> Option<DateTime<Utc>> { self.end_date }
}

/// Input to [`crate::store::ResourceStore::add_consultant_contract`].
#[derive(Debug, Clone)]
pub struct NewConsultantContract {
  pub consultant_id: Uuid,
  pub contract_id:   Uuid,
  pub role:          String,
  pub utilization:   Utilization,
  pub start_date:    DateTime<Utc>,
  pub end_date:      Option<DateTime<Utc>>,
}

impl NewConsultantContract {
  pub fn into_consultant_contract(self, id: Uuid) -> ConsultantContract {
    ConsultantContract {
      id,
      consultant_id: self.consultant_id,
      contract_id: self.contract_id,
      role: self.role,
      utilization: self.utilization,
      start_date: self.start_date,
      end_date: self.end_date,
    }
  }
}

/// An amendment to an assignment. `consultant_id` and `contract_id` are not
/// patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsultantContractPatch {
  pub role:        Option<String>,
  pub utilization: Option<Utilization>,
  pub start_date:  Option<DateTime<Utc>>,
  pub end_date:    Option<DateTime<Utc>>,
}

impl ConsultantContractPatch {
  pub fn is_empty(&self) -> bool { self == &Self::default() }

  /// The date range `record` would have once this patch is applied.
  pub fn merged_range(
    &self,
    record: &ConsultantContract,
  ) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
    (
      self.start_date.unwrap_or(record.start_date),
      self.end_date.or(record.end_date),
    )
  }

  pub fn apply(self, record: &mut ConsultantContract) {
    if let Some(role) = self.role {
      record.role = role;
    }
    if let Some(utilization) = self.utilization {
      record.utilization = utilization;
    }
    if let Some(start) = self.start_date {
      record.start_date = start;
    }
    if let Some(end) = self.end_date {
      record.end_date = Some(end);
    }
  }
}
