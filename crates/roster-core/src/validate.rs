//! Coercion and validation of raw form input.
//!
//! The presentation layer hands over strings, numbers and ISO date strings.
//! Each `*Form` type here turns that into the typed input a store or
//! workflow accepts, collecting every violated constraint in one pass.
//!
//! Form fields are held as raw [`Value`]s so that a field of the wrong JSON
//! type is reported as a violation alongside the others instead of failing
//! deserialisation of the whole form.

use std::{fmt, str::FromStr as _};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
  client::{ClientPatch, NewClient},
  consultant::{ConsultantPatch, NewConsultant},
  contract::{ConsultantContractPatch, Utilization},
};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MIN_ADDRESS_LEN: usize = 5;
pub const MIN_ROLE_LEN: usize = 2;
pub const MAX_YEARS_EMPLOYED: i64 = 50;

// ─── Violations ──────────────────────────────────────────────────────────────

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
  pub field:   String,
  pub message: String,
}

/// Every constraint a piece of input failed. Displayed as
/// `field: message; field: message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
  pub fn push(&mut self, field: &str, message: impl Into<String>) {
    self.0.push(Violation { field: field.to_owned(), message: message.into() });
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &Violation> { self.0.iter() }

  /// Whether any violation was recorded against `field`.
  pub fn mentions(&self, field: &str) -> bool {
    self.0.iter().any(|v| v.field == field)
  }

  /// `Ok(value)` if nothing was recorded, otherwise `Err(self)`.
  pub fn into_result<T>(self, value: T) -> Result<T, Self> {
    if self.is_empty() { Ok(value) } else { Err(self) }
  }

  // ── Field coercions ───────────────────────────────────────────────────
  //
  // Each returns `None` after recording a violation. `Null` stands for a
  // missing field.

  pub fn text(&mut self, field: &str, label: &str, value: &Value, min: usize) -> Option<String> {
    let raw = match value {
      Value::Null => "",
      Value::String(s) => s.as_str(),
      _ => {
        self.push(field, format!("{label} must be text"));
        return None;
      }
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      self.push(field, format!("{label} is required"));
      None
    } else if trimmed.chars().count() < min {
      self.push(field, format!("{label} must be at least {min} characters"));
      None
    } else {
      Some(trimmed.to_owned())
    }
  }

  pub fn uuid(&mut self, field: &str, value: &Value) -> Option<Uuid> {
    let parsed = value.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok());
    if parsed.is_none() {
      self.push(field, format!("{value} is not a valid identifier"));
    }
    parsed
  }

  pub fn date(&mut self, field: &str, value: &Value) -> Option<DateTime<Utc>> {
    let parsed = value.as_str().and_then(parse_date);
    if parsed.is_none() {
      self.push(field, format!("{value} is not a valid date"));
    }
    parsed
  }

  /// Accepts `0`/`1`, `"0"`/`"1"`, or the names `full_time`/`part_time`.
  pub fn utilization(&mut self, field: &str, value: &Value) -> Option<Utilization> {
    let parsed = match value {
      Value::Null => {
        self.push(field, "utilization is required");
        return None;
      }
      Value::Number(n) => n.as_i64().and_then(|code| Utilization::try_from(code).ok()),
      Value::String(name) => {
        let name = name.trim();
        match name.parse::<i64>() {
          Ok(code) => Utilization::try_from(code).ok(),
          Err(_) => Utilization::from_str(name).ok(),
        }
      }
      _ => None,
    };
    if parsed.is_none() {
      self.push(field, "utilization must be 0 (full-time) or 1 (part-time)");
    }
    parsed
  }

  /// Accepts a whole number or a string holding one.
  pub fn years_employed(&mut self, field: &str, value: &Value) -> Option<u32> {
    let years = match value {
      Value::Null => {
        self.push(field, "years employed is required");
        return None;
      }
      Value::Number(n) => n.as_i64(),
      Value::String(s) => s.trim().parse::<i64>().ok(),
      _ => None,
    };
    let Some(years) = years else {
      self.push(field, "years employed must be a whole number");
      return None;
    };
    if years < 0 {
      self.push(field, "years employed cannot be negative");
      None
    } else if years > MAX_YEARS_EMPLOYED {
      self.push(field, format!("years employed cannot exceed {MAX_YEARS_EMPLOYED}"));
      None
    } else {
      u32::try_from(years).ok()
    }
  }
}

impl fmt::Display for Violations {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, v) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", v.field, v.message)?;
    }
    Ok(())
  }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` calendar date (taken
/// as midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
  let value = value.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
    return Some(dt.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|dt| dt.and_utc())
}

// ─── Clients ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientForm {
  pub name:        Value,
  pub description: Value,
  pub address:     Value,
}

impl ClientForm {
  pub fn validate(&self) -> Result<NewClient, Violations> {
    let mut v = Violations::default();
    let name = v.text("name", "name", &self.name, MIN_NAME_LEN);
    let description =
      v.text("description", "description", &self.description, MIN_DESCRIPTION_LEN);
    let address = v.text("address", "address", &self.address, MIN_ADDRESS_LEN);
    match (name, description, address) {
      (Some(name), Some(description), Some(address)) => {
        v.into_result(NewClient { name, description, address })
      }
      _ => Err(v),
    }
  }
}

/// An absent (or `null`) field is left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientPatchForm {
  pub name:        Option<Value>,
  pub description: Option<Value>,
  pub address:     Option<Value>,
}

impl ClientPatchForm {
  pub fn validate(&self) -> Result<ClientPatch, Violations> {
    let mut v = Violations::default();
    let patch = ClientPatch {
      name:        self
        .name
        .as_ref()
        .and_then(|s| v.text("name", "name", s, MIN_NAME_LEN)),
      description: self
        .description
        .as_ref()
        .and_then(|s| v.text("description", "description", s, MIN_DESCRIPTION_LEN)),
      address:     self
        .address
        .as_ref()
        .and_then(|s| v.text("address", "address", s, MIN_ADDRESS_LEN)),
    };
    v.into_result(patch)
  }
}

// ─── Consultants ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsultantForm {
  pub name:           Value,
  pub years_employed: Value,
}

impl ConsultantForm {
  pub fn validate(&self) -> Result<NewConsultant, Violations> {
    let mut v = Violations::default();
    let name = v.text("name", "name", &self.name, MIN_NAME_LEN);
    let years = v.years_employed("years_employed", &self.years_employed);
    match (name, years) {
      (Some(name), Some(years_employed)) => {
        v.into_result(NewConsultant { name, years_employed })
      }
      _ => Err(v),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsultantPatchForm {
  pub name:           Option<Value>,
  pub years_employed: Option<Value>,
}

impl ConsultantPatchForm {
  pub fn validate(&self) -> Result<ConsultantPatch, Violations> {
    let mut v = Violations::default();
    let patch = ConsultantPatch {
      name:           self
        .name
        .as_ref()
        .and_then(|s| v.text("name", "name", s, MIN_NAME_LEN)),
      years_employed: self
        .years_employed
        .as_ref()
        .and_then(|y| v.years_employed("years_employed", y)),
    };
    v.into_result(patch)
  }
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// Raw input to the assignment workflow.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssignmentForm {
  pub consultant_id: Value,
  pub client_id:     Value,
  pub role:          Value,
  pub utilization:   Value,
  pub start_date:    Value,
}

/// Typed, shape-checked input to
/// [`crate::workflow::assign_consultant_to_client`]. Whether the referenced
/// consultant and client exist is checked by the workflow itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRequest {
  pub consultant_id: Uuid,
  pub client_id:     Uuid,
  pub role:          String,
  pub utilization:   Utilization,
  pub start_date:    DateTime<Utc>,
}

impl AssignmentForm {
  pub fn validate(&self) -> Result<AssignmentRequest, Violations> {
    let mut v = Violations::default();
    let consultant_id = v.uuid("consultant_id", &self.consultant_id);
    let client_id = v.uuid("client_id", &self.client_id);
    let role = v.text("role", "role", &self.role, MIN_ROLE_LEN);
    let utilization = v.utilization("utilization", &self.utilization);
    let start_date = v.date("start_date", &self.start_date);

    match (consultant_id, client_id, role, utilization, start_date) {
      (
        Some(consultant_id),
        Some(client_id),
        Some(role),
        Some(utilization),
        Some(start_date),
      ) => v.into_result(AssignmentRequest {
        consultant_id,
        client_id,
        role,
        utilization,
        start_date,
      }),
      _ => Err(v),
    }
  }
}

// ─── Amendment ───────────────────────────────────────────────────────────────

/// Raw input to [`crate::workflow::amend_consultant_contract`]. Only field
/// shapes are checked here; the date range is checked by the workflow once
/// the record has been found.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AmendmentForm {
  pub role:        Option<Value>,
  pub utilization: Option<Value>,
  pub start_date:  Option<Value>,
  pub end_date:    Option<Value>,
}

impl AmendmentForm {
  pub fn validate(&self) -> Result<ConsultantContractPatch, Violations> {
    let mut v = Violations::default();
    let patch = ConsultantContractPatch {
      role:        self
        .role
        .as_ref()
        .and_then(|s| v.text("role", "role", s, MIN_ROLE_LEN)),
      utilization: self
        .utilization
        .as_ref()
        .and_then(|u| v.utilization("utilization", u)),
      start_date:  self.start_date.as_ref().and_then(|s| v.date("start_date", s)),
      end_date:    self.end_date.as_ref().and_then(|s| v.date("end_date", s)),
    };
    v.into_result(patch)
  }
}
