//! Structured roles.
//!
//! The free-text `role` on a consultant contract is enough for most views.
//! When a consultant also holds a dated [`ConsultantRole`] pointing into the
//! [`Role`] table, that structured name takes precedence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timeline::Dated;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
  pub id:         Uuid,
  pub name:       String,
  pub short_name: String,
  /// Lower is more senior.
  pub priority:   u32,
}

#[derive(Debug, Clone)]
pub struct NewRole {
  pub name:       String,
  pub short_name: String,
  pub priority:   u32,
}

impl NewRole {
  pub fn into_role(self, id: Uuid) -> Role {
    Role {
      id,
      name: self.name,
      short_name: self.short_name,
      priority: self.priority,
    }
  }
}

/// A consultant holding a role over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantRole {
  pub id:            Uuid,
  pub role_id:       Uuid,
  pub consultant_id: Uuid,
  pub start_date:    DateTime<Utc>,
  pub end_date:      Option<DateTime<Utc>>,
}

impl Dated for ConsultantRole {
  fn start_date(&self) -> DateTime<Utc> { self.start_date }
  fn end_date(&self) -> Option<DateTime<Utc>> { self.end_date }
}

#[derive(Debug, Clone)]
pub struct NewConsultantRole {
  pub role_id:       Uuid,
  pub consultant_id: Uuid,
  pub start_date:    DateTime<Utc>,
  pub end_date:      Option<DateTime<Utc>>,
}

impl NewConsultantRole {
  pub fn into_consultant_role(self, id: Uuid) -> ConsultantRole {
    ConsultantRole {
      id,
      role_id: self.role_id,
      consultant_id: self.consultant_id,
      start_date: self.start_date,
      end_date: self.end_date,
    }
  }
}
