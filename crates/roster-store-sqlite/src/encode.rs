//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings. Utilization is stored as its numeric code.

use chrono::{DateTime, Utc};
use roster_core::{
  client::Client,
  consultant::Consultant,
  contract::{ConsultantContract, Contract, Utilization},
  role::{ConsultantRole, Role},
};
use rusqlite::{Row, types::Value};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_opt_dt(dt: Option<DateTime<Utc>>) -> Value {
  dt.map(encode_dt).into()
}

fn decode_opt_dt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

fn decode_u32(n: i64) -> Result<u32> { u32::try_from(n).map_err(|_| Error::OutOfRange(n)) }

// ─── Row types ───────────────────────────────────────────────────────────────
//
// Each `COLUMNS` constant lists the columns `from_row` reads, in order.

/// Raw values read directly from a `clients` row.
pub struct RawClient {
  pub id:          String,
  pub name:        String,
  pub description: String,
  pub address:     String,
}

impl RawClient {
  pub const COLUMNS: &'static str = "id, name, description, address";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      address:     row.get(3)?,
    })
  }

  pub fn into_client(self) -> Result<Client> {
    Ok(Client {
      id:          decode_uuid(&self.id)?,
      name:        self.name,
      description: self.description,
      address:     self.address,
    })
  }
}

/// Raw values read directly from a `consultants` row.
pub struct RawConsultant {
  pub id:             String,
  pub name:           String,
  pub years_employed: i64,
}

impl RawConsultant {
  pub const COLUMNS: &'static str = "id, name, years_employed";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      name:           row.get(1)?,
      years_employed: row.get(2)?,
    })
  }

  pub fn into_consultant(self) -> Result<Consultant> {
    Ok(Consultant {
      id:             decode_uuid(&self.id)?,
      name:           self.name,
      years_employed: decode_u32(self.years_employed)?,
    })
  }
}

/// Raw values read directly from a `contracts` row.
pub struct RawContract {
  pub id:            String,
  pub contract_name: String,
  pub start_date:    String,
  pub end_date:      Option<String>,
  pub client_id:     String,
}

impl RawContract {
  pub const COLUMNS: &'static str = "id, contract_name, start_date, end_date, client_id";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      contract_name: row.get(1)?,
      start_date:    row.get(2)?,
      end_date:      row.get(3)?,
      client_id:     row.get(4)?,
    })
  }

  pub fn into_contract(self) -> Result<Contract> {
    Ok(Contract {
      id:            decode_uuid(&self.id)?,
      contract_name: self.contract_name,
      start_date:    decode_dt(&self.start_date)?,
      end_date:      decode_opt_dt(self.end_date.as_deref())?,
      client_id:     decode_uuid(&self.client_id)?,
    })
  }
}

/// Raw values read directly from a `consultant_contracts` row.
pub struct RawConsultantContract {
  pub id:            String,
  pub consultant_id: String,
  pub contract_id:   String,
  pub role:          String,
  pub utilization:   i64,
  pub start_date:    String,
  pub end_date:      Option<String>,
}

impl RawConsultantContract {
  pub const COLUMNS: &'static str =
    "id, consultant_id, contract_id, role, utilization, start_date, end_date";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      consultant_id: row.get(1)?,
      contract_id:   row.get(2)?,
      role:          row.get(3)?,
      utilization:   row.get(4)?,
      start_date:    row.get(5)?,
      end_date:      row.get(6)?,
    })
  }

  pub fn into_consultant_contract(self) -> Result<ConsultantContract> {
    Ok(ConsultantContract {
      id:            decode_uuid(&self.id)?,
      consultant_id: decode_uuid(&self.consultant_id)?,
      contract_id:   decode_uuid(&self.contract_id)?,
      role:          self.role,
      utilization:   Utilization::try_from(self.utilization)?,
      start_date:    decode_dt(&self.start_date)?,
      end_date:      decode_opt_dt(self.end_date.as_deref())?,
    })
  }
}

/// Raw values read directly from a `roles` row.
pub struct RawRole {
  pub id:         String,
  pub name:       String,
  pub short_name: String,
  pub priority:   i64,
}

impl RawRole {
  pub const COLUMNS: &'static str = "id, name, short_name, priority";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      short_name: row.get(2)?,
      priority:   row.get(3)?,
    })
  }

  pub fn into_role(self) -> Result<Role> {
    Ok(Role {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      short_name: self.short_name,
      priority:   decode_u32(self.priority)?,
    })
  }
}

/// Raw values read directly from a `consultant_roles` row.
pub struct RawConsultantRole {
  pub id:            String,
  pub role_id:       String,
  pub consultant_id: String,
  pub start_date:    String,
  pub end_date:      Option<String>,
}

impl RawConsultantRole {
  pub const COLUMNS: &'static str = "id, role_id, consultant_id, start_date, end_date";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      role_id:       row.get(1)?,
      consultant_id: row.get(2)?,
      start_date:    row.get(3)?,
      end_date:      row.get(4)?,
    })
  }

  pub fn into_consultant_role(self) -> Result<ConsultantRole> {
    Ok(ConsultantRole {
      id:            decode_uuid(&self.id)?,
      role_id:       decode_uuid(&self.role_id)?,
      consultant_id: decode_uuid(&self.consultant_id)?,
      start_date:    decode_dt(&self.start_date)?,
      end_date:      decode_opt_dt(self.end_date.as_deref())?,
    })
  }
}
