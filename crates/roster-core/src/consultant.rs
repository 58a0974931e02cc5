//! Consultants — staff members who can be assigned to clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultant {
  pub id:             Uuid,
  pub name:           String,
  pub years_employed: u32,
}

/// Input to [`crate::store::ResourceStore::add_consultant`].
#[derive(Debug, Clone)]
pub struct NewConsultant {
  pub name:           String,
  pub years_employed: u32,
}

impl NewConsultant {
  pub fn into_consultant(self, id: Uuid) -> Consultant {
    Consultant { id, name: self.name, years_employed: self.years_employed }
  }
}

#[derive(Debug, Clone, Default)]
pub struct ConsultantPatch {
  pub name:           Option<String>,
  pub years_employed: Option<u32>,
}

impl ConsultantPatch {
  pub fn apply(self, consultant: &mut Consultant) {
    if let Some(name) = self.name {
      consultant.name = name;
    }
    if let Some(years) = self.years_employed {
      consultant.years_employed = years;
    }
  }
}
