//! Role resolution and the client/consultant joins.
//!
//! Everything here is a pure function of a [`Snapshot`] and a reference
//! instant. Missing references (a join record pointing at a consultant that
//! is not in the snapshot, say) are skipped or given a placeholder; they are
//! never an error.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
  client::Client,
  consultant::Consultant,
  contract::{ConsultantContract, Contract},
  role::{ConsultantRole, Role},
  snapshot::Snapshot,
  timeline::{Dated as _, latest_active},
};

pub const UNKNOWN_CONSULTANT: &str = "Unknown Consultant";
pub const UNKNOWN_CONTRACT: &str = "Unknown Contract";
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

// ─── Point-in-time role ──────────────────────────────────────────────────────

/// The assignment that defines `consultant_id`'s role at `now`: among their
/// active consultant contracts, the one with the latest start date. Equal
/// start dates resolve to whichever record comes first in the collection.
pub fn current_assignment(
  consultant_id: Uuid,
  consultant_contracts: &[ConsultantContract],
  now: DateTime<Utc>,
) -> Option<&ConsultantContract> {
  latest_active(
    consultant_contracts
      .iter()
      .filter(|cc| cc.consultant_id == consultant_id),
    now,
  )
}

/// The role label of [`current_assignment`], if any.
pub fn current_role(
  consultant_id: Uuid,
  consultant_contracts: &[ConsultantContract],
  now: DateTime<Utc>,
) -> Option<&str> {
  current_assignment(consultant_id, consultant_contracts, now).map(|cc| cc.role.as_str())
}

/// The structured [`Role`] `consultant_id` holds at `now`, chosen by the same
/// latest-start rule. `None` when the consultant has no active
/// [`ConsultantRole`] or it points at an unknown role.
pub fn structured_role<'a>(
  consultant_id: Uuid,
  roles: &'a [Role],
  consultant_roles: &[ConsultantRole],
  now: DateTime<Utc>,
) -> Option<&'a Role> {
  let held = latest_active(
    consultant_roles
      .iter()
      .filter(|cr| cr.consultant_id == consultant_id),
    now,
  )?;
  roles.iter().find(|r| r.id == held.role_id)
}

// ─── Views ───────────────────────────────────────────────────────────────────

/// A consultant engaged with a client through one join record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConsultant {
  pub consultant:          Consultant,
  pub consultant_contract: ConsultantContract,
  /// The structured role name when one is held, otherwise the join record's
  /// own label.
  pub role:                String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsultantWithRole {
  #[serde(flatten)]
  pub consultant: Consultant,
  pub role:       Option<String>,
}

/// A join record enriched for display under its contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractConsultant {
  #[serde(flatten)]
  pub consultant_contract: ConsultantContract,
  pub consultant_name:     String,
  pub years_employed:      u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractEngagements {
  #[serde(flatten)]
  pub contract:    Contract,
  pub consultants: Vec<ContractConsultant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDetail {
  pub client:    Client,
  pub contracts: Vec<ContractEngagements>,
}

/// A join record enriched with the names of the contract and client it sits
/// under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Engagement {
  #[serde(flatten)]
  pub consultant_contract: ConsultantContract,
  pub contract_name:       String,
  pub client_name:         String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsultantDetail {
  pub consultant:  Consultant,
  pub role:        Option<String>,
  pub engagements: Vec<Engagement>,
}

// ─── Joins ───────────────────────────────────────────────────────────────────

impl Snapshot {
  fn client_contract_ids(&self, client_id: Uuid) -> HashSet<Uuid> {
    self
      .contracts
      .iter()
      .filter(|c| c.client_id == client_id)
      .map(|c| c.id)
      .collect()
  }

  /// Join records under any of the client's contracts, in insertion order.
  fn client_consultant_contracts(
    &self,
    client_id: Uuid,
  ) -> impl Iterator<Item = &ConsultantContract> {
    let contract_ids = self.client_contract_ids(client_id);
    self
      .consultant_contracts
      .iter()
      .filter(move |cc| contract_ids.contains(&cc.contract_id))
  }

  fn consultant(&self, id: Uuid) -> Option<&Consultant> {
    self.consultants.iter().find(|c| c.id == id)
  }

  pub fn current_role(&self, consultant_id: Uuid, now: DateTime<Utc>) -> Option<&str> {
    current_role(consultant_id, &self.consultant_contracts, now)
  }

  /// Every consultant engaged with `client_id`, one entry per join record.
  /// Consultants on several of the client's contracts appear several times.
  pub fn client_consultants(
    &self,
    client_id: Uuid,
    now: DateTime<Utc>,
  ) -> Vec<ClientConsultant> {
    self
      .client_consultant_contracts(client_id)
      .filter_map(|cc| {
        let consultant = self.consultant(cc.consultant_id)?;
        let role = structured_role(consultant.id, &self.roles, &self.consultant_roles, now)
          .map(|r| r.name.clone())
          .unwrap_or_else(|| cc.role.clone());
        Some(ClientConsultant {
          consultant: consultant.clone(),
          consultant_contract: cc.clone(),
          role,
        })
      })
      .collect()
  }

  /// [`Self::client_consultants`] restricted to join records active at `now`.
  pub fn active_client_consultants(
    &self,
    client_id: Uuid,
    now: DateTime<Utc>,
  ) -> Vec<ClientConsultant> {
    let mut joined = self.client_consultants(client_id, now);
    joined.retain(|cc| cc.consultant_contract.is_active_at(now));
    joined
  }

  /// [`Self::client_consultants`] with each consultant listed once; the first
  /// join record found for them is the one kept.
  pub fn client_roster(&self, client_id: Uuid, now: DateTime<Utc>) -> Vec<ClientConsultant> {
    let mut seen = HashSet::new();
    let mut joined = self.client_consultants(client_id, now);
    joined.retain(|cc| seen.insert(cc.consultant.id));
    joined
  }

  /// All consultants with their current role. With `client_id`, only those
  /// holding any join record under that client's contracts, in consultant
  /// order.
  pub fn consultants_with_roles(
    &self,
    client_id: Option<Uuid>,
    now: DateTime<Utc>,
  ) -> Vec<ConsultantWithRole> {
    let engaged: Option<HashSet<Uuid>> = client_id.map(|id| {
      self
        .client_consultant_contracts(id)
        .map(|cc| cc.consultant_id)
        .collect()
    });

    self
      .consultants
      .iter()
      .filter(|c| engaged.as_ref().is_none_or(|ids| ids.contains(&c.id)))
      .map(|c| ConsultantWithRole {
        consultant: c.clone(),
        role:       self.current_role(c.id, now).map(str::to_owned),
      })
      .collect()
  }

  /// Consultants holding no join record under the client's contracts — the
  /// candidates for a new assignment.
  pub fn available_consultants(&self, client_id: Uuid) -> Vec<Consultant> {
    let engaged: HashSet<Uuid> = self
      .client_consultant_contracts(client_id)
      .map(|cc| cc.consultant_id)
      .collect();
    self
      .consultants
      .iter()
      .filter(|c| !engaged.contains(&c.id))
      .cloned()
      .collect()
  }

  /// The client with each of its contracts and the consultants under them.
  pub fn client_detail(&self, client_id: Uuid) -> Option<ClientDetail> {
    let client = self.clients.iter().find(|c| c.id == client_id)?.clone();
    let contracts = self
      .contracts
      .iter()
      .filter(|c| c.client_id == client_id)
      .map(|contract| ContractEngagements {
        contract:    contract.clone(),
        consultants: self
          .consultant_contracts
          .iter()
          .filter(|cc| cc.contract_id == contract.id)
          .map(|cc| {
            let consultant = self.consultant(cc.consultant_id);
            ContractConsultant {
              consultant_contract: cc.clone(),
              consultant_name:     consultant
                .map_or_else(|| UNKNOWN_CONSULTANT.to_owned(), |c| c.name.clone()),
              years_employed:      consultant.map_or(0, |c| c.years_employed),
            }
          })
          .collect(),
      })
      .collect();
    Some(ClientDetail { client, contracts })
  }

  /// The consultant, their current role, and every engagement they hold.
  pub fn consultant_detail(
    &self,
    consultant_id: Uuid,
    now: DateTime<Utc>,
  ) -> Option<ConsultantDetail> {
    let consultant = self.consultant(consultant_id)?.clone();
    let engagements = self
      .consultant_contracts
      .iter()
      .filter(|cc| cc.consultant_id == consultant_id)
      .map(|cc| {
        let contract = self.contracts.iter().find(|c| c.id == cc.contract_id);
        let client = contract
          .and_then(|k| self.clients.iter().find(|cl| cl.id == k.client_id));
        Engagement {
          consultant_contract: cc.clone(),
          contract_name:       contract
            .map_or_else(|| UNKNOWN_CONTRACT.to_owned(), |k| k.contract_name.clone()),
          client_name:         client
            .map_or_else(|| UNKNOWN_CLIENT.to_owned(), |cl| cl.name.clone()),
        }
      })
      .collect();
    Some(ConsultantDetail {
      role: self.current_role(consultant_id, now).map(str::to_owned),
      consultant,
      engagements,
    })
  }
}
