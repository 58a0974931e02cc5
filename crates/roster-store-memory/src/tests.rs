//! Store behaviour and the assignment workflows against `MemoryStore`.

use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone as _, Utc};
use roster_core::{
  Error as CoreError,
  client::{Client, ClientPatch, NewClient},
  consultant::{Consultant, ConsultantPatch, NewConsultant},
  contract::{
    ConsultantContract, ConsultantContractPatch, Contract, ContractPatch,
    NewConsultantContract, NewContract, Utilization,
  },
  role::{ConsultantRole, NewConsultantRole, NewRole, Role},
  snapshot::Snapshot,
  store::ResourceStore,
  validate::{
    AmendmentForm, AssignmentForm, AssignmentRequest, ClientForm, ConsultantForm,
    ConsultantPatchForm,
  },
  workflow,
};
use uuid::Uuid;

use crate::{Error, MemoryStore};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

async fn client(s: &MemoryStore, name: &str) -> Uuid {
  s.add_client(NewClient {
    name:        name.into(),
    description: "Client created for a test.".into(),
    address:     "1 Test Lane".into(),
  })
  .await
  .unwrap()
  .id
}

async fn consultant(s: &MemoryStore, name: &str) -> Uuid {
  s.add_consultant(NewConsultant { name: name.into(), years_employed: 4 })
    .await
    .unwrap()
    .id
}

fn request(consultant_id: Uuid, client_id: Uuid, role: &str) -> AssignmentRequest {
  AssignmentRequest {
    consultant_id,
    client_id,
    role: role.into(),
    utilization: Utilization::FullTime,
    start_date: day(2024, 1, 1),
  }
}

// ─── Store basics ────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_get_and_list_preserve_insertion_order() {
  let s = MemoryStore::new();
  let a = client(&s, "Acme").await;
  let b = client(&s, "Beta").await;

  let listed: Vec<_> = s.list_clients().await.unwrap().into_iter().map(|c| c.id).collect();
  assert_eq!(listed, vec![a, b]);
  assert_eq!(s.get_client(b).await.unwrap().unwrap().name, "Beta");
  assert!(s.get_client(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_patches_only_supplied_fields() {
  let s = MemoryStore::new();
  let id = client(&s, "Acme").await;

  let updated = s
    .update_client(id, ClientPatch { name: Some("Acme Ltd".into()), ..Default::default() })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.name, "Acme Ltd");
  assert_eq!(updated.address, "1 Test Lane");
  assert_eq!(s.get_client(id).await.unwrap().unwrap(), updated);
}

#[tokio::test]
async fn update_unknown_id_returns_none() {
  let s = MemoryStore::new();
  let out = s.update_client(Uuid::new_v4(), ClientPatch::default()).await.unwrap();
  assert!(out.is_none());
  let out = s
    .update_consultant_contract(Uuid::new_v4(), ConsultantContractPatch::default())
    .await
    .unwrap();
  assert!(out.is_none());
}

#[tokio::test]
async fn contract_for_unknown_client_is_rejected() {
  let s = MemoryStore::new();
  let missing = Uuid::new_v4();
  let err = s
    .add_contract(NewContract {
      contract_name: "Orphan".into(),
      start_date:    day(2024, 1, 1),
      end_date:      None,
      client_id:     missing,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ClientNotFound(id) if id == missing));
  assert!(s.list_contracts().await.unwrap().is_empty());
}

#[tokio::test]
async fn every_operation_waits_for_latency() {
  let s = MemoryStore::new().with_latency(Duration::from_millis(25));
  let started = Instant::now();
  s.list_clients().await.unwrap();
  assert!(started.elapsed() >= Duration::from_millis(25));
}

#[tokio::test]
async fn seeded_store_has_demo_data() {
  let s = MemoryStore::seeded();
  let snap = Snapshot::load(&s).await.unwrap();
  assert_eq!(snap.clients.len(), 4);
  assert_eq!(snap.consultants.len(), 9);
  assert_eq!(snap.contracts.len(), 4);
  assert_eq!(snap.consultant_contracts.len(), 9);
  assert_eq!(snap.roles.len(), 3);
  assert_eq!(snap.consultant_roles.len(), 3);

  let techcorp = &snap.clients[0];
  let roster = snap.client_roster(techcorp.id, day(2024, 6, 1));
  let names: Vec<_> = roster.iter().map(|r| r.consultant.name.as_str()).collect();
  assert_eq!(names, vec!["John Smith", "Sarah Johnson", "Michael Chen"]);
  assert_eq!(roster[1].role, "Project Manager");
}

// ─── Assignment ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_assignment_creates_main_contract() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;

  let out = workflow::assign_consultant_to_client(&s, request(a, c, "Senior Developer"))
    .await
    .unwrap();

  assert!(out.contract_created);
  assert_eq!(out.contract.contract_name, "Acme Main Contract");
  assert_eq!(out.contract.client_id, c);
  assert_eq!(out.contract.start_date, day(2024, 1, 1));
  assert_eq!(out.consultant_contract.consultant_id, a);
  assert_eq!(out.consultant_contract.contract_id, out.contract.id);
  assert_eq!(out.consultant_contract.role, "Senior Developer");
  assert_eq!(out.consultant_contract.utilization, Utilization::FullTime);
  assert_eq!(out.consultant_contract.end_date, None);

  assert_eq!(s.list_contracts().await.unwrap().len(), 1);
  assert_eq!(s.list_consultant_contracts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn second_assignment_reuses_contract() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;
  let b = consultant(&s, "Bob").await;

  let first = workflow::assign_consultant_to_client(&s, request(a, c, "Developer"))
    .await
    .unwrap();
  let second = workflow::assign_consultant_to_client(&s, request(b, c, "Tester"))
    .await
    .unwrap();

  assert!(!second.contract_created);
  assert_eq!(second.contract.id, first.contract.id);
  assert_eq!(s.list_contracts().await.unwrap().len(), 1);
  assert_eq!(s.list_consultant_contracts().await.unwrap().len(), 2);
}

#[tokio::test]
async fn overlapping_first_assignments_share_one_contract() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;
  let b = consultant(&s, "Bob").await;
  let s = s.with_latency(Duration::from_millis(20));

  let (first, second) = tokio::join!(
    workflow::assign_consultant_to_client(&s, request(a, c, "Developer")),
    workflow::assign_consultant_to_client(&s, request(b, c, "Tester")),
  );
  let (first, second) = (first.unwrap(), second.unwrap());

  assert_eq!(first.contract.id, second.contract.id);
  assert!(first.contract_created ^ second.contract_created);
  assert_eq!(s.list_contracts().await.unwrap().len(), 1);
  assert_eq!(s.list_consultant_contracts().await.unwrap().len(), 2);
}

#[tokio::test]
async fn find_or_add_contract_returns_first_for_client() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let contract = |name: &str| NewContract {
    contract_name: name.into(),
    start_date:    day(2024, 1, 1),
    end_date:      None,
    client_id:     c,
  };
  let (made, created) = s.find_or_add_contract(contract("Acme Main Contract")).await.unwrap();
  assert!(created);
  let (found, created) = s.find_or_add_contract(contract("Second")).await.unwrap();
  assert!(!created);
  assert_eq!(found, made);

  let missing = Uuid::new_v4();
  let err = s
    .find_or_add_contract(NewContract { client_id: missing, ..contract("Orphan") })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ClientNotFound(id) if id == missing));
}

#[tokio::test]
async fn assignment_reuses_seeded_contract() {
  let s = MemoryStore::seeded();
  let snap = s.snapshot().unwrap();
  let retail = snap.clients[3].id;
  let k = snap.contracts[3].id;
  let john = snap.consultants[0].id;

  let out = workflow::assign_consultant_to_client(&s, request(john, retail, "Tech Lead"))
    .await
    .unwrap();
  assert_eq!(out.contract.id, k);
  assert_eq!(s.list_contracts().await.unwrap().len(), 4);
}

#[tokio::test]
async fn duplicate_assignment_is_allowed() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;

  workflow::assign_consultant_to_client(&s, request(a, c, "Developer")).await.unwrap();
  workflow::assign_consultant_to_client(&s, request(a, c, "Developer")).await.unwrap();

  let snap = Snapshot::load(&s).await.unwrap();
  assert_eq!(snap.client_consultants(c, day(2024, 6, 1)).len(), 2);
  assert_eq!(snap.client_roster(c, day(2024, 6, 1)).len(), 1);
  assert!(snap.available_consultants(c).is_empty());
}

#[tokio::test]
async fn unknown_consultant_fails_without_mutation() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;

  let err = workflow::assign_consultant_to_client(&s, request(Uuid::new_v4(), c, "Developer"))
    .await
    .unwrap_err();

  let v = err.violations().expect("validation error");
  assert!(v.mentions("consultant_id"));
  assert!(!v.mentions("client_id"));
  assert!(s.list_contracts().await.unwrap().is_empty());
  assert!(s.list_consultant_contracts().await.unwrap().is_empty());
}

#[tokio::test]
async fn both_missing_references_are_reported() {
  let s = MemoryStore::new();
  let err = workflow::assign_consultant_to_client(
    &s,
    request(Uuid::new_v4(), Uuid::new_v4(), "Developer"),
  )
  .await
  .unwrap_err();
  let v = err.violations().unwrap();
  assert_eq!(v.len(), 2);
  assert!(v.mentions("consultant_id") && v.mentions("client_id"));
}

#[tokio::test]
async fn malformed_form_reports_every_field() {
  let s = MemoryStore::new();
  let form = AssignmentForm {
    consultant_id: "x".into(),
    client_id:     "y".into(),
    role:          "a".into(),
    utilization:   7.into(),
    start_date:    "someday".into(),
  };
  let err = workflow::assign_from_form(&s, &form).await.unwrap_err();
  assert!(matches!(&err, CoreError::Validation(v) if v.len() == 5));
}

#[tokio::test]
async fn form_assignment_uses_coerced_values() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;
  let form = AssignmentForm {
    consultant_id: a.to_string().into(),
    client_id:     c.to_string().into(),
    role:          "  Data Engineer ".into(),
    utilization:   "1".into(),
    start_date:    "2024-02-01".into(),
  };
  let out = workflow::assign_from_form(&s, &form).await.unwrap();
  assert_eq!(out.consultant_contract.role, "Data Engineer");
  assert_eq!(out.consultant_contract.utilization, Utilization::PartTime);
  assert_eq!(out.consultant_contract.start_date, day(2024, 2, 1));
}

#[test]
fn fallback_contract_name_uses_raw_id() {
  let id = Uuid::new_v4();
  assert_eq!(workflow::main_contract_name(id, None), format!("Client {id} Contract"));
}

// ─── Amendment ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn amendment_updates_in_place() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;
  let cc = workflow::assign_consultant_to_client(&s, request(a, c, "Developer"))
    .await
    .unwrap()
    .consultant_contract;

  let form = AmendmentForm {
    role: Some("Lead Developer".into()),
    utilization: Some(1.into()),
    end_date: Some("2024-12-31".into()),
    ..Default::default()
  };
  let amended = workflow::amend_from_form(&s, cc.id, &form).await.unwrap().unwrap();

  assert_eq!(amended.id, cc.id);
  assert_eq!(amended.role, "Lead Developer");
  assert_eq!(amended.utilization, Utilization::PartTime);
  assert_eq!(amended.start_date, cc.start_date);
  assert_eq!(amended.end_date, Some(day(2024, 12, 31)));
  assert_eq!(amended.consultant_id, a);
  assert_eq!(s.get_consultant_contract(cc.id).await.unwrap().unwrap(), amended);
}

#[tokio::test]
async fn amendment_with_end_before_existing_start_is_rejected() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;
  let cc = workflow::assign_consultant_to_client(&s, request(a, c, "Developer"))
    .await
    .unwrap()
    .consultant_contract;

  let patch = ConsultantContractPatch { end_date: Some(day(2023, 6, 1)), ..Default::default() };
  let err = workflow::amend_consultant_contract(&s, cc.id, patch).await.unwrap_err();
  assert!(err.violations().unwrap().mentions("end_date"));
  assert_eq!(s.get_consultant_contract(cc.id).await.unwrap().unwrap(), cc);
}

#[tokio::test]
async fn amendment_with_both_dates_inverted_is_rejected() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;
  let cc = workflow::assign_consultant_to_client(&s, request(a, c, "Developer"))
    .await
    .unwrap()
    .consultant_contract;

  let patch = ConsultantContractPatch {
    start_date: Some(day(2024, 5, 1)),
    end_date: Some(day(2024, 4, 1)),
    ..Default::default()
  };
  assert!(workflow::amend_consultant_contract(&s, cc.id, patch).await.is_err());
  assert_eq!(s.get_consultant_contract(cc.id).await.unwrap().unwrap(), cc);
}

#[tokio::test]
async fn amendment_of_unknown_id_is_none() {
  let s = MemoryStore::new();
  let patch = ConsultantContractPatch { role: Some("Anything".into()), ..Default::default() };
  let out = workflow::amend_consultant_contract(&s, Uuid::new_v4(), patch).await.unwrap();
  assert!(out.is_none());
}

#[tokio::test]
async fn amendment_of_unknown_id_is_none_even_with_inverted_dates() {
  let s = MemoryStore::new();
  let patch = ConsultantContractPatch {
    start_date: Some(day(2024, 5, 1)),
    end_date: Some(day(2024, 4, 1)),
    ..Default::default()
  };
  let out = workflow::amend_consultant_contract(&s, Uuid::new_v4(), patch).await.unwrap();
  assert!(out.is_none());

  let form = AmendmentForm {
    start_date: Some("2024-05-01".into()),
    end_date: Some("2024-04-01".into()),
    ..Default::default()
  };
  assert!(workflow::amend_from_form(&s, Uuid::new_v4(), &form).await.unwrap().is_none());
}

#[tokio::test]
async fn amendment_changes_resolved_role() {
  let s = MemoryStore::new();
  let c = client(&s, "Acme").await;
  let a = consultant(&s, "Ann").await;
  let cc = workflow::assign_consultant_to_client(&s, request(a, c, "Developer"))
    .await
    .unwrap()
    .consultant_contract;

  let patch = ConsultantContractPatch { end_date: Some(day(2024, 3, 1)), ..Default::default() };
  workflow::amend_consultant_contract(&s, cc.id, patch).await.unwrap();

  let snap = Snapshot::load(&s).await.unwrap();
  assert_eq!(snap.current_role(a, day(2024, 2, 1)), Some("Developer"));
  assert_eq!(snap.current_role(a, day(2024, 6, 1)), None);
}

// ─── Clients and consultants ─────────────────────────────────────────────────

#[tokio::test]
async fn create_client_validates_before_writing() {
  let s = MemoryStore::new();
  let bad = ClientForm { name: "A".into(), ..Default::default() };
  assert!(workflow::create_client(&s, &bad).await.is_err());
  assert!(s.list_clients().await.unwrap().is_empty());

  let good = ClientForm {
    name:        "Acme".into(),
    description: "Makes everything.".into(),
    address:     "1 Road Runner Way".into(),
  };
  let created = workflow::create_client(&s, &good).await.unwrap();
  assert_eq!(s.get_client(created.id).await.unwrap().unwrap(), created);
}

#[tokio::test]
async fn consultant_create_and_update() {
  let s = MemoryStore::new();
  let created = workflow::create_consultant(
    &s,
    &ConsultantForm { name: "Ann Lee".into(), years_employed: 2.into() },
  )
  .await
  .unwrap();

  let updated = workflow::update_consultant(
    &s,
    created.id,
    &ConsultantPatchForm { name: None, years_employed: Some(3.into()) },
  )
  .await
  .unwrap()
  .unwrap();
  assert_eq!(updated.name, "Ann Lee");
  assert_eq!(updated.years_employed, 3);

  let rejected = workflow::update_consultant(
    &s,
    created.id,
    &ConsultantPatchForm { name: None, years_employed: Some(99.into()) },
  )
  .await;
  assert!(rejected.is_err());

  let missing = workflow::update_consultant(&s, Uuid::new_v4(), &ConsultantPatchForm::default())
    .await
    .unwrap();
  assert!(missing.is_none());
}

// ─── Partial failure ─────────────────────────────────────────────────────────

/// Delegates to a [`MemoryStore`] but refuses every new assignment.
struct RefusingAssignments(MemoryStore);

impl ResourceStore for RefusingAssignments {
  type Error = Error;

  async fn list_clients(&self) -> Result<Vec<Client>, Error> { self.0.list_clients().await }

  async fn get_client(&self, id: Uuid) -> Result<Option<Client>, Error> {
    self.0.get_client(id).await
  }

  async fn add_client(&self, input: NewClient) -> Result<Client, Error> {
    self.0.add_client(input).await
  }

  async fn update_client(&self, id: Uuid, patch: ClientPatch) -> Result<Option<Client>, Error> {
    self.0.update_client(id, patch).await
  }

  async fn list_consultants(&self) -> Result<Vec<Consultant>, Error> {
    self.0.list_consultants().await
  }

  async fn get_consultant(&self, id: Uuid) -> Result<Option<Consultant>, Error> {
    self.0.get_consultant(id).await
  }

  async fn add_consultant(&self, input: NewConsultant) -> Result<Consultant, Error> {
    self.0.add_consultant(input).await
  }

  async fn update_consultant(
    &self,
    id: Uuid,
    patch: ConsultantPatch,
  ) -> Result<Option<Consultant>, Error> {
    self.0.update_consultant(id, patch).await
  }

  async fn list_contracts(&self) -> Result<Vec<Contract>, Error> { self.0.list_contracts().await }

  async fn get_contract(&self, id: Uuid) -> Result<Option<Contract>, Error> {
    self.0.get_contract(id).await
  }

  async fn add_contract(&self, input: NewContract) -> Result<Contract, Error> {
    self.0.add_contract(input).await
  }

  async fn update_contract(
    &self,
    id: Uuid,
    patch: ContractPatch,
  ) -> Result<Option<Contract>, Error> {
    self.0.update_contract(id, patch).await
  }

  async fn find_or_add_contract(&self, input: NewContract) -> Result<(Contract, bool), Error> {
    self.0.find_or_add_contract(input).await
  }

  async fn list_consultant_contracts(&self) -> Result<Vec<ConsultantContract>, Error> {
    self.0.list_consultant_contracts().await
  }

  async fn get_consultant_contract(&self, id: Uuid) -> Result<Option<ConsultantContract>, Error> {
    self.0.get_consultant_contract(id).await
  }

  async fn add_consultant_contract(
    &self,
    input: NewConsultantContract,
  ) -> Result<ConsultantContract, Error> {
    Err(Error::ContractNotFound(input.contract_id))
  }

  async fn update_consultant_contract(
    &self,
    id: Uuid,
    patch: ConsultantContractPatch,
  ) -> Result<Option<ConsultantContract>, Error> {
    self.0.update_consultant_contract(id, patch).await
  }

  async fn list_roles(&self) -> Result<Vec<Role>, Error> { self.0.list_roles().await }

  async fn add_role(&self, input: NewRole) -> Result<Role, Error> { self.0.add_role(input).await }

  async fn list_consultant_roles(&self) -> Result<Vec<ConsultantRole>, Error> {
    self.0.list_consultant_roles().await
  }

  async fn add_consultant_role(&self, input: NewConsultantRole) -> Result<ConsultantRole, Error> {
    self.0.add_consultant_role(input).await
  }
}

#[tokio::test]
async fn failed_assignment_leaves_contract_for_next_assignment() {
  let inner = MemoryStore::new();
  let c = client(&inner, "Acme").await;
  let a = consultant(&inner, "Ann").await;

  let refusing = RefusingAssignments(inner.clone());
  let err = workflow::assign_consultant_to_client(&refusing, request(a, c, "Developer"))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Store(_)));

  let contracts = inner.list_contracts().await.unwrap();
  assert_eq!(contracts.len(), 1);
  assert!(inner.list_consultant_contracts().await.unwrap().is_empty());

  let retry = workflow::assign_consultant_to_client(&inner, request(a, c, "Developer"))
    .await
    .unwrap();
  assert!(!retry.contract_created);
  assert_eq!(retry.contract.id, contracts[0].id);
}
