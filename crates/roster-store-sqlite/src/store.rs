//! [`SqliteStore`] — the SQLite implementation of [`ResourceStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use roster_core::{
  client::{Client, ClientPatch, NewClient},
  consultant::{Consultant, ConsultantPatch, NewConsultant},
  contract::{
    ConsultantContract, ConsultantContractPatch, Contract, ContractPatch,
    NewConsultantContract, NewContract,
  },
  role::{ConsultantRole, NewConsultantRole, NewRole, Role},
  store::ResourceStore,
};

use crate::{
  Result,
  encode::{
    RawClient, RawConsultant, RawConsultantContract, RawConsultantRole, RawContract, RawRole,
    encode_dt, encode_opt_dt, encode_uuid,
  },
  schema::SCHEMA,
};

type RowMapper<R> = fn(&rusqlite::Row<'_>) -> rusqlite::Result<R>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Every row of `table`, oldest first.
  async fn fetch_all<R: Send + 'static>(
    &self,
    table: &'static str,
    columns: &'static str,
    map: RowMapper<R>,
  ) -> Result<Vec<R>> {
    let sql = format!("SELECT {columns} FROM {table} ORDER BY seq");
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], map)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn fetch_by_id<R: Send + 'static>(
    &self,
    table: &'static str,
    columns: &'static str,
    id: Uuid,
    map: RowMapper<R>,
  ) -> Result<Option<R>> {
    let sql = format!("SELECT {columns} FROM {table} WHERE id = ?1");
    let id_str = encode_uuid(id);
    let row = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params![id_str], map).optional()?)
      })
      .await?;
    Ok(row)
  }

  /// Insert one row; `values` are bound to `columns` in order.
  async fn insert(
    &self,
    table: &'static str,
    columns: &'static str,
    values: Vec<Value>,
  ) -> Result<()> {
    let placeholders = (1..=values.len())
      .map(|i| format!("?{i}"))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})");
    self.execute(sql, values).await
  }

  async fn execute(&self, sql: String, values: Vec<Value>) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn text(s: &str) -> Value { Value::Text(s.to_owned()) }

fn id(id: Uuid) -> Value { Value::Text(encode_uuid(id)) }

// ─── ResourceStore impl ──────────────────────────────────────────────────────

impl ResourceStore for SqliteStore {
  type Error = crate::Error;

  // ── Clients ───────────────────────────────────────────────────────────────

  async fn list_clients(&self) -> Result<Vec<Client>> {
    let raws = self
      .fetch_all("clients", RawClient::COLUMNS, RawClient::from_row)
      .await?;
    raws.into_iter().map(RawClient::into_client).collect()
  }

  async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>> {
    let raw = self
      .fetch_by_id("clients", RawClient::COLUMNS, client_id, RawClient::from_row)
      .await?;
    raw.map(RawClient::into_client).transpose()
  }

  async fn add_client(&self, input: NewClient) -> Result<Client> {
    let client = input.into_client(Uuid::new_v4());
    self
      .insert("clients", RawClient::COLUMNS, vec![
        id(client.id),
        text(&client.name),
        text(&client.description),
        text(&client.address),
      ])
      .await?;
    Ok(client)
  }

  async fn update_client(&self, client_id: Uuid, patch: ClientPatch) -> Result<Option<Client>> {
    let Some(mut client) = self.get_client(client_id).await? else {
      return Ok(None);
    };
    patch.apply(&mut client);
    self
      .execute(
        "UPDATE clients SET name = ?2, description = ?3, address = ?4 WHERE id = ?1".into(),
        vec![
          id(client.id),
          text(&client.name),
          text(&client.description),
          text(&client.address),
        ],
      )
      .await?;
    Ok(Some(client))
  }

  // ── Consultants ───────────────────────────────────────────────────────────

  async fn list_consultants(&self) -> Result<Vec<Consultant>> {
    let raws = self
      .fetch_all("consultants", RawConsultant::COLUMNS, RawConsultant::from_row)
      .await?;
    raws.into_iter().map(RawConsultant::into_consultant).collect()
  }

  async fn get_consultant(&self, consultant_id: Uuid) -> Result<Option<Consultant>> {
    let raw = self
      .fetch_by_id(
        "consultants",
        RawConsultant::COLUMNS,
        consultant_id,
        RawConsultant::from_row,
      )
      .await?;
    raw.map(RawConsultant::into_consultant).transpose()
  }

  async fn add_consultant(&self, input: NewConsultant) -> Result<Consultant> {
    let consultant = input.into_consultant(Uuid::new_v4());
    self
      .insert("consultants", RawConsultant::COLUMNS, vec![
        id(consultant.id),
        text(&consultant.name),
        Value::Integer(i64::from(consultant.years_employed)),
      ])
      .await?;
    Ok(consultant)
  }

  async fn update_consultant(
    &self,
    consultant_id: Uuid,
    patch: ConsultantPatch,
  ) -> Result<Option<Consultant>> {
    let Some(mut consultant) = self.get_consultant(consultant_id).await? else {
      return Ok(None);
    };
    patch.apply(&mut consultant);
    self
      .execute(
        "UPDATE consultants SET name = ?2, years_employed = ?3 WHERE id = ?1".into(),
        vec![
          id(consultant.id),
          text(&consultant.name),
          Value::Integer(i64::from(consultant.years_employed)),
        ],
      )
      .await?;
    Ok(Some(consultant))
  }

  // ── Contracts ─────────────────────────────────────────────────────────────

  async fn list_contracts(&self) -> Result<Vec<Contract>> {
    let raws = self
      .fetch_all("contracts", RawContract::COLUMNS, RawContract::from_row)
      .await?;
    raws.into_iter().map(RawContract::into_contract).collect()
  }

  async fn get_contract(&self, contract_id: Uuid) -> Result<Option<Contract>> {
    let raw = self
      .fetch_by_id("contracts", RawContract::COLUMNS, contract_id, RawContract::from_row)
      .await?;
    raw.map(RawContract::into_contract).transpose()
  }

  async fn add_contract(&self, input: NewContract) -> Result<Contract> {
    let contract = input.into_contract(Uuid::new_v4());
    self
      .insert("contracts", RawContract::COLUMNS, vec![
        id(contract.id),
        text(&contract.contract_name),
        Value::Text(encode_dt(contract.start_date)),
        encode_opt_dt(contract.end_date),
        id(contract.client_id),
      ])
      .await?;
    Ok(contract)
  }

  async fn find_or_add_contract(&self, input: NewContract) -> Result<(Contract, bool)> {
    let contract = input.into_contract(Uuid::new_v4());
    let find = format!(
      "SELECT {} FROM contracts WHERE client_id = ?1 ORDER BY seq LIMIT 1",
      RawContract::COLUMNS
    );
    let insert = format!(
      "INSERT INTO contracts ({}) VALUES (?1, ?2, ?3, ?4, ?5)",
      RawContract::COLUMNS
    );
    let client_id = encode_uuid(contract.client_id);
    let values = vec![
      id(contract.id),
      text(&contract.contract_name),
      Value::Text(encode_dt(contract.start_date)),
      encode_opt_dt(contract.end_date),
      id(contract.client_id),
    ];

    // All calls run on the connection's own thread; the immediate
    // transaction also keeps other connections to the file out.
    let existing = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        let existing = tx
          .query_row(&find, rusqlite::params![client_id], RawContract::from_row)
          .optional()?;
        if existing.is_none() {
          tx.execute(&insert, rusqlite::params_from_iter(values))?;
        }
        tx.commit()?;
        Ok(existing)
      })
      .await?;

    match existing {
      Some(raw) => Ok((raw.into_contract()?, false)),
      None => Ok((contract, true)),
    }
  }

  async fn update_contract(
    &self,
    contract_id: Uuid,
    patch: ContractPatch,
  ) -> Result<Option<Contract>> {
    let Some(mut contract) = self.get_contract(contract_id).await? else {
      return Ok(None);
    };
    patch.apply(&mut contract);
    self
      .execute(
        "UPDATE contracts SET contract_name = ?2, end_date = ?3 WHERE id = ?1".into(),
        vec![
          id(contract.id),
          text(&contract.contract_name),
          encode_opt_dt(contract.end_date),
        ],
      )
      .await?;
    Ok(Some(contract))
  }

  // ── Consultant contracts ──────────────────────────────────────────────────

  async fn list_consultant_contracts(&self) -> Result<Vec<ConsultantContract>> {
    let raws = self
      .fetch_all(
        "consultant_contracts",
        RawConsultantContract::COLUMNS,
        RawConsultantContract::from_row,
      )
      .await?;
    raws
      .into_iter()
      .map(RawConsultantContract::into_consultant_contract)
      .collect()
  }

  async fn get_consultant_contract(&self, cc_id: Uuid) -> Result<Option<ConsultantContract>> {
    let raw = self
      .fetch_by_id(
        "consultant_contracts",
        RawConsultantContract::COLUMNS,
        cc_id,
        RawConsultantContract::from_row,
      )
      .await?;
    raw.map(RawConsultantContract::into_consultant_contract).transpose()
  }

  async fn add_consultant_contract(
    &self,
    input: NewConsultantContract,
  ) -> Result<ConsultantContract> {
    let record = input.into_consultant_contract(Uuid::new_v4());
    self
      .insert("consultant_contracts", RawConsultantContract::COLUMNS, vec![
        id(record.id),
        id(record.consultant_id),
        id(record.contract_id),
        text(&record.role),
        Value::Integer(record.utilization.code()),
        Value::Text(encode_dt(record.start_date)),
        encode_opt_dt(record.end_date),
      ])
      .await?;
    Ok(record)
  }

  async fn update_consultant_contract(
    &self,
    cc_id: Uuid,
    patch: ConsultantContractPatch,
  ) -> Result<Option<ConsultantContract>> {
    let Some(mut record) = self.get_consultant_contract(cc_id).await? else {
      return Ok(None);
    };
    patch.apply(&mut record);
    self
      .execute(
        "UPDATE consultant_contracts
         SET role = ?2, utilization = ?3, start_date = ?4, end_date = ?5
         WHERE id = ?1"
          .into(),
        vec![
          id(record.id),
          text(&record.role),
          Value::Integer(record.utilization.code()),
          Value::Text(encode_dt(record.start_date)),
          encode_opt_dt(record.end_date),
        ],
      )
      .await?;
    tracing::debug!(consultant_contract_id = %record.id, "updated consultant contract");
    Ok(Some(record))
  }

  // ── Roles ─────────────────────────────────────────────────────────────────

  async fn list_roles(&self) -> Result<Vec<Role>> {
    let raws = self
      .fetch_all("roles", RawRole::COLUMNS, RawRole::from_row)
      .await?;
    raws.into_iter().map(RawRole::into_role).collect()
  }

  async fn add_role(&self, input: NewRole) -> Result<Role> {
    let role = input.into_role(Uuid::new_v4());
    self
      .insert("roles", RawRole::COLUMNS, vec![
        id(role.id),
        text(&role.name),
        text(&role.short_name),
        Value::Integer(i64::from(role.priority)),
      ])
      .await?;
    Ok(role)
  }

  async fn list_consultant_roles(&self) -> Result<Vec<ConsultantRole>> {
    let raws = self
      .fetch_all(
        "consultant_roles",
        RawConsultantRole::COLUMNS,
        RawConsultantRole::from_row,
      )
      .await?;
    raws
      .into_iter()
      .map(RawConsultantRole::into_consultant_role)
      .collect()
  }

  async fn add_consultant_role(&self, input: NewConsultantRole) -> Result<ConsultantRole> {
    let record = input.into_consultant_role(Uuid::new_v4());
    self
      .insert("consultant_roles", RawConsultantRole::COLUMNS, vec![
        id(record.id),
        id(record.role_id),
        id(record.consultant_id),
        Value::Text(encode_dt(record.start_date)),
        encode_opt_dt(record.end_date),
      ])
      .await?;
    Ok(record)
  }
}
