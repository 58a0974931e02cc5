//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every table carries an autoincrement `seq` so list queries can return
/// rows in insertion order. Foreign keys enforce that contracts point at
/// clients and assignments point at consultants and contracts. No DELETE is
/// ever issued.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS clients (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    address     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS consultants (
    seq            INTEGER PRIMARY KEY AUTOINCREMENT,
    id             TEXT NOT NULL UNIQUE,
    name           TEXT NOT NULL,
    years_employed INTEGER NOT NULL CHECK (years_employed >= 0)
);

CREATE TABLE IF NOT EXISTS contracts (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    id            TEXT NOT NULL UNIQUE,
    contract_name TEXT NOT NULL,
    start_date    TEXT NOT NULL,   -- RFC 3339 UTC
    end_date      TEXT,
    client_id     TEXT NOT NULL REFERENCES clients(id)
);

CREATE TABLE IF NOT EXISTS consultant_contracts (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    id            TEXT NOT NULL UNIQUE,
    consultant_id TEXT NOT NULL REFERENCES consultants(id),
    contract_id   TEXT NOT NULL REFERENCES contracts(id),
    role          TEXT NOT NULL,
    utilization   INTEGER NOT NULL CHECK (utilization IN (0, 1)),
    start_date    TEXT NOT NULL,
    end_date      TEXT
);

CREATE TABLE IF NOT EXISTS roles (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    id         TEXT NOT NULL UNIQUE,
    name       TEXT NOT NULL,
    short_name TEXT NOT NULL,
    priority   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS consultant_roles (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    id            TEXT NOT NULL UNIQUE,
    role_id       TEXT NOT NULL REFERENCES roles(id),
    consultant_id TEXT NOT NULL REFERENCES consultants(id),
    start_date    TEXT NOT NULL,
    end_date      TEXT
);

CREATE INDEX IF NOT EXISTS contracts_client_idx      ON contracts(client_id);
CREATE INDEX IF NOT EXISTS cc_consultant_idx         ON consultant_contracts(consultant_id);
CREATE INDEX IF NOT EXISTS cc_contract_idx           ON consultant_contracts(contract_id);
CREATE INDEX IF NOT EXISTS consultant_roles_cons_idx ON consultant_roles(consultant_id);

PRAGMA user_version = 1;
";
