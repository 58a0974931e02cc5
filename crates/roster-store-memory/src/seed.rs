//! Demo dataset: four clients, each on one main contract, with nine
//! consultants spread across them.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use roster_core::{
  client::Client,
  consultant::Consultant,
  contract::{ConsultantContract, Contract, Utilization},
  role::{ConsultantRole, Role},
  snapshot::Snapshot,
};

/// Midnight UTC on the given day.
fn day(year: i32, month: u32, d: u32) -> DateTime<Utc> {
  NaiveDate::from_ymd_opt(year, month, d)
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|dt| dt.and_utc())
    .unwrap_or_default()
}

const CLIENTS: [(&str, &str, &str); 4] = [
  (
    "TechCorp Solutions",
    "A leading provider of innovative tech solutions.",
    "123 Tech Street, Silicon Valley, CA",
  ),
  (
    "Global Finance Inc",
    "A global leader in financial services.",
    "456 Finance Ave, New York, NY",
  ),
  (
    "HealthCare Plus",
    "A provider of premium healthcare services.",
    "789 Health Blvd, Chicago, IL",
  ),
  (
    "Retail Dynamics",
    "A major player in the retail industry.",
    "101 Retail Row, Los Angeles, CA",
  ),
];

const CONSULTANTS: [(&str, u32); 9] = [
  ("John Smith", 5),
  ("Sarah Johnson", 3),
  ("Michael Chen", 7),
  ("Emily Davis", 2),
  ("David Wilson", 4),
  ("Lisa Anderson", 6),
  ("James Martinez", 1),
  ("Jennifer Taylor", 8),
  ("Robert Brown", 3),
];

/// `(contract name, start (y, m, d))`, one per client in order.
const CONTRACTS: [(&str, (i32, u32, u32)); 4] = [
  ("TechCorp Main Contract", (2023, 1, 1)),
  ("Global Finance Main Contract", (2023, 2, 1)),
  ("HealthCare Plus Main Contract", (2023, 3, 1)),
  ("Retail Dynamics Main Contract", (2023, 4, 1)),
];

/// `(consultant index, contract index, role, utilization code, start)`.
const ASSIGNMENTS: [(usize, usize, &str, i64, (i32, u32, u32)); 9] = [
  (0, 0, "Senior Developer", 0, (2023, 1, 15)),
  (1, 0, "Project Manager", 0, (2023, 1, 20)),
  (2, 0, "DevOps Engineer", 1, (2023, 2, 10)),
  (3, 1, "Business Analyst", 0, (2023, 2, 15)),
  (4, 1, "Full Stack Developer", 0, (2023, 3, 1)),
  (5, 2, "UX Designer", 0, (2023, 3, 10)),
  (6, 2, "Data Scientist", 1, (2023, 4, 1)),
  (7, 2, "Solution Architect", 0, (2023, 4, 5)),
  (8, 3, "QA Engineer", 0, (2023, 4, 10)),
];

/// `(name, short name, priority)`; role `i` is held by consultant `i`.
const ROLES: [(&str, &str, u32); 3] = [
  ("Senior Developer", "Sr. Dev", 1),
  ("Project Manager", "PM", 2),
  ("DevOps Engineer", "DevOps", 3),
];

/// Build the demo dataset with freshly generated ids.
pub fn demo_dataset() -> Snapshot {
  let clients: Vec<Client> = CLIENTS
    .iter()
    .map(|(name, description, address)| Client {
      id:          Uuid::new_v4(),
      name:        (*name).to_owned(),
      description: (*description).to_owned(),
      address:     (*address).to_owned(),
    })
    .collect();

  let consultants: Vec<Consultant> = CONSULTANTS
    .iter()
    .map(|(name, years)| Consultant {
      id:             Uuid::new_v4(),
      name:           (*name).to_owned(),
      years_employed: *years,
    })
    .collect();

  let contracts: Vec<Contract> = CONTRACTS
    .iter()
    .zip(&clients)
    .map(|((name, (y, m, d)), client)| Contract {
      id:            Uuid::new_v4(),
      contract_name: (*name).to_owned(),
      start_date:    day(*y, *m, *d),
      end_date:      None,
      client_id:     client.id,
    })
    .collect();

  let consultant_contracts = ASSIGNMENTS
    .iter()
    .map(|(who, on, role, code, (y, m, d))| ConsultantContract {
      id:            Uuid::new_v4(),
      consultant_id: consultants[*who].id,
      contract_id:   contracts[*on].id,
      role:          (*role).to_owned(),
      utilization:   Utilization::try_from(*code).unwrap_or(Utilization::FullTime),
      start_date:    day(*y, *m, *d),
      end_date:      None,
    })
    .collect();

  let roles: Vec<Role> = ROLES
    .iter()
    .map(|(name, short_name, priority)| Role {
      id:         Uuid::new_v4(),
      name:       (*name).to_owned(),
      short_name: (*short_name).to_owned(),
      priority:   *priority,
    })
    .collect();

  let consultant_roles = roles
    .iter()
    .zip(ASSIGNMENTS.iter())
    .map(|(role, (who, _, _, _, (y, m, d)))| ConsultantRole {
      id:            Uuid::new_v4(),
      role_id:       role.id,
      consultant_id: consultants[*who].id,
      start_date:    day(*y, *m, *d),
      end_date:      None,
    })
    .collect();

  Snapshot {
    clients,
    consultants,
    contracts,
    consultant_contracts,
    roles,
    consultant_roles,
  }
}
