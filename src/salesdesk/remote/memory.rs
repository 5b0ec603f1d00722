use super::Remote;
use crate::error::{DeskError, Result};
use crate::model::{Entity, EntityKind, RecordId, SaleView, SelectOption, VIEW_DATE_FORMAT};
use crate::validation::parse_date;
use serde_json::{Map, Value};
use std::cell::Cell;
use std::collections::BTreeMap;
use tracing::debug;

const NAME_MAX_LEN: usize = 100;
const ADDRESS_MAX_LEN: usize = 255;

/// Sale columns holding required foreign keys, with the table they point at.
const SALE_FOREIGN_KEYS: [(&str, EntityKind); 3] = [
    ("customerId", EntityKind::Customers),
    ("productId", EntityKind::Products),
    ("storeId", EntityKind::Stores),
];

#[derive(Debug, Default)]
struct Table {
    last_id: RecordId,
    rows: BTreeMap<RecordId, Map<String, Value>>,
}

/// In-memory backend honouring the same contract as the HTTP server.
///
/// Rows are kept as JSON objects, exactly what would cross the wire.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    tables: BTreeMap<EntityKind, Table>,
    offline: bool,
    requests: Cell<usize>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every request fails as a transport error.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Number of requests received so far, including failed ones.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    /// Removes a row behind the client's back, as another user would.
    pub fn remove_row(&mut self, kind: EntityKind, id: RecordId) -> bool {
        self.table_mut(kind).rows.remove(&id).is_some()
    }

    fn receive(&self, method: &str, kind: EntityKind, path: &str) -> Result<()> {
        self.requests.set(self.requests.get() + 1);
        debug!(method, resource = kind.resource(), path, "in-memory request");
        if self.offline {
            return Err(DeskError::RemoteUnavailable(format!(
                "{} /api/{}{}: connection refused",
                method,
                kind.resource(),
                path
            )));
        }
        Ok(())
    }

    fn table(&self, kind: EntityKind) -> Option<&Table> {
        self.tables.get(&kind)
    }

    fn table_mut(&mut self, kind: EntityKind) -> &mut Table {
        self.tables.entry(kind).or_default()
    }

    fn row(&self, kind: EntityKind, id: RecordId) -> Option<&Map<String, Value>> {
        self.table(kind).and_then(|t| t.rows.get(&id))
    }

    fn name_of(&self, kind: EntityKind, id: Option<RecordId>) -> String {
        id.and_then(|id| self.row(kind, id))
            .and_then(|row| row.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Model checks the server applies before touching its tables.
    fn check_row(&self, kind: EntityKind, row: &Map<String, Value>) -> Result<()> {
        let text_len = |field: &str| row.get(field).and_then(Value::as_str).map(str::len);
        match kind {
            EntityKind::Customers | EntityKind::Stores => {
                check_text(kind, "name", text_len("name"), NAME_MAX_LEN)?;
                check_text(kind, "address", text_len("address"), ADDRESS_MAX_LEN)
            }
            EntityKind::Products => check_text(kind, "name", text_len("name"), NAME_MAX_LEN),
            EntityKind::Sales => {
                for (field, target) in SALE_FOREIGN_KEYS {
                    let id = row.get(field).and_then(Value::as_i64);
                    if id.and_then(|id| self.row(target, id)).is_none() {
                        return Err(DeskError::RemoteValidationRejected(format!(
                            "{} does not refer to an existing {}",
                            field, target
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

fn check_text(kind: EntityKind, field: &str, len: Option<usize>, max: usize) -> Result<()> {
    match len {
        Some(0) | None => Err(DeskError::RemoteValidationRejected(format!(
            "The {} field is required for {}",
            field, kind
        ))),
        Some(n) if n > max => Err(DeskError::RemoteValidationRejected(format!(
            "The field {} must be at most {} characters",
            field, max
        ))),
        Some(_) => Ok(()),
    }
}

fn to_row<E: Entity>(record: &E) -> Result<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(DeskError::Api(format!(
            "{} did not serialize to an object: {}",
            E::KIND,
            other
        ))),
    }
}

fn from_row<E: Entity>(row: &Map<String, Value>) -> Result<E> {
    Ok(serde_json::from_value(Value::Object(row.clone()))?)
}

impl Remote for InMemoryRemote {
    fn list<E: Entity>(&self) -> Result<Vec<E>> {
        self.receive("GET", E::KIND, "")?;
        self.table(E::KIND)
            .map(|t| t.rows.values().map(from_row::<E>).collect::<Result<Vec<E>>>())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn get<E: Entity>(&self, id: RecordId) -> Result<E> {
        self.receive("GET", E::KIND, &format!("/{}", id))?;
        self.row(E::KIND, id)
            .ok_or_else(|| DeskError::not_found(E::KIND, id))
            .and_then(from_row::<E>)
    }

    fn create<E: Entity>(&mut self, record: &E) -> Result<E> {
        self.receive("POST", E::KIND, "")?;
        let mut row = to_row(record)?;
        self.check_row(E::KIND, &row)?;

        let table = self.table_mut(E::KIND);
        table.last_id += 1;
        let id = table.last_id;
        row.insert("id".to_string(), Value::from(id));
        let created = from_row(&row)?;
        table.rows.insert(id, row);
        Ok(created)
    }

    fn update<E: Entity>(&mut self, id: RecordId, record: &E) -> Result<()> {
        self.receive("PUT", E::KIND, &format!("/{}", id))?;
        let row = to_row(record)?;
        if row.get("id").and_then(Value::as_i64) != Some(id) {
            return Err(DeskError::RemoteValidationRejected(format!(
                "Body id does not match /{}",
                id
            )));
        }
        if self.row(E::KIND, id).is_none() {
            return Err(DeskError::not_found(E::KIND, id));
        }
        self.check_row(E::KIND, &row)?;
        self.table_mut(E::KIND).rows.insert(id, row);
        Ok(())
    }

    fn delete<E: Entity>(&mut self, id: RecordId) -> Result<E> {
        self.receive("DELETE", E::KIND, &format!("/{}", id))?;
        let row = self
            .table_mut(E::KIND)
            .rows
            .remove(&id)
            .ok_or_else(|| DeskError::not_found(E::KIND, id))?;

        // Sales require all three parents, so removing a parent removes its sales.
        if let Some((fk, _)) = SALE_FOREIGN_KEYS.iter().find(|(_, k)| *k == E::KIND) {
            self.table_mut(EntityKind::Sales)
                .rows
                .retain(|_, sale| sale.get(*fk).and_then(Value::as_i64) != Some(id));
        }
        from_row(&row)
    }

    fn options(&self, kind: EntityKind) -> Result<Vec<SelectOption>> {
        self.receive("GET", kind, "/options")?;
        if !kind.has_options() {
            return Err(DeskError::RemoteValidationRejected(format!(
                "{} has no options endpoint",
                kind.resource()
            )));
        }
        Ok(self
            .table(kind)
            .map(|t| {
                t.rows
                    .keys()
                    .map(|id| SelectOption::new(*id, self.name_of(kind, Some(*id))))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn sales_view(&self) -> Result<Vec<SaleView>> {
        self.receive("GET", EntityKind::Sales, "/view")?;
        let Some(sales) = self.table(EntityKind::Sales) else {
            return Ok(Vec::new());
        };

        let fk = |row: &Map<String, Value>, field: &str| row.get(field).and_then(Value::as_i64);
        Ok(sales
            .rows
            .iter()
            .map(|(id, row)| SaleView {
                id: *id,
                customer_name: self.name_of(EntityKind::Customers, fk(row, "customerId")),
                product_name: self.name_of(EntityKind::Products, fk(row, "productId")),
                store_name: self.name_of(EntityKind::Stores, fk(row, "storeId")),
                date_sold: row
                    .get("dateSold")
                    .and_then(Value::as_str)
                    .and_then(parse_date)
                    .map(|d| d.format(VIEW_DATE_FORMAT).to_string())
                    .unwrap_or_default(),
            })
            .collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Customer, Product, Sale, Store};
    use chrono::NaiveDate;

    pub struct RemoteFixture {
        pub remote: InMemoryRemote,
    }

    impl Default for RemoteFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RemoteFixture {
        pub fn new() -> Self {
            Self {
                remote: InMemoryRemote::new(),
            }
        }

        pub fn with_customers(mut self, count: usize) -> Self {
            for i in 0..count {
                let customer = Customer::new(format!("Customer {}", i + 1), "1 Main St");
                self.remote.create(&customer).unwrap();
            }
            self
        }

        pub fn with_product(mut self, name: &str, price: f64) -> Self {
            self.remote.create(&Product::new(name, price)).unwrap();
            self
        }

        pub fn with_store(mut self, name: &str) -> Self {
            self.remote.create(&Store::new(name, "9 Queen St")).unwrap();
            self
        }

        /// A sale on 16 Aug 2019 for the given parents.
        pub fn with_sale(mut self, customer: RecordId, product: RecordId, store: RecordId) -> Self {
            let date = NaiveDate::from_ymd_opt(2019, 8, 16)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            self.remote
                .create(&Sale::new(customer, product, store, date))
                .unwrap();
            self
        }
    }
}
