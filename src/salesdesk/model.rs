use crate::error::{DeskError, Result};
use crate::validation::{parse_date, FieldRule, FormValues, Rule};
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned record identifier. `0` means "not assigned yet".
pub type RecordId = i64;

/// Date format used by the denormalised sales view, e.g. `16 Aug 2019`.
pub const VIEW_DATE_FORMAT: &str = "%d %b %Y";

const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Customers,
    Products,
    Stores,
    Sales,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Customers,
        EntityKind::Products,
        EntityKind::Stores,
        EntityKind::Sales,
    ];

    /// Path segment under `/api`.
    pub fn resource(self) -> &'static str {
        match self {
            EntityKind::Customers => "Customers",
            EntityKind::Products => "Products",
            EntityKind::Stores => "Stores",
            EntityKind::Sales => "Sales",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Customers => "Customer",
            EntityKind::Products => "Product",
            EntityKind::Stores => "Store",
            EntityKind::Sales => "Sale",
        }
    }

    /// Whether the resource serves `/options` for selection widgets.
    pub fn has_options(self) -> bool {
        !matches!(self, EntityKind::Sales)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for EntityKind {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|k| {
                k.resource().eq_ignore_ascii_case(s) || k.singular().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| DeskError::Api(format!("Unknown entity: {}", s)))
    }
}

/// A record type mirrored from one remote resource.
pub trait Entity: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    const KIND: EntityKind;
    /// Form fields and their validation rules, in display order.
    const SCHEMA: &'static [FieldRule];
    /// Table headers matching [`Entity::cells`].
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);

    /// Raw form values for an edit dialog.
    fn to_form(&self) -> FormValues;

    /// Builds an unsaved record (id `0`) from form values that passed validation.
    fn from_form(form: &FormValues) -> Result<Self>;

    fn cells(&self) -> Vec<String>;

    /// Short human label used in messages.
    fn label(&self) -> String;
}

fn is_unassigned(id: &RecordId) -> bool {
    *id == 0
}

fn required<'a>(form: &'a FormValues, field: &str) -> Result<&'a str> {
    form.get(field)
        .ok_or_else(|| DeskError::Api(format!("Missing value for {}", field)))
}

fn parsed<T: FromStr>(form: &FormValues, field: &str) -> Result<T> {
    required(form, field)?
        .parse()
        .map_err(|_| DeskError::Api(format!("Invalid value for {}", field)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: RecordId,
    pub name: String,
    pub address: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
        }
    }
}

impl Entity for Customer {
    const KIND: EntityKind = EntityKind::Customers;
    const SCHEMA: &'static [FieldRule] = &[
        FieldRule::new("name", Rule::RequiredString),
        FieldRule::new("address", Rule::RequiredString),
    ];
    const COLUMNS: &'static [&'static str] = &["Id", "Name", "Address"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("address", &self.address)
    }

    fn from_form(form: &FormValues) -> Result<Self> {
        Ok(Self::new(required(form, "name")?, required(form, "address")?))
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.address.clone()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: RecordId,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price,
        }
    }
}

impl Entity for Product {
    const KIND: EntityKind = EntityKind::Products;
    const SCHEMA: &'static [FieldRule] = &[
        FieldRule::new("name", Rule::RequiredString),
        FieldRule::new("price", Rule::RequiredPositiveNumber),
    ];
    const COLUMNS: &'static [&'static str] = &["Id", "Name", "Price"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("price", self.price.to_string())
    }

    fn from_form(form: &FormValues) -> Result<Self> {
        Ok(Self::new(required(form, "name")?, parsed(form, "price")?))
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format!("${:.2}", self.price),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: RecordId,
    pub name: String,
    pub address: String,
}

impl Store {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
        }
    }
}

impl Entity for Store {
    const KIND: EntityKind = EntityKind::Stores;
    const SCHEMA: &'static [FieldRule] = &[
        FieldRule::new("name", Rule::RequiredString),
        FieldRule::new("address", Rule::RequiredString),
    ];
    const COLUMNS: &'static [&'static str] = &["Id", "Name", "Address"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", &self.name)
            .with("address", &self.address)
    }

    fn from_form(form: &FormValues) -> Result<Self> {
        Ok(Self::new(required(form, "name")?, required(form, "address")?))
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.address.clone()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: RecordId,
    pub customer_id: RecordId,
    pub product_id: RecordId,
    pub store_id: RecordId,
    pub date_sold: NaiveDateTime,
}

impl Sale {
    pub fn new(
        customer_id: RecordId,
        product_id: RecordId,
        store_id: RecordId,
        date_sold: NaiveDateTime,
    ) -> Self {
        Self {
            id: 0,
            customer_id,
            product_id,
            store_id,
            date_sold,
        }
    }
}

impl Entity for Sale {
    const KIND: EntityKind = EntityKind::Sales;
    const SCHEMA: &'static [FieldRule] = &[
        FieldRule::new("customerId", Rule::RequiredInteger),
        FieldRule::new("productId", Rule::RequiredInteger),
        FieldRule::new("storeId", Rule::RequiredInteger),
        FieldRule::new("dateSold", Rule::RequiredDateNotAfter),
    ];
    const COLUMNS: &'static [&'static str] = &["Id", "Customer", "Product", "Store", "Date Sold"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("customerId", self.customer_id.to_string())
            .with("productId", self.product_id.to_string())
            .with("storeId", self.store_id.to_string())
            .with("dateSold", self.date_sold.format(FORM_DATE_FORMAT).to_string())
    }

    fn from_form(form: &FormValues) -> Result<Self> {
        let date_sold = parse_date(required(form, "dateSold")?)
            .ok_or_else(|| DeskError::Api("Invalid value for dateSold".into()))?;
        Ok(Self::new(
            parsed(form, "customerId")?,
            parsed(form, "productId")?,
            parsed(form, "storeId")?,
            date_sold,
        ))
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            format!("#{}", self.customer_id),
            format!("#{}", self.product_id),
            format!("#{}", self.store_id),
            self.date_sold.format(VIEW_DATE_FORMAT).to_string(),
        ]
    }

    fn label(&self) -> String {
        format!("sale on {}", self.date_sold.format(VIEW_DATE_FORMAT))
    }
}

/// Sale row with foreign keys resolved to display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub id: RecordId,
    pub customer_name: String,
    pub product_name: String,
    pub store_name: String,
    pub date_sold: String,
}

impl SaleView {
    pub const COLUMNS: &'static [&'static str] =
        &["Id", "Customer", "Product", "Store", "Date Sold"];

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_name.clone(),
            self.product_name.clone(),
            self.store_name.clone(),
            self.date_sold.clone(),
        ]
    }
}

/// Entry of a selection widget: `key` and `value` are both the record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub key: RecordId,
    pub value: RecordId,
    pub text: String,
}

impl SelectOption {
    pub fn new(id: RecordId, text: impl Into<String>) -> Self {
        Self {
            key: id,
            value: id,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn schema_fields<E: Entity>() -> Vec<&'static str> {
        let mut fields: Vec<_> = E::SCHEMA.iter().map(|r| r.field).collect();
        fields.sort_unstable();
        fields
    }

    fn form_keys<E: Entity>(record: &E) -> Vec<String> {
        record.to_form().iter().map(|(k, _)| k.to_string()).collect()
    }

    #[test]
    fn schema_fields_are_the_form_keys() {
        assert_eq!(
            form_keys(&Customer::new("Alice", "1 Main St")),
            schema_fields::<Customer>()
        );
        assert_eq!(form_keys(&Product::new("Widget", 1.5)), schema_fields::<Product>());
        assert_eq!(
            form_keys(&Store::new("Downtown", "9 Queen St")),
            schema_fields::<Store>()
        );
        assert_eq!(
            form_keys(&Sale::new(1, 2, 3, date(2020, 1, 2))),
            schema_fields::<Sale>()
        );
    }

    #[test]
    fn unsaved_records_omit_the_id() {
        let json = serde_json::to_value(Customer::new("Alice", "1 Main St")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Alice", "address": "1 Main St"}));
    }

    #[test]
    fn sale_uses_camel_case_and_iso_dates() {
        let mut sale = Sale::new(1, 2, 3, date(2019, 8, 16));
        sale.set_id(9);
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 9,
                "customerId": 1,
                "productId": 2,
                "storeId": 3,
                "dateSold": "2019-08-16T00:00:00"
            })
        );

        let back: Sale = serde_json::from_value(json).unwrap();
        assert_eq!(back, sale);
    }

    #[test]
    fn sale_form_trims_the_date() {
        let mut sale = Sale::new(1, 2, 3, date(2019, 8, 16));
        sale.date_sold = sale.date_sold + chrono::Duration::hours(15);
        let form = sale.to_form();
        assert_eq!(form.get("dateSold"), Some("2019-08-16"));
        assert_eq!(form.get("customerId"), Some("1"));
    }

    #[test]
    fn product_from_form_parses_price() {
        let form = FormValues::new().with("name", "Widget").with("price", "2.50");
        let product = Product::from_form(&form).unwrap();
        assert_eq!(product, Product::new("Widget", 2.5));
        assert_eq!(product.cells()[2], "$2.50");
    }

    #[test]
    fn entity_kind_parses_both_forms() {
        assert_eq!("customers".parse::<EntityKind>().unwrap(), EntityKind::Customers);
        assert_eq!("Sale".parse::<EntityKind>().unwrap(), EntityKind::Sales);
        assert!("orders".parse::<EntityKind>().is_err());
        assert!(!EntityKind::Sales.has_options());
        assert!(EntityKind::Stores.has_options());
    }
}
