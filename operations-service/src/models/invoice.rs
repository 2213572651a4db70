//! Invoice model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::query::{Entity, Filterable, Value};
use sqlx::FromRow;

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Void => "void",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => InvoiceStatus::Sent,
            "paid" => InvoiceStatus::Paid,
            "void" => InvoiceStatus::Void,
            _ => InvoiceStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub organization_id: Option<i64>,
    pub customer_name: String,
    pub status: String,
    pub total: Decimal,
    pub currency: String,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Invoice {
    const TABLE: &'static str = "invoices";
    const COLUMNS: &'static str = "id, invoice_number, organization_id, customer_name, status, total, currency, issued_on, due_on, is_deleted, created_at, updated_at";
    const LABEL: &'static str = "Invoice";
}

impl Filterable for Invoice {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "invoice_number" => Some(self.invoice_number.clone().into()),
            "organization_id" => self.organization_id.map(Value::from),
            "customer_name" => Some(self.customer_name.clone().into()),
            "status" => Some(self.status.clone().into()),
            "is_deleted" => Some(self.is_deleted.into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub invoice_number: String,
    pub organization_id: Option<i64>,
    pub customer_name: String,
    pub total: Decimal,
    pub currency: String,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateInvoice {
    pub customer_name: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub total: Option<Decimal>,
    pub due_on: Option<NaiveDate>,
}
