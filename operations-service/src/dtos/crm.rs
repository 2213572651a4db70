//! Lead and invoice DTOs.

use super::validate_non_negative_amount;
use crate::models::{CreateInvoice, CreateLead, InvoiceStatus, UpdateInvoice};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListLeadsQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "perPage must be between 1 and 500"))]
    pub per_page: Option<u32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub organization_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    #[validate(length(min = 1, max = 200, message = "Lead name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub organization_id: Option<i64>,
}

impl From<CreateLeadRequest> for CreateLead {
    fn from(req: CreateLeadRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            organization_id: req.organization_id,
        }
    }
}

/// `leadId` is resolved to the lead's organization before querying.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListInvoicesQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "perPage must be between 1 and 500"))]
    pub per_page: Option<u32>,
    pub invoice_number: Option<String>,
    pub customer_name: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub organization_id: Option<i64>,
    pub lead_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1, max = 64, message = "Invoice number is required"))]
    pub invoice_number: String,
    pub organization_id: Option<i64>,
    #[validate(length(min = 1, max = 200, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub total: Decimal,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter ISO code"))]
    pub currency: String,
    pub issued_on: NaiveDate,
    pub due_on: Option<NaiveDate>,
}

impl From<CreateInvoiceRequest> for CreateInvoice {
    fn from(req: CreateInvoiceRequest) -> Self {
        Self {
            invoice_number: req.invoice_number,
            organization_id: req.organization_id,
            customer_name: req.customer_name,
            total: req.total,
            currency: req.currency.to_uppercase(),
            issued_on: req.issued_on,
            due_on: req.due_on,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    #[validate(length(min = 1, max = 200, message = "Customer name cannot be empty"))]
    pub customer_name: Option<String>,
    pub status: Option<InvoiceStatus>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub total: Option<Decimal>,
    pub due_on: Option<NaiveDate>,
}

impl From<UpdateInvoiceRequest> for UpdateInvoice {
    fn from(req: UpdateInvoiceRequest) -> Self {
        Self {
            customer_name: req.customer_name,
            status: req.status,
            total: req.total,
            due_on: req.due_on,
        }
    }
}
