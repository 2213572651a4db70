//! Employee, leave credit and reimbursement DTOs.

use super::{validate_non_negative_amount, validate_positive_amount};
use crate::jobs::{AccrualSummary, BulkWriteOutcome};
use crate::models::{
    CreateEmployee, CreateReimbursement, EmployeeStatus, LeaveCreditSource, NewLeaveCredit,
    ReimbursementStatus, UpdateEmployee, UpdateReimbursement,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListEmployeesQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "perPage must be between 1 and 500"))]
    pub per_page: Option<u32>,
    pub full_name: Option<String>,
    pub department_id: Option<i64>,
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub department_id: Option<i64>,
    pub status: Option<EmployeeStatus>,
    pub joining_date: NaiveDate,
}

impl From<CreateEmployeeRequest> for CreateEmployee {
    fn from(req: CreateEmployeeRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email.to_lowercase(),
            department_id: req.department_id,
            status: req.status.unwrap_or(EmployeeStatus::Active),
            joining_date: req.joining_date,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 200, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    pub department_id: Option<i64>,
    pub status: Option<EmployeeStatus>,
}

impl From<UpdateEmployeeRequest> for UpdateEmployee {
    fn from(req: UpdateEmployeeRequest) -> Self {
        Self {
            full_name: req.full_name,
            department_id: req.department_id,
            status: req.status,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListLeaveCreditsQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "perPage must be between 1 and 500"))]
    pub per_page: Option<u32>,
    pub employee_id: Option<i64>,
    pub source: Option<LeaveCreditSource>,
}

/// Manual leave credit entered by an administrator.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveCreditRequest {
    pub employee_id: i64,
    #[validate(custom(function = "validate_positive_amount"))]
    pub quantity: Decimal,
    #[validate(length(min = 1, max = 500, message = "Note is required"))]
    pub note: String,
}

impl From<CreateLeaveCreditRequest> for NewLeaveCredit {
    fn from(req: CreateLeaveCreditRequest) -> Self {
        Self {
            employee_id: req.employee_id,
            quantity: req.quantity,
            note: req.note,
            source: LeaveCreditSource::Manual,
            period: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualFailure {
    pub employee_id: i64,
    pub reason: String,
}

/// Summary of an on-demand accrual run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualRunResponse {
    pub run_date: NaiveDate,
    pub period: NaiveDate,
    pub selected: usize,
    pub credited: usize,
    pub already_credited: usize,
    pub failed: usize,
    pub failures: Vec<AccrualFailure>,
}

impl From<AccrualSummary> for AccrualRunResponse {
    fn from(summary: AccrualSummary) -> Self {
        Self {
            run_date: summary.run_date,
            period: summary.period,
            selected: summary.selected(),
            credited: summary.credited(),
            already_credited: summary.already_credited(),
            failed: summary.failed(),
            failures: summary
                .outcomes
                .into_iter()
                .filter_map(|item| match item.outcome {
                    BulkWriteOutcome::Failed { reason } => Some(AccrualFailure {
                        employee_id: item.employee_id,
                        reason,
                    }),
                    _ => None,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListReimbursementsQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "perPage must be between 1 and 500"))]
    pub per_page: Option<u32>,
    pub employee_id: Option<i64>,
    pub status: Option<ReimbursementStatus>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReimbursementRequest {
    pub employee_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter ISO code"))]
    pub currency: String,
}

impl From<CreateReimbursementRequest> for CreateReimbursement {
    fn from(req: CreateReimbursementRequest) -> Self {
        Self {
            employee_id: req.employee_id,
            title: req.title,
            amount: req.amount,
            currency: req.currency.to_uppercase(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReimbursementRequest {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub amount: Option<Decimal>,
    pub status: Option<ReimbursementStatus>,
}

impl From<UpdateReimbursementRequest> for UpdateReimbursement {
    fn from(req: UpdateReimbursementRequest) -> Self {
        Self {
            title: req.title,
            amount: req.amount,
            status: req.status,
        }
    }
}
