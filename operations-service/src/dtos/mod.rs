//! Request DTOs. Query structs carry camelCase filter fields plus `page` and
//! `perPage`; body structs convert into the model inputs.

pub mod catalog;
pub mod crm;
pub mod faq;
pub mod hr;

pub use catalog::{
    CreateDepartmentRequest, CreateProductRequest, ListDepartmentsQuery, ListProductsQuery,
    UpdateDepartmentRequest, UpdateProductRequest,
};
pub use crm::{
    CreateInvoiceRequest, CreateLeadRequest, ListInvoicesQuery, ListLeadsQuery,
    UpdateInvoiceRequest,
};
pub use faq::{CreateFaqRequest, ListFaqsQuery, UpdateFaqRequest};
pub use hr::{
    AccrualFailure, AccrualRunResponse, CreateEmployeeRequest, CreateLeaveCreditRequest,
    CreateReimbursementRequest, ListEmployeesQuery, ListLeaveCreditsQuery,
    ListReimbursementsQuery, UpdateEmployeeRequest, UpdateReimbursementRequest,
};

use rust_decimal::Decimal;
use validator::ValidationError;

pub(crate) fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(ValidationError::new("positive_amount"));
    }
    Ok(())
}

pub(crate) fn validate_non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        return Err(ValidationError::new("non_negative_amount"));
    }
    Ok(())
}
