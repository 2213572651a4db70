//! Domain models for operations-service.

mod department;
mod employee;
mod faq;
mod invoice;
mod lead;
mod leave_credit;
mod product;
mod reimbursement;

pub use department::{CreateDepartment, Department, UpdateDepartment};
pub use employee::{CreateEmployee, Employee, EmployeeStatus, UpdateEmployee};
pub use faq::{CreateFaq, Faq, UpdateFaq};
pub use invoice::{CreateInvoice, Invoice, InvoiceStatus, UpdateInvoice};
pub use lead::{CreateLead, Lead};
pub use leave_credit::{LeaveCredit, LeaveCreditSource, NewLeaveCredit};
pub use product::{CreateProduct, Product, UpdateProduct};
pub use reimbursement::{
    CreateReimbursement, Reimbursement, ReimbursementStatus, UpdateReimbursement,
};
