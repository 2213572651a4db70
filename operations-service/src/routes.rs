//! HTTP surface of operations-service.

use crate::handlers::{
    self, departments, employees, faqs, invoices, leads, leave_credits, products, reimbursements,
};
use crate::startup::AppState;
use axum::body::Body;
use axum::http::Method;
use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use service_core::endpoint::{build_routes, Endpoint};
use service_core::middleware::metrics::metrics_middleware;
use service_core::middleware::tracing::{make_request_span, request_id_middleware};
use tower_http::trace::TraceLayer;

pub mod capabilities {
    pub const FAQ_READ: &str = "faq:read";
    pub const FAQ_WRITE: &str = "faq:write";
    pub const DEPARTMENT_READ: &str = "department:read";
    pub const DEPARTMENT_WRITE: &str = "department:write";
    pub const PRODUCT_READ: &str = "product:read";
    pub const PRODUCT_WRITE: &str = "product:write";
    pub const LEAD_READ: &str = "lead:read";
    pub const LEAD_WRITE: &str = "lead:write";
    pub const INVOICE_READ: &str = "invoice:read";
    pub const INVOICE_WRITE: &str = "invoice:write";
    pub const EMPLOYEE_READ: &str = "employee:read";
    pub const EMPLOYEE_WRITE: &str = "employee:write";
    pub const LEAVE_READ: &str = "leave:read";
    pub const LEAVE_WRITE: &str = "leave:write";
    pub const LEAVE_ADMIN: &str = "leave:admin";
    pub const REIMBURSEMENT_READ: &str = "reimbursement:read";
    pub const REIMBURSEMENT_WRITE: &str = "reimbursement:write";
}

use capabilities::*;

/// Every route the service exposes, with the capability it requires.
pub fn endpoints() -> Vec<Endpoint<AppState>> {
    vec![
        Endpoint::public(Method::GET, "/health", get(handlers::health_check)),
        Endpoint::public(Method::GET, "/ready", get(handlers::readiness_check)),
        Endpoint::public(Method::GET, "/metrics", get(handlers::metrics_handler)),
        // FAQs
        Endpoint::protected(Method::GET, "/faqs", FAQ_READ, get(faqs::list_faqs)),
        Endpoint::protected(Method::POST, "/faqs", FAQ_WRITE, post(faqs::create_faq)),
        Endpoint::public(Method::GET, "/faqs/published", get(faqs::list_published_faqs)),
        Endpoint::protected(Method::GET, "/faqs/:id", FAQ_READ, get(faqs::get_faq)),
        Endpoint::protected(Method::PATCH, "/faqs/:id", FAQ_WRITE, patch(faqs::update_faq)),
        Endpoint::protected(Method::DELETE, "/faqs/:id", FAQ_WRITE, delete(faqs::delete_faq)),
        Endpoint::protected(
            Method::POST,
            "/faqs/:id/restore",
            FAQ_WRITE,
            post(faqs::restore_faq),
        ),
        // Departments
        Endpoint::protected(
            Method::GET,
            "/departments",
            DEPARTMENT_READ,
            get(departments::list_departments),
        ),
        Endpoint::protected(
            Method::POST,
            "/departments",
            DEPARTMENT_WRITE,
            post(departments::create_department),
        ),
        Endpoint::protected(
            Method::GET,
            "/departments/:id",
            DEPARTMENT_READ,
            get(departments::get_department),
        ),
        Endpoint::protected(
            Method::PATCH,
            "/departments/:id",
            DEPARTMENT_WRITE,
            patch(departments::update_department),
        ),
        Endpoint::protected(
            Method::DELETE,
            "/departments/:id",
            DEPARTMENT_WRITE,
            delete(departments::delete_department),
        ),
        // Products
        Endpoint::protected(Method::GET, "/products", PRODUCT_READ, get(products::list_products)),
        Endpoint::protected(
            Method::POST,
            "/products",
            PRODUCT_WRITE,
            post(products::create_product),
        ),
        Endpoint::protected(
            Method::GET,
            "/products/:id",
            PRODUCT_READ,
            get(products::get_product),
        ),
        Endpoint::protected(
            Method::PATCH,
            "/products/:id",
            PRODUCT_WRITE,
            patch(products::update_product),
        ),
        Endpoint::protected(
            Method::DELETE,
            "/products/:id",
            PRODUCT_WRITE,
            delete(products::delete_product),
        ),
        // Leads
        Endpoint::protected(Method::GET, "/leads", LEAD_READ, get(leads::list_leads)),
        Endpoint::protected(Method::POST, "/leads", LEAD_WRITE, post(leads::create_lead)),
        Endpoint::protected(Method::GET, "/leads/:id", LEAD_READ, get(leads::get_lead)),
        Endpoint::protected(Method::DELETE, "/leads/:id", LEAD_WRITE, delete(leads::delete_lead)),
        // Invoices
        Endpoint::protected(Method::GET, "/invoices", INVOICE_READ, get(invoices::list_invoices)),
        Endpoint::protected(
            Method::POST,
            "/invoices",
            INVOICE_WRITE,
            post(invoices::create_invoice),
        ),
        Endpoint::protected(
            Method::GET,
            "/invoices/:id",
            INVOICE_READ,
            get(invoices::get_invoice),
        ),
        Endpoint::protected(
            Method::PATCH,
            "/invoices/:id",
            INVOICE_WRITE,
            patch(invoices::update_invoice),
        ),
        Endpoint::protected(
            Method::DELETE,
            "/invoices/:id",
            INVOICE_WRITE,
            delete(invoices::delete_invoice),
        ),
        // Employees
        Endpoint::protected(
            Method::GET,
            "/employees",
            EMPLOYEE_READ,
            get(employees::list_employees),
        ),
        Endpoint::protected(
            Method::POST,
            "/employees",
            EMPLOYEE_WRITE,
            post(employees::create_employee),
        ),
        Endpoint::protected(
            Method::GET,
            "/employees/:id",
            EMPLOYEE_READ,
            get(employees::get_employee),
        ),
        Endpoint::protected(
            Method::PATCH,
            "/employees/:id",
            EMPLOYEE_WRITE,
            patch(employees::update_employee),
        ),
        Endpoint::protected(
            Method::DELETE,
            "/employees/:id",
            EMPLOYEE_WRITE,
            delete(employees::delete_employee),
        ),
        // Leave credits
        Endpoint::protected(
            Method::GET,
            "/leave-credits",
            LEAVE_READ,
            get(leave_credits::list_leave_credits),
        ),
        Endpoint::protected(
            Method::POST,
            "/leave-credits",
            LEAVE_WRITE,
            post(leave_credits::create_leave_credit),
        ),
        Endpoint::protected(
            Method::POST,
            "/leave-credits/accrual-runs",
            LEAVE_ADMIN,
            post(leave_credits::run_accrual),
        ),
        Endpoint::protected(
            Method::GET,
            "/leave-credits/:id",
            LEAVE_READ,
            get(leave_credits::get_leave_credit),
        ),
        // Reimbursements
        Endpoint::protected(
            Method::GET,
            "/reimbursements",
            REIMBURSEMENT_READ,
            get(reimbursements::list_reimbursements),
        ),
        Endpoint::protected(
            Method::POST,
            "/reimbursements",
            REIMBURSEMENT_WRITE,
            post(reimbursements::create_reimbursement),
        ),
        Endpoint::protected(
            Method::GET,
            "/reimbursements/:id",
            REIMBURSEMENT_READ,
            get(reimbursements::get_reimbursement),
        ),
        Endpoint::protected(
            Method::PATCH,
            "/reimbursements/:id",
            REIMBURSEMENT_WRITE,
            patch(reimbursements::update_reimbursement),
        ),
    ]
}

/// Full router with metrics, trace and request id layers. The request id
/// layer is outermost so the trace span can pick the id up.
pub fn build_router(state: AppState) -> Router {
    build_routes(endpoints())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
