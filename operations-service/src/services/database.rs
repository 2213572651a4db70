//! Database service for operations-service.
//!
//! Listing, lookup by id, soft delete and restore go through the generic
//! [`PgStore`]; the resource-specific inserts and partial updates live here.

use crate::filters::LeadDirectory;
use crate::jobs::{AccrualCandidate, AccrualStore, EligibilityRule};
use crate::models::{
    CreateDepartment, CreateEmployee, CreateFaq, CreateInvoice, CreateLead, CreateProduct,
    CreateReimbursement, Department, Employee, EmployeeStatus, Faq, Invoice, InvoiceStatus, Lead,
    LeaveCredit, NewLeaveCredit, Product, Reimbursement, UpdateDepartment, UpdateEmployee,
    UpdateFaq, UpdateInvoice, UpdateProduct, UpdateReimbursement,
};
use crate::services::metrics::DB_QUERY_DURATION;
use async_trait::async_trait;
use chrono::NaiveDate;
use service_core::error::{AppError, StorageError};
use service_core::query::{Entity, PgStore};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "operations-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Generic list/get/delete access for one entity type.
    pub fn store<E: Entity>(&self) -> PgStore<E> {
        PgStore::new(self.pool.clone())
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // =========================================================================
    // FAQ Operations
    // =========================================================================

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_faq(&self, input: &CreateFaq) -> Result<Faq, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_faq"])
            .start_timer();

        let faq = sqlx::query_as::<_, Faq>(&format!(
            r#"
            INSERT INTO faqs (title, content, category, is_published)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            Faq::COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.category)
        .bind(input.is_published)
        .fetch_one(&self.pool)
        .await?;

        timer.observe_duration();
        info!(faq_id = faq.id, "FAQ created");

        Ok(faq)
    }

    #[instrument(skip(self, input), fields(faq_id = id))]
    pub async fn update_faq(&self, id: i64, input: &UpdateFaq) -> Result<Option<Faq>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_faq"])
            .start_timer();

        let faq = sqlx::query_as::<_, Faq>(&format!(
            r#"
            UPDATE faqs SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                is_published = COALESCE($5, is_published),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {}
            "#,
            Faq::COLUMNS
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.category)
        .bind(input.is_published)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(faq)
    }

    // =========================================================================
    // Catalogue Operations
    // =========================================================================

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_department(
        &self,
        input: &CreateDepartment,
    ) -> Result<Department, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_department"])
            .start_timer();

        let department = sqlx::query_as::<_, Department>(&format!(
            r#"
            INSERT INTO departments (name, description)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            Department::COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        timer.observe_duration();
        info!(department_id = department.id, "Department created");

        Ok(department)
    }

    #[instrument(skip(self, input), fields(department_id = id))]
    pub async fn update_department(
        &self,
        id: i64,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_department"])
            .start_timer();

        let department = sqlx::query_as::<_, Department>(&format!(
            r#"
            UPDATE departments SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {}
            "#,
            Department::COLUMNS
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(department)
    }

    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product(&self, input: &CreateProduct) -> Result<Product, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_product"])
            .start_timer();

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, sku, category, price, currency)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            Product::COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.category)
        .bind(input.price)
        .bind(&input.currency)
        .fetch_one(&self.pool)
        .await?;

        timer.observe_duration();
        info!(product_id = product.id, sku = %product.sku, "Product created");

        Ok(product)
    }

    #[instrument(skip(self, input), fields(product_id = id))]
    pub async fn update_product(
        &self,
        id: i64,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_product"])
            .start_timer();

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {}
            "#,
            Product::COLUMNS
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.price)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(product)
    }

    // =========================================================================
    // CRM Operations
    // =========================================================================

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_lead(&self, input: &CreateLead) -> Result<Lead, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_lead"])
            .start_timer();

        let lead = sqlx::query_as::<_, Lead>(&format!(
            r#"
            INSERT INTO leads (name, email, organization_id)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            Lead::COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.organization_id)
        .fetch_one(&self.pool)
        .await?;

        timer.observe_duration();
        info!(lead_id = lead.id, "Lead created");

        Ok(lead)
    }

    #[instrument(skip(self, input), fields(invoice_number = %input.invoice_number))]
    pub async fn create_invoice(&self, input: &CreateInvoice) -> Result<Invoice, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_invoice"])
            .start_timer();

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            INSERT INTO invoices (invoice_number, organization_id, customer_name, status, total, currency, issued_on, due_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            Invoice::COLUMNS
        ))
        .bind(&input.invoice_number)
        .bind(input.organization_id)
        .bind(&input.customer_name)
        .bind(InvoiceStatus::Draft.as_str())
        .bind(input.total)
        .bind(&input.currency)
        .bind(input.issued_on)
        .bind(input.due_on)
        .fetch_one(&self.pool)
        .await?;

        timer.observe_duration();
        info!(invoice_id = invoice.id, "Invoice created");

        Ok(invoice)
    }

    #[instrument(skip(self, input), fields(invoice_id = id))]
    pub async fn update_invoice(
        &self,
        id: i64,
        input: &UpdateInvoice,
    ) -> Result<Option<Invoice>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_invoice"])
            .start_timer();

        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            UPDATE invoices SET
                customer_name = COALESCE($2, customer_name),
                status = COALESCE($3, status),
                total = COALESCE($4, total),
                due_on = COALESCE($5, due_on),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {}
            "#,
            Invoice::COLUMNS
        ))
        .bind(id)
        .bind(&input.customer_name)
        .bind(input.status.map(|s| s.as_str()))
        .bind(input.total)
        .bind(input.due_on)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(invoice)
    }

    // =========================================================================
    // HR Operations
    // =========================================================================

    #[instrument(skip(self, input))]
    pub async fn create_employee(&self, input: &CreateEmployee) -> Result<Employee, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_employee"])
            .start_timer();

        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (full_name, email, department_id, status, joining_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            Employee::COLUMNS
        ))
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(input.department_id)
        .bind(input.status.as_str())
        .bind(input.joining_date)
        .fetch_one(&self.pool)
        .await?;

        timer.observe_duration();
        info!(employee_id = employee.id, "Employee created");

        Ok(employee)
    }

    #[instrument(skip(self, input), fields(employee_id = id))]
    pub async fn update_employee(
        &self,
        id: i64,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_employee"])
            .start_timer();

        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees SET
                full_name = COALESCE($2, full_name),
                department_id = COALESCE($3, department_id),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {}
            "#,
            Employee::COLUMNS
        ))
        .bind(id)
        .bind(&input.full_name)
        .bind(input.department_id)
        .bind(input.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(employee)
    }

    /// Insert a leave credit without a period.
    #[instrument(skip(self, input), fields(employee_id = input.employee_id))]
    pub async fn create_leave_credit(
        &self,
        input: &NewLeaveCredit,
    ) -> Result<LeaveCredit, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_leave_credit"])
            .start_timer();

        let credit = sqlx::query_as::<_, LeaveCredit>(&format!(
            r#"
            INSERT INTO leave_credits (employee_id, quantity, note, source, period)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            LeaveCredit::COLUMNS
        ))
        .bind(input.employee_id)
        .bind(input.quantity)
        .bind(&input.note)
        .bind(input.source.as_str())
        .bind(input.period)
        .fetch_one(&self.pool)
        .await?;

        timer.observe_duration();
        info!(credit_id = credit.id, source = %credit.source, "Leave credit created");

        Ok(credit)
    }

    #[instrument(skip(self, input), fields(employee_id = input.employee_id))]
    pub async fn create_reimbursement(
        &self,
        input: &CreateReimbursement,
    ) -> Result<Reimbursement, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_reimbursement"])
            .start_timer();

        let reimbursement = sqlx::query_as::<_, Reimbursement>(&format!(
            r#"
            INSERT INTO reimbursements (employee_id, title, amount, currency)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            Reimbursement::COLUMNS
        ))
        .bind(input.employee_id)
        .bind(&input.title)
        .bind(input.amount)
        .bind(&input.currency)
        .fetch_one(&self.pool)
        .await?;

        timer.observe_duration();
        info!(reimbursement_id = reimbursement.id, "Reimbursement created");

        Ok(reimbursement)
    }

    #[instrument(skip(self, input), fields(reimbursement_id = id))]
    pub async fn update_reimbursement(
        &self,
        id: i64,
        input: &UpdateReimbursement,
    ) -> Result<Option<Reimbursement>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_reimbursement"])
            .start_timer();

        let reimbursement = sqlx::query_as::<_, Reimbursement>(&format!(
            r#"
            UPDATE reimbursements SET
                title = COALESCE($2, title),
                amount = COALESCE($3, amount),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {}
            "#,
            Reimbursement::COLUMNS
        ))
        .bind(id)
        .bind(&input.title)
        .bind(input.amount)
        .bind(input.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(reimbursement)
    }
}

#[async_trait]
impl LeadDirectory for Database {
    #[instrument(skip(self))]
    async fn organization_for_lead(&self, lead_id: i64) -> Result<Option<i64>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["organization_for_lead"])
            .start_timer();

        let organization: Option<Option<i64>> = sqlx::query_scalar(
            "SELECT organization_id FROM leads WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(lead_id)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(organization.flatten())
    }
}

#[async_trait]
impl AccrualStore for Database {
    /// Whole months come from `age()`, so a month only counts once its
    /// day-of-month has been reached.
    #[instrument(skip(self))]
    async fn eligible_employees(
        &self,
        rule: EligibilityRule,
        today: NaiveDate,
    ) -> Result<Vec<AccrualCandidate>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["eligible_employees"])
            .start_timer();

        let rows = sqlx::query_as::<_, (i64, NaiveDate)>(
            r#"
            SELECT id, joining_date
            FROM employees
            WHERE is_deleted = FALSE
              AND status = $1
              AND joining_date <= $2
              AND (
                    EXTRACT(YEAR FROM age($2::timestamp, joining_date::timestamp)) * 12
                  + EXTRACT(MONTH FROM age($2::timestamp, joining_date::timestamp))
                  )::int % $3 = 0
            ORDER BY id
            "#,
        )
        .bind(EmployeeStatus::Active.as_str())
        .bind(today)
        .bind(i32::try_from(rule.period_months).unwrap_or(i32::MAX))
        .fetch_all(&self.pool)
        .await?;

        timer.observe_duration();

        Ok(rows
            .into_iter()
            .map(|(employee_id, joining_date)| AccrualCandidate {
                employee_id,
                joining_date,
            })
            .collect())
    }

    #[instrument(skip(self, credit), fields(employee_id = credit.employee_id))]
    async fn insert_accrual(&self, credit: NewLeaveCredit) -> Result<Option<i64>, StorageError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_accrual"])
            .start_timer();

        let credit_id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO leave_credits (employee_id, quantity, note, source, period)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (employee_id, source, period) WHERE period IS NOT NULL DO NOTHING
            RETURNING id
            "#,
        )
        .bind(credit.employee_id)
        .bind(credit.quantity)
        .bind(&credit.note)
        .bind(credit.source.as_str())
        .bind(credit.period)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(credit_id)
    }
}
