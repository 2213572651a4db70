//! Filter specifications to predicates.
//!
//! Every function here is pure over its query input. The invoice filter is
//! the exception: `leadId` is resolved through a [`LeadDirectory`] before
//! the predicate is built.

use crate::dtos::{
    ListDepartmentsQuery, ListEmployeesQuery, ListFaqsQuery, ListInvoicesQuery,
    ListLeadsQuery, ListLeaveCreditsQuery, ListProductsQuery, ListReimbursementsQuery,
};
use async_trait::async_trait;
use service_core::error::StorageError;
use service_core::query::{Predicate, PredicateBuilder};

/// Resolves a lead to the organization it was converted into.
#[async_trait]
pub trait LeadDirectory: Send + Sync {
    /// `Ok(None)` when the lead does not exist or has no organization.
    async fn organization_for_lead(&self, lead_id: i64) -> Result<Option<i64>, StorageError>;
}

fn faq_conditions(base: PredicateBuilder, query: &ListFaqsQuery) -> PredicateBuilder {
    base.contains("title", query.title.as_deref())
        .eq("category", query.category.as_deref())
}

pub fn faq_predicate(query: &ListFaqsQuery) -> Predicate {
    faq_conditions(PredicateBuilder::active(), query)
        .eq("is_published", query.is_published)
        .build()
}

/// Public listing: always restricted to published FAQs, so an
/// `isPublished` filter is ignored.
pub fn published_faq_predicate(query: &ListFaqsQuery) -> Predicate {
    faq_conditions(PredicateBuilder::active().published(), query).build()
}

pub fn department_predicate(query: &ListDepartmentsQuery) -> Predicate {
    PredicateBuilder::active()
        .contains("name", query.name.as_deref())
        .build()
}

pub fn product_predicate(query: &ListProductsQuery) -> Predicate {
    PredicateBuilder::active()
        .contains("name", query.name.as_deref())
        .eq("sku", query.sku.as_deref())
        .eq("category", query.category.as_deref())
        .build()
}

pub fn lead_predicate(query: &ListLeadsQuery) -> Predicate {
    PredicateBuilder::active()
        .contains("name", query.name.as_deref())
        .contains("email", query.email.as_deref())
        .eq("organization_id", query.organization_id)
        .build()
}

pub async fn invoice_predicate<D>(
    query: &ListInvoicesQuery,
    leads: &D,
) -> Result<Predicate, StorageError>
where
    D: LeadDirectory + ?Sized,
{
    let lead_organization = match query.lead_id {
        Some(lead_id) => {
            let organization = leads.organization_for_lead(lead_id).await?;
            if organization.is_none() {
                tracing::debug!(lead_id = lead_id, "Lead has no organization, leadId ignored");
            }
            organization
        }
        None => None,
    };

    Ok(PredicateBuilder::active()
        .contains("invoice_number", query.invoice_number.as_deref())
        .contains("customer_name", query.customer_name.as_deref())
        .eq("status", query.status.map(|s| s.as_str()))
        .eq("organization_id", query.organization_id)
        .eq("organization_id", lead_organization)
        .build())
}

pub fn employee_predicate(query: &ListEmployeesQuery) -> Predicate {
    PredicateBuilder::active()
        .contains("full_name", query.full_name.as_deref())
        .eq("department_id", query.department_id)
        .eq("status", query.status.map(|s| s.as_str()))
        .build()
}

pub fn leave_credit_predicate(query: &ListLeaveCreditsQuery) -> Predicate {
    PredicateBuilder::active()
        .eq("employee_id", query.employee_id)
        .eq("source", query.source.map(|s| s.as_str()))
        .build()
}

pub fn reimbursement_predicate(query: &ListReimbursementsQuery) -> Predicate {
    PredicateBuilder::active()
        .eq("employee_id", query.employee_id)
        .eq("status", query.status.map(|s| s.as_str()))
        .contains("title", query.title.as_deref())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceStatus;
    use service_core::error::StorageErrorKind;
    use service_core::query::{Op, Value};
    use std::collections::HashMap;

    struct MockLeads {
        organizations: HashMap<i64, Option<i64>>,
    }

    #[async_trait]
    impl LeadDirectory for MockLeads {
        async fn organization_for_lead(&self, lead_id: i64) -> Result<Option<i64>, StorageError> {
            Ok(self.organizations.get(&lead_id).copied().flatten())
        }
    }

    struct UnreachableLeads;

    #[async_trait]
    impl LeadDirectory for UnreachableLeads {
        async fn organization_for_lead(&self, _lead_id: i64) -> Result<Option<i64>, StorageError> {
            Err(StorageError::new(StorageErrorKind::ConnectionFailure, "pool timed out"))
        }
    }

    fn leads() -> MockLeads {
        MockLeads {
            organizations: HashMap::from([(7, Some(42)), (8, None)]),
        }
    }

    #[test]
    fn empty_faq_filter_is_the_base_predicate() {
        assert_eq!(
            faq_predicate(&ListFaqsQuery::default()),
            PredicateBuilder::active().build()
        );
    }

    #[test]
    fn published_listing_ignores_is_published_filter() {
        let query = ListFaqsQuery {
            is_published: Some(false),
            ..Default::default()
        };
        assert_eq!(
            published_faq_predicate(&query),
            PredicateBuilder::active().published().build()
        );
    }

    #[test]
    fn blank_text_filters_are_dropped() {
        let query = ListProductsQuery {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(product_predicate(&query), PredicateBuilder::active().build());
    }

    #[tokio::test]
    async fn lead_id_resolves_to_organization_condition() {
        let query = ListInvoicesQuery {
            lead_id: Some(7),
            ..Default::default()
        };

        let predicate = invoice_predicate(&query, &leads()).await.unwrap();

        let condition = predicate.conditions().last().unwrap();
        assert_eq!(condition.field, "organization_id");
        assert_eq!(condition.op, Op::Equals(Value::Int(42)));
    }

    #[tokio::test]
    async fn lead_without_organization_is_same_as_no_filter() {
        for lead_id in [8, 999] {
            let query = ListInvoicesQuery {
                lead_id: Some(lead_id),
                ..Default::default()
            };
            let predicate = invoice_predicate(&query, &leads()).await.unwrap();
            let unfiltered = invoice_predicate(&ListInvoicesQuery::default(), &leads())
                .await
                .unwrap();
            assert_eq!(predicate, unfiltered);
        }
    }

    #[tokio::test]
    async fn lead_lookup_failure_propagates() {
        let query = ListInvoicesQuery {
            lead_id: Some(7),
            ..Default::default()
        };
        let err = invoice_predicate(&query, &UnreachableLeads).await.unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::ConnectionFailure);
    }

    #[tokio::test]
    async fn lead_lookup_is_skipped_without_lead_id() {
        let query = ListInvoicesQuery {
            status: Some(InvoiceStatus::Paid),
            ..Default::default()
        };
        let predicate = invoice_predicate(&query, &UnreachableLeads).await.unwrap();
        assert_eq!(
            predicate,
            PredicateBuilder::active().eq("status", Some("paid")).build()
        );
    }
}
