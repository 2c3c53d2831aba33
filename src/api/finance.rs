//! Finance Endpoints
//!
//! Transactions, procurement requests and dues payments.

use remote_collection::{
    decode_collection, ActionKind, ActionRequest, ApiClient, ApiError, ApiResult, CollectionQuery, Method, Placement,
};
use std::rc::Rc;
use web_sys::{File, FormData};

use super::http::js_error;
use super::{HttpClient, RemoteList};
use crate::models::{
    CreateDuesRequest, CreateProcurementRequest, CreateTransactionRequest, DuesPayment, FinanceCategory,
    FinanceTransaction, ProcurementRequest, TransactionSummary, STATUS_VERIFIED,
};

pub const TRANSACTIONS: &str = "/finance/transactions";
pub const TRANSACTION_SUMMARY: &str = "/finance/transactions/summary";
pub const SIMPLE_TRANSACTION: &str = "/finance/transactions/simple";
pub const CATEGORIES: &str = "/finance/categories";
pub const PROCUREMENT: &str = "/finance/procurement";
pub const DUES: &str = "/finance/dues";

/// Latest transactions shown under the summary cards
pub const RECENT_TRANSACTIONS: u32 = 10;
const PROCUREMENT_PAGE: u32 = 50;

// ========================
// Transactions
// ========================

pub fn transaction_list(client: Rc<HttpClient>) -> RemoteList<FinanceTransaction> {
    RemoteList::new(client, TRANSACTIONS, CollectionQuery::page(0, RECENT_TRANSACTIONS))
        .with_load_error("Failed to load transactions")
}

pub async fn fetch_transaction_summary(client: &HttpClient) -> ApiResult<TransactionSummary> {
    let body = client.get(TRANSACTION_SUMMARY).await?;
    Ok(serde_json::from_value(body)?)
}

pub async fn fetch_categories(client: &HttpClient) -> ApiResult<Vec<FinanceCategory>> {
    let body = client.get(CATEGORIES).await?;
    let (categories, _) = decode_collection(body)?;
    Ok(categories)
}

pub fn create_transaction(request: &CreateTransactionRequest) -> ApiResult<ActionRequest<FinanceTransaction>> {
    request.validate()?;
    Ok(ActionRequest::create(SIMPLE_TRANSACTION, serde_json::to_value(request)?, Placement::Prepend))
}

// ========================
// Procurement
// ========================

pub fn procurement_list(client: Rc<HttpClient>) -> RemoteList<ProcurementRequest> {
    RemoteList::new(client, PROCUREMENT, CollectionQuery::sized(PROCUREMENT_PAGE))
        .with_load_error("Failed to load procurement requests")
}

pub fn create_procurement(request: &CreateProcurementRequest) -> ApiResult<ActionRequest<ProcurementRequest>> {
    request.validate()?;
    Ok(ActionRequest::create(PROCUREMENT, serde_json::to_value(request)?, Placement::Prepend))
}

pub fn approve_procurement(id: &str) -> ActionRequest<ProcurementRequest> {
    ActionRequest::transition(ActionKind::Approve, id.to_string(), Method::Post, format!("{}/{}/approve", PROCUREMENT, id))
        .patch_on_empty(|p: &mut ProcurementRequest| p.status = "APPROVED".to_string())
}

pub fn reject_procurement(id: &str, reason: &str) -> ApiResult<ActionRequest<ProcurementRequest>> {
    let request = ActionRequest::reject(id.to_string(), format!("{}/{}/reject", PROCUREMENT, id), "reason", reason)?;
    Ok(request.patch_on_empty(|p: &mut ProcurementRequest| p.status = "REJECTED".to_string()))
}

// ========================
// Dues
// ========================

pub fn dues_list(client: Rc<HttpClient>) -> RemoteList<DuesPayment> {
    RemoteList::new(client, DUES, CollectionQuery::all()).with_load_error("Failed to load dues payments")
}

pub fn verify_dues(id: &str) -> ActionRequest<DuesPayment> {
    ActionRequest::transition(ActionKind::Verify, id.to_string(), Method::Post, format!("{}/{}/verify", DUES, id))
        .patch_on_empty(|d: &mut DuesPayment| d.status = STATUS_VERIFIED.to_string())
}

/// Multipart body: `data` is the JSON request, `file` the payment proof
pub fn dues_form(request: &CreateDuesRequest, proof: Option<&File>) -> ApiResult<FormData> {
    let data = request.multipart_data(proof.is_some())?;
    let proof = proof.ok_or_else(|| ApiError::Validation("Payment proof is required".into()))?;
    let form = FormData::new().map_err(js_error)?;
    form.append_with_str("data", &data).map_err(js_error)?;
    form.append_with_blob_and_filename("file", proof, &proof.name()).map_err(js_error)?;
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use remote_collection::Reconcile;
    use serde_json::json;

    #[test]
    fn test_reject_procurement_uses_reason_field() {
        let req = reject_procurement("pr1", "Too expensive").unwrap();
        assert_eq!(req.path, "/finance/procurement/pr1/reject");
        assert_eq!(req.body, Some(json!({"reason": "Too expensive"})));
        assert!(reject_procurement("pr1", "   ").is_err());
    }

    #[test]
    fn test_create_transaction_prepends() {
        let request = CreateTransactionRequest {
            description: "Printer ink".into(),
            amount: 150000.0,
            kind: "EXPENSE".into(),
            category_id: "c1".into(),
            transaction_date: "2024-05-02".into(),
        };
        let req = create_transaction(&request).unwrap();
        assert_eq!(req.path, "/finance/transactions/simple");
        assert!(matches!(req.reconcile, Reconcile::Insert(Placement::Prepend)));
    }

    #[test]
    fn test_verify_dues_path() {
        let req = verify_dues("d1");
        assert_eq!(req.path, "/finance/dues/d1/verify");
        assert_eq!(req.kind, ActionKind::Verify);
    }

    #[test]
    fn test_dues_form_requires_proof_before_touching_the_dom() {
        let request = CreateDuesRequest { payment_month: 1, payment_year: 2024, amount: 20000.0 };
        assert!(matches!(dues_form(&request, None), Err(ApiError::Validation(_))));
    }
}
