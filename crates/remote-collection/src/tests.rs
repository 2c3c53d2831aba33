//! Scenario tests for a list page driven through `ListController`.

use futures::{pin_mut, poll};
use serde_json::{json, Value};
use std::cell::Cell;
use std::rc::Rc;
use std::task::Poll;

use crate::testing::{Row, ScriptedClient};
use crate::*;

fn controller(client: &Rc<ScriptedClient>) -> ListController<Row, ScriptedClient> {
    ListController::new(Rc::clone(client), "/projects", CollectionQuery::all())
}

fn row_json(id: &str, name: &str, status: &str) -> Value {
    json!({"id": id, "name": name, "status": status})
}

fn ids(ctrl: &ListController<Row, ScriptedClient>) -> Vec<String> {
    ctrl.collection().read(|c| c.items.iter().map(|r| r.id.clone()).collect())
}

async fn seeded(client: &Rc<ScriptedClient>, rows: Value) -> ListController<Row, ScriptedClient> {
    let ctrl = controller(client);
    client.reply(Ok(rows));
    ctrl.refresh().await;
    ctrl
}

#[tokio::test]
async fn test_refresh_unwraps_page_envelope() {
    let client = ScriptedClient::new();
    let ctrl = ListController::<Row, _>::new(Rc::clone(&client), "/projects", CollectionQuery::page(0, 1000));
    client.reply(Ok(json!({
        "content": [row_json("p1", "Alpha", "PENDING"), row_json("p2", "Beta", "APPROVED")],
        "totalElements": 2,
        "totalPages": 1
    })));

    let outcome = ctrl.refresh().await;
    assert_eq!(outcome, LoadOutcome::Applied { count: 2 });
    assert_eq!(ids(&ctrl), ["p1", "p2"]);
    assert_eq!(client.calls()[0].path, "/projects?page=0&size=1000");
    assert!(!ctrl.collection().read(|c| c.is_loading));
}

#[tokio::test]
async fn test_out_of_order_responses_apply_latest_only() {
    let client = ScriptedClient::new();
    let ctrl = controller(&client);
    let first = client.defer();
    let second = client.defer();

    let older = ctrl.refresh();
    let newer = ctrl.refresh();
    pin_mut!(older);
    pin_mut!(newer);
    assert!(poll!(older.as_mut()).is_pending());
    assert!(poll!(newer.as_mut()).is_pending());
    assert!(ctrl.collection().read(|c| c.is_loading));

    second.send(Ok(Some(json!([row_json("b", "Second", "")])))).unwrap();
    assert_eq!(poll!(newer.as_mut()), Poll::Ready(LoadOutcome::Applied { count: 1 }));

    first.send(Ok(Some(json!([row_json("a", "First", "")])))).unwrap();
    assert_eq!(poll!(older.as_mut()), Poll::Ready(LoadOutcome::Stale));

    assert_eq!(ids(&ctrl), ["b"]);
    assert!(!ctrl.collection().read(|c| c.is_loading));
}

#[tokio::test]
async fn test_stale_failure_does_not_set_error() {
    let client = ScriptedClient::new();
    let ctrl = controller(&client);
    let first = client.defer();
    client.reply(Ok(json!([row_json("b", "B", "")])));

    let older = ctrl.refresh();
    pin_mut!(older);
    assert!(poll!(older.as_mut()).is_pending());
    ctrl.refresh().await;

    first.send(Err(ApiError::Network("timeout".into()))).unwrap();
    assert_eq!(older.await, LoadOutcome::Stale);
    assert_eq!(ctrl.collection().read(|c| c.error.clone()), None);
    assert_eq!(ids(&ctrl), ["b"]);
}

#[tokio::test]
async fn test_failed_fetch_keeps_last_good_items() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("p1", "Alpha", "")])).await;

    client.reply(Err(ApiError::from_status(500, None)));
    let outcome = ctrl.refresh().await;
    assert!(matches!(outcome, LoadOutcome::Failed(ApiError::Http { status: 500, .. })));
    assert_eq!(ids(&ctrl), ["p1"]);
    assert_eq!(ctrl.collection().read(|c| c.error.clone()).as_deref(), Some("Failed to load data"));

    client.reply(Err(ApiError::from_status(503, Some("Maintenance".into()))));
    ctrl.refresh().await;
    assert_eq!(ctrl.collection().read(|c| c.error.clone()).as_deref(), Some("Maintenance"));

    client.reply(Ok(json!([])));
    ctrl.refresh().await;
    assert_eq!(ctrl.collection().read(|c| c.error.clone()), None);
}

#[tokio::test]
async fn test_approve_splices_returned_entity_without_refetch() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("p1", "Alpha", "PENDING"), row_json("p2", "Beta", "PENDING")])).await;

    client.reply(Ok(row_json("p1", "Alpha", "APPROVED")));
    let request = ActionRequest::transition(ActionKind::Approve, "p1".to_string(), Method::Post, "/projects/p1/approve");
    let outcome = ctrl.dispatch(request).await.unwrap();

    assert!(matches!(outcome, ActionOutcome::Applied(Some(ref r)) if r.status == "APPROVED"));
    let statuses: Vec<String> = ctrl.collection().read(|c| c.items.iter().map(|r| r.status.clone()).collect());
    assert_eq!(statuses, ["APPROVED", "PENDING"]);
    // one load plus the approve, no second GET
    assert_eq!(client.call_count(), 2);
    assert_eq!(client.calls()[1].method, Method::Post);
    assert_eq!(client.calls()[1].body, Some(json!({})));
}

#[tokio::test]
async fn test_delete_removes_only_on_success() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("e1", "Expo", ""), row_json("e2", "Talk", "")])).await;

    client.reply(Err(ApiError::Network("offline".into())));
    let err = ctrl.dispatch(ActionRequest::delete("e1".to_string(), "/events/e1")).await.unwrap_err();
    assert_eq!(err, ApiError::Network("offline".into()));
    assert_eq!(ids(&ctrl), ["e1", "e2"]);
    assert!(ctrl.collection().read(|c| c.pending().is_none()));

    client.reply_empty();
    ctrl.dispatch(ActionRequest::delete("e1".to_string(), "/events/e1")).await.unwrap();
    assert_eq!(ids(&ctrl), ["e2"]);
    assert!(ctrl.collection().read(|c| c.pending().is_none()));
}

#[tokio::test]
async fn test_fetch_started_before_delete_cannot_restore_row() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("e1", "Expo", ""), row_json("e2", "Talk", "")])).await;
    let gate = client.defer();

    let refresh = ctrl.refresh();
    pin_mut!(refresh);
    assert!(poll!(refresh.as_mut()).is_pending());

    client.reply_empty();
    ctrl.dispatch(ActionRequest::delete("e1".to_string(), "/events/e1")).await.unwrap();
    assert_eq!(ids(&ctrl), ["e2"]);

    gate.send(Ok(Some(json!([row_json("e1", "Expo", ""), row_json("e2", "Talk", "")])))).unwrap();
    assert_eq!(refresh.await, LoadOutcome::Stale);
    assert_eq!(ids(&ctrl), ["e2"]);
    assert!(!ctrl.collection().read(|c| c.is_loading));
}

#[tokio::test]
async fn test_failed_action_leaves_fetch_in_flight() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("e1", "Expo", "")])).await;
    let gate = client.defer();

    let refresh = ctrl.refresh();
    pin_mut!(refresh);
    assert!(poll!(refresh.as_mut()).is_pending());

    client.reply(Err(ApiError::from_status(403, None)));
    assert!(ctrl.dispatch(ActionRequest::delete("e1".to_string(), "/events/e1")).await.is_err());

    gate.send(Ok(Some(json!([row_json("e1", "Expo", ""), row_json("e3", "Fair", "")])))).unwrap();
    assert_eq!(refresh.await, LoadOutcome::Applied { count: 2 });
    assert_eq!(ids(&ctrl), ["e1", "e3"]);
}

#[tokio::test]
async fn test_concurrent_action_is_skipped() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("d1", "Dues", "PENDING"), row_json("d2", "Dues", "PENDING")])).await;
    let gate = client.defer();

    let verify = ctrl.dispatch(ActionRequest::transition(
        ActionKind::Verify,
        "d1".to_string(),
        Method::Post,
        "/finance/dues/d1/verify",
    ));
    pin_mut!(verify);
    assert!(poll!(verify.as_mut()).is_pending());
    assert!(ctrl.collection().read(|c| c.is_pending_for(ActionKind::Verify, &"d1".to_string())));

    let second = ctrl
        .dispatch(ActionRequest::transition(ActionKind::Verify, "d2".to_string(), Method::Post, "/finance/dues/d2/verify"))
        .await
        .unwrap();
    assert_eq!(second, ActionOutcome::Skipped);
    assert_eq!(client.call_count(), 2);

    gate.send(Ok(Some(row_json("d1", "Dues", "VERIFIED")))).unwrap();
    assert!(verify.await.unwrap().succeeded());
    assert!(!ctrl.collection().read(|c| c.is_busy()));
}

#[tokio::test]
async fn test_replace_without_body_refetches() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("pe1", "2024", "INACTIVE")])).await;

    client.reply_empty();
    client.reply(Ok(json!([row_json("pe1", "2024", "ACTIVE")])));
    let request = ActionRequest::transition(ActionKind::Activate, "pe1".to_string(), Method::Patch, "/periods/pe1/activate");
    let outcome = ctrl.dispatch(request).await.unwrap();

    assert_eq!(outcome, ActionOutcome::RefetchRequired);
    assert_eq!(client.call_count(), 3);
    assert_eq!(client.calls()[2].method, Method::Get);
    assert_eq!(ctrl.collection().read(|c| c.items[0].status.clone()), "ACTIVE");
}

#[tokio::test]
async fn test_replace_without_body_patches_known_fields() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("d1", "Dues", "PENDING")])).await;

    client.reply_empty();
    let request = ActionRequest::transition(ActionKind::Verify, "d1".to_string(), Method::Post, "/finance/dues/d1/verify")
        .patch_on_empty(|r: &mut Row| r.status = "VERIFIED".into());
    assert_eq!(ctrl.dispatch(request).await.unwrap(), ActionOutcome::Applied(None));
    assert_eq!(ctrl.collection().read(|c| c.items[0].status.clone()), "VERIFIED");
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_create_prepends_returned_entity() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("t1", "Old", "")])).await;

    client.reply(Ok(row_json("t2", "New", "")));
    let request = ActionRequest::create("/finance/transactions/simple", json!({"description": "New"}), Placement::Prepend);
    ctrl.dispatch(request).await.unwrap();
    assert_eq!(ids(&ctrl), ["t2", "t1"]);
}

#[tokio::test]
async fn test_empty_reject_reason_blocks_submission() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("p1", "Alpha", "PENDING")])).await;
    let p1 = ctrl.collection().read(|c| c.items[0].clone());

    ctrl.modals().update(|m| m.open(ModalSlot::Reject, p1));
    ctrl.modals().update(|m| m.set_reason("   "));
    let err = ctrl.modals().read(|m| m.submit_reason()).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    assert_eq!(client.call_count(), 1);
    assert!(ctrl.modals().read(|m| m.reason().is_editing()));
    assert!(ctrl.modals().read(|m| m.is_open(ModalSlot::Reject)));
}

#[tokio::test]
async fn test_modal_closes_after_successful_action() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("p1", "Alpha", "PENDING")])).await;
    let p1 = ctrl.collection().read(|c| c.items[0].clone());
    ctrl.modals().update(|m| m.open(ModalSlot::Reject, p1));
    ctrl.modals().update(|m| m.set_reason("Out of scope"));

    let reason = ctrl.modals().read(|m| m.submit_reason()).unwrap();
    let request = ActionRequest::reject("p1".to_string(), "/projects/p1/reject", "rejectionReason", &reason).unwrap();

    // the list must already be patched when the modal closes
    let seen = Rc::new(Cell::new(false));
    let observed = Rc::clone(&seen);
    let watcher = ctrl.clone();
    ctrl.modals().subscribe(move || {
        if !watcher.modals().read(|m| m.is_open(ModalSlot::Reject)) {
            observed.set(watcher.collection().read(|c| c.items[0].status == "REJECTED"));
        }
    });

    client.reply(Ok(row_json("p1", "Alpha", "REJECTED")));
    ctrl.dispatch_from_modal(ModalSlot::Reject, request).await.unwrap();

    assert!(!ctrl.modals().read(|m| m.is_open(ModalSlot::Reject)));
    assert!(!ctrl.modals().read(|m| m.reason().is_editing()));
    assert!(seen.get());
    assert_eq!(client.calls()[1].body, Some(json!({"rejectionReason": "Out of scope"})));
}

#[tokio::test]
async fn test_modal_stays_open_when_action_fails() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("p1", "Alpha", "")])).await;
    let p1 = ctrl.collection().read(|c| c.items[0].clone());
    ctrl.modals().update(|m| m.open(ModalSlot::DeleteConfirm, p1));

    client.reply(Err(ApiError::from_status(403, Some("Access denied".into()))));
    let target = ctrl.modals().read(|m| m.confirm(ModalSlot::DeleteConfirm)).unwrap();
    let err = ctrl
        .dispatch_from_modal(ModalSlot::DeleteConfirm, ActionRequest::delete(target.id.clone(), "/projects/p1"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message("Failed to delete"), "Access denied");
    assert!(ctrl.modals().read(|m| m.is_open(ModalSlot::DeleteConfirm)));
    assert_eq!(ids(&ctrl), ["p1"]);
}

#[tokio::test]
async fn test_cancel_never_sends() {
    let client = ScriptedClient::new();
    let ctrl = seeded(&client, json!([row_json("p1", "Alpha", "")])).await;
    let p1 = ctrl.collection().read(|c| c.items[0].clone());

    ctrl.modals().update(|m| m.open(ModalSlot::DeleteConfirm, p1));
    ctrl.modals().update(|m| m.cancel(ModalSlot::DeleteConfirm));

    assert!(!ctrl.modals().read(|m| m.is_open(ModalSlot::DeleteConfirm)));
    assert_eq!(client.call_count(), 1);
    assert_eq!(ids(&ctrl), ["p1"]);
}

fn activity_fallback() -> Fallback<Row> {
    Fallback::new("/dashboard/summary", |body: Value| {
        let recent = body.get("recentActivities").and_then(Value::as_array).cloned().unwrap_or_default();
        Ok(recent
            .iter()
            .enumerate()
            .map(|(i, a)| Row::new(&format!("log-{}", i), a.get("user").and_then(Value::as_str).unwrap_or_default()))
            .collect())
    })
}

fn activity_controller(client: &Rc<ScriptedClient>) -> ListController<Row, ScriptedClient> {
    ListController::new(Rc::clone(client), "/activity-logs", CollectionQuery::all()).with_fallback(activity_fallback())
}

#[tokio::test]
async fn test_empty_primary_uses_fallback_once() {
    let client = ScriptedClient::new();
    let ctrl = activity_controller(&client);
    client.reply(Ok(json!([])));
    client.reply(Ok(json!({"recentActivities": [{"user": "Rina"}, {"user": "Budi"}]})));

    assert_eq!(ctrl.refresh().await, LoadOutcome::Applied { count: 2 });
    assert_eq!(ids(&ctrl), ["log-0", "log-1"]);
    let paths: Vec<String> = client.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(paths, ["/activity-logs", "/dashboard/summary"]);
}

#[tokio::test]
async fn test_fallback_is_not_recursive() {
    let client = ScriptedClient::new();
    let ctrl = activity_controller(&client);
    client.reply(Ok(json!([])));
    client.reply(Ok(json!({"recentActivities": []})));

    assert_eq!(ctrl.refresh().await, LoadOutcome::Applied { count: 0 });
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_non_empty_primary_skips_fallback() {
    let client = ScriptedClient::new();
    let ctrl = activity_controller(&client);
    client.reply(Ok(json!({"content": [row_json("a1", "Login", "")]})));

    ctrl.refresh().await;
    assert_eq!(ids(&ctrl), ["a1"]);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_unauthorized_primary_skips_fallback() {
    let client = ScriptedClient::new();
    let ctrl = activity_controller(&client);
    client.reply(Err(ApiError::from_status(401, None)));

    let outcome = ctrl.refresh().await;
    assert!(matches!(outcome, LoadOutcome::Failed(ref e) if e.is_unauthorized()));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_failed_fallback_surfaces_primary_error() {
    let client = ScriptedClient::new();
    let ctrl = activity_controller(&client).with_load_error("Failed to load activity logs");
    client.reply(Err(ApiError::from_status(500, None)));
    client.reply(Err(ApiError::Network("offline".into())));

    let outcome = ctrl.refresh().await;
    assert!(matches!(outcome, LoadOutcome::Failed(ApiError::Http { status: 500, .. })));
    assert_eq!(
        ctrl.collection().read(|c| c.error.clone()).as_deref(),
        Some("Failed to load activity logs")
    );
}

#[tokio::test]
async fn test_visible_applies_filters_and_sort() {
    let client = ScriptedClient::new();
    let ctrl = seeded(
        &client,
        json!([row_json("1", "beta", "PENDING"), row_json("2", "Alpha", "PENDING"), row_json("3", "Gamma", "APPROVED")]),
    )
    .await;
    let criteria = FilterCriteria::new(&["name"]).with_filter("status", FilterValue::Exact("PENDING".into()));
    let names: Vec<String> = ctrl.visible(&criteria, SortSpec::NameAsc).into_iter().map(|r| r.name).collect();
    assert_eq!(names, ["Alpha", "beta"]);
}

#[tokio::test]
async fn test_subscription_notifies_until_unsubscribed() {
    let client = ScriptedClient::new();
    let ctrl = controller(&client);
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let sub = ctrl.subscribe(move || counter.set(counter.get() + 1));

    ctrl.modals().update(|m| m.open_blank(ModalSlot::Create));
    assert_eq!(hits.get(), 1);

    ctrl.unsubscribe(sub);
    ctrl.modals().update(|m| m.cancel(ModalSlot::Create));
    assert_eq!(hits.get(), 1);
}
