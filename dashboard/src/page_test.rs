use super::*;
use crate::http::{HttpError, Method};
use crate::testing::MockTransport;
use crate::notify::{NoticeLevel, NoticeLog};
use crate::resource::Registry;
use serde_json::json;

fn spec(name: &str) -> ResourceSpec {
    Registry::standard().unwrap().get(name).unwrap().clone()
}

fn page(name: &str, mock: &Arc<MockTransport>, policy: CreatePolicy) -> ResourcePage {
    ResourcePage::new(&spec(name), mock.clone(), policy)
}

fn ids(page: &ResourcePage) -> Vec<String> {
    page.list().records().unwrap().iter().map(|r| r.id().to_string()).collect()
}

// =============================================================
// Mount
// =============================================================

#[tokio::test]
async fn mount_fetches_exactly_once() {
    let mock = Arc::new(MockTransport::new(vec![Ok(json!([{"id": 1, "name": "Admin"}]))]));
    let mut page = page("role", &mock, CreatePolicy::Append);

    page.mount().await;
    page.mount().await;

    assert_eq!(mock.calls().len(), 1);
    assert_eq!(mock.calls()[0].path, "role/");
    assert_eq!(ids(&page), ["1"]);
}

#[tokio::test]
async fn failed_fetch_leaves_list_unloaded() {
    let mock = Arc::new(MockTransport::new(vec![Err(HttpError::Request("refused".into()))]));
    let mut page = page("role", &mock, CreatePolicy::Append);

    page.mount().await;

    assert!(page.list().is_mounted());
    assert!(!page.list().is_loaded());
}

#[tokio::test]
async fn remount_fetches_again() {
    let mock = Arc::new(MockTransport::new(vec![Ok(json!([{"id": 1}])), Ok(json!([{"id": 1}, {"id": 2}]))]));
    let mut page = page("role", &mock, CreatePolicy::Append);

    page.mount().await;
    page.unmount();
    assert!(!page.list().is_loaded());
    page.mount().await;

    assert_eq!(mock.calls().len(), 2);
    assert_eq!(ids(&page), ["1", "2"]);
}

// =============================================================
// Submit
// =============================================================

#[tokio::test]
async fn acme_scenario_appends_backend_record() {
    let mock = Arc::new(MockTransport::new(vec![
        Ok(json!([])),
        Ok(json!({"data": {"id": 1, "name": "Acme", "createdAt": "2024-01-01"}})),
    ]));
    let log = NoticeLog::new();
    let mut page = page("role", &mock, CreatePolicy::Append);
    page.mount().await;
    assert_eq!(page.list().records().map(<[Record]>::len), Some(0));

    page.form_mut().set("name", "Acme").unwrap();
    let outcome = page.submit(&log).await;

    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    let records = page.list().records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        serde_json::to_value(&records[0]).unwrap(),
        json!({"id": 1, "name": "Acme", "createdAt": "2024-01-01"})
    );
    assert_eq!(log.notices(), vec![Notice::success("Rôle ajouté")]);
    assert_eq!(page.form().value("name"), Some(""));
    assert!(!page.form().is_pending());
}

#[tokio::test]
async fn create_grows_collection_by_exactly_one() {
    let mock = Arc::new(MockTransport::new(vec![
        Ok(json!([{"id": 1, "name": "A", "phone": "1"}, {"id": 2, "name": "B", "phone": "2"}])),
        Ok(json!({"data": {"id": 3, "name": "C", "phone": "3"}})),
    ]));
    let log = NoticeLog::new();
    let mut page = page("customer", &mock, CreatePolicy::Append);
    page.mount().await;

    page.form_mut().set("name", "C").unwrap();
    page.form_mut().set("phone", "3").unwrap();
    page.submit(&log).await;

    assert_eq!(ids(&page), ["1", "2", "3"]);
    let post = &mock.calls()[1];
    assert_eq!(post.method, Method::Post);
    assert_eq!(post.path, "customer/");
    assert_eq!(post.body, Some(json!({"name": "C", "phone": "3"})));
}

#[tokio::test]
async fn missing_required_field_never_hits_network() {
    let mock = Arc::new(MockTransport::new(vec![Ok(json!([{"id": 1}]))]));
    let log = NoticeLog::new();
    let mut page = page("customer", &mock, CreatePolicy::Append);
    page.mount().await;

    page.form_mut().set("name", "Acme").unwrap();
    let outcome = page.submit(&log).await;

    let SubmitOutcome::Invalid(err) = outcome else {
        panic!("expected validation failure, got {outcome:?}");
    };
    assert_eq!(err.missing[0].name, "phone");
    assert_eq!(mock.calls().len(), 1, "only the initial fetch");
    assert_eq!(ids(&page), ["1"]);
    assert_eq!(log.notices(), vec![Notice::warning("Échec de l'ajout d'un client")]);
    assert_eq!(page.form().value("name"), Some("Acme"));
    assert!(!page.form().is_pending());
}

#[tokio::test]
async fn backend_failure_keeps_collection_and_form() {
    let mock = Arc::new(MockTransport::new(vec![
        Ok(json!([{"id": 1, "name": "Admin"}])),
        Err(HttpError::Status { status: 500, body: "boom".into() }),
    ]));
    let log = NoticeLog::new();
    let mut page = page("role", &mock, CreatePolicy::Append);
    page.mount().await;
    page.form_mut().set("name", "Caissier").unwrap();
    let before = page.list().records().unwrap().to_vec();

    let outcome = page.submit(&log).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(DispatchError::Http(HttpError::Status { status: 500, .. }))));
    assert_eq!(page.list().records().unwrap(), &before[..]);
    assert_eq!(page.form().value("name"), Some("Caissier"));
    assert!(!page.form().is_pending());
    assert_eq!(log.count(NoticeLevel::Error), 1);
    assert_eq!(log.notices()[0].message, "Erreur lors l'ajout d'un rôle, essayez à nouveau");
}

#[tokio::test]
async fn malformed_create_response_is_a_generic_failure() {
    let mock = Arc::new(MockTransport::new(vec![Ok(json!([])), Ok(json!({"message": "success"}))]));
    let log = NoticeLog::new();
    let mut page = page("role", &mock, CreatePolicy::Append);
    page.mount().await;
    page.form_mut().set("name", "Caissier").unwrap();

    let outcome = page.submit(&log).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.is_decode()));
    assert_eq!(page.list().records().map(<[Record]>::len), Some(0));
    assert_eq!(log.count(NoticeLevel::Error), 1);
}

#[tokio::test]
async fn append_then_reload_refetches_after_create() {
    let mock = Arc::new(MockTransport::new(vec![
        Ok(json!([])),
        Ok(json!({"data": {"id": 1, "name": "Acme"}})),
        Ok(json!([{"id": 1, "name": "Acme", "createdAt": "2024-01-01T00:00:00Z"}])),
    ]));
    let log = NoticeLog::new();
    let mut page = page("role", &mock, CreatePolicy::AppendThenReload);
    page.mount().await;
    page.form_mut().set("name", "Acme").unwrap();

    page.submit(&log).await;

    let calls = mock.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].method, Method::Get);
    let records = page.list().records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("createdAt"), Some(&json!("2024-01-01T00:00:00Z")));
    assert_eq!(log.count(NoticeLevel::Success), 1);
}

#[tokio::test]
async fn create_before_load_is_merged_once_loaded() {
    let mock = Arc::new(MockTransport::new(vec![Ok(json!({"data": {"id": 4, "name": "Acme"}}))]));
    let log = NoticeLog::new();
    let mut page = page("role", &mock, CreatePolicy::Append);
    let ticket = page.list_mut().mount().unwrap();

    page.form_mut().set("name", "Acme").unwrap();
    page.submit(&log).await;
    assert!(!page.list().is_loaded());

    assert!(page.list_mut().complete_load(ticket, vec![]));
    assert_eq!(ids(&page), ["4"]);
}
