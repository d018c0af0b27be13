use super::ActionLogRepository;
use crate::domain::action_log::{ActionLog, ActionType};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = crate::db::open_in_memory().unwrap();
    Arc::new(Mutex::new(conn))
}

#[test]
fn test_insert_and_find_by_id() {
    let repo = ActionLogRepository::new(setup_test_db());

    let log = ActionLog::new(ActionType::RegisterProduct, "operador")
        .with_payload(serde_json::json!({ "sku": "000001" }))
        .with_detail("Parafuso");
    let id = repo.insert(&log).unwrap();
    assert_eq!(id, log.action_id);

    let found = repo.find_by_id(&id).unwrap().unwrap();
    assert_eq!(found.action_type, "RegisterProduct");
    assert_eq!(found.actor, "operador");
    assert_eq!(found.payload_json.unwrap()["sku"], "000001");
    assert_eq!(found.detail.as_deref(), Some("Parafuso"));

    assert!(repo.find_by_id("missing").unwrap().is_none());
}

#[test]
fn test_find_recent_and_by_type() {
    let repo = ActionLogRepository::new(setup_test_db());

    repo.insert(&ActionLog::new(ActionType::BuildSlots, "a")).unwrap();
    repo.insert(&ActionLog::new(ActionType::CreateOrder, "b")).unwrap();
    repo.insert(&ActionLog::new(ActionType::BuildSlots, "c")).unwrap();

    assert_eq!(repo.count().unwrap(), 3);
    assert_eq!(repo.find_recent(2).unwrap().len(), 2);
    assert_eq!(repo.find_by_action_type("BuildSlots").unwrap().len(), 2);
    assert!(repo.find_by_action_type("Recalc").unwrap().is_empty());
}
