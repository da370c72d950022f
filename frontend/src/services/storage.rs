//! Durable browser state: the login flag, the username, and the
//! last-notified due time per medication.

use gloo::storage::{LocalStorage, Storage};
use shared::{LedgerStore, MedicationId, MemoryLedgerStore};

use crate::services::logging::Logger;

pub const AUTH_KEY: &str = "medtrackAuth";
pub const USER_KEY: &str = "medtrackUser";
pub const LAST_NOTIFIED_PREFIX: &str = "medtrackLastNotified_";

pub fn last_notified_key(id: MedicationId) -> String {
    format!("{}{}", LAST_NOTIFIED_PREFIX, id)
}

/// Username of a session that survived a page reload
pub fn load_session() -> Option<String> {
    let authenticated: bool = LocalStorage::get(AUTH_KEY).unwrap_or(false);
    if !authenticated {
        return None;
    }
    LocalStorage::get::<String>(USER_KEY)
        .ok()
        .filter(|username| !username.is_empty())
}

pub fn save_session(username: &str) {
    if let Err(e) = LocalStorage::set(AUTH_KEY, true).and_then(|_| LocalStorage::set(USER_KEY, username)) {
        Logger::warn_with_component("storage", &format!("Failed to persist session: {}", e));
    }
}

pub fn clear_session() {
    LocalStorage::delete(AUTH_KEY);
    LocalStorage::delete(USER_KEY);
}

fn local_storage_available() -> bool {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .is_some()
}

/// Ledger backing for this browser. Without `localStorage` (some private
/// modes) alerts are only de-duplicated until the page reloads.
pub fn ledger_store() -> Box<dyn LedgerStore> {
    if local_storage_available() {
        Box::new(LocalStorageLedger)
    } else {
        Logger::warn_with_component("storage", "localStorage unavailable, notification history kept in memory");
        Box::new(MemoryLedgerStore::new())
    }
}

/// `LocalStorage` backing for the notification ledger
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageLedger;

impl LedgerStore for LocalStorageLedger {
    fn load(&self, id: MedicationId) -> Option<String> {
        LocalStorage::get(last_notified_key(id)).ok()
    }

    fn save(&self, id: MedicationId, due_time: &str) {
        if let Err(e) = LocalStorage::set(last_notified_key(id), due_time) {
            Logger::warn_with_component(
                "storage",
                &format!("Failed to record notification for medication {}: {}", id, e),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_round_trip() {
        clear_session();
        assert_eq!(load_session(), None);

        save_session("alice");
        assert_eq!(load_session().as_deref(), Some("alice"));

        clear_session();
        assert_eq!(load_session(), None);
    }

    #[wasm_bindgen_test]
    fn test_ledger_store_uses_local_storage_in_browser() {
        assert!(local_storage_available());

        let store = ledger_store();
        LocalStorage::delete(last_notified_key(77));
        store.save(77, "2025-06-01T08:00:00");
        assert_eq!(LocalStorageLedger.load(77).as_deref(), Some("2025-06-01T08:00:00"));

        LocalStorage::delete(last_notified_key(77));
    }

    #[wasm_bindgen_test]
    fn test_ledger_persists_per_medication() {
        let ledger = LocalStorageLedger;
        LocalStorage::delete(last_notified_key(42));
        assert_eq!(ledger.load(42), None);

        ledger.save(42, "2025-06-01T08:00:00");
        assert_eq!(ledger.load(42).as_deref(), Some("2025-06-01T08:00:00"));
        assert_eq!(ledger.load(43), None);

        LocalStorage::delete(last_notified_key(42));
    }
}
