//! Per-medication record of the last due instant that produced an alert
//!
//! The render loop re-evaluates every second, so alerts have to be keyed on
//! the due timestamp itself: a given `(id, nextDueTime)` pair alerts at most
//! once, and taking or snoozing a dose (which moves `nextDueTime`) arms the
//! next alert.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::{schedule, Medication, MedicationId};

/// Durable backing for the ledger
pub trait LedgerStore {
    /// Last notified due timestamp for a medication, if one was recorded
    fn load(&self, id: MedicationId) -> Option<String>;

    /// Record that `due_time` has been notified for a medication
    fn save(&self, id: MedicationId, due_time: &str);
}

/// In-memory store, used when no durable storage is available and in tests
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    entries: RefCell<HashMap<MedicationId, String>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self, id: MedicationId) -> Option<String> {
        self.entries.borrow().get(&id).cloned()
    }

    fn save(&self, id: MedicationId, due_time: &str) {
        self.entries.borrow_mut().insert(id, due_time.to_string());
    }
}

/// A medication that just crossed a due instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueAlert {
    pub id: MedicationId,
    pub name: String,
    pub dosage_form: String,
    pub due_time: String,
}

impl DueAlert {
    pub fn title(&self) -> String {
        format!("💊 Time to take {}", self.name)
    }

    pub fn body(&self) -> String {
        format!("Your {} dose of {} is due now.", self.dosage_form.to_lowercase(), self.name)
    }
}

pub struct NotificationLedger {
    last_notified: HashMap<MedicationId, String>,
    store: Box<dyn LedgerStore>,
}

impl NotificationLedger {
    pub fn new(store: Box<dyn LedgerStore>) -> Self {
        Self {
            last_notified: HashMap::new(),
            store,
        }
    }

    /// Return an alert for every due medication whose current due timestamp
    /// has not been notified yet, recording each one as notified.
    ///
    /// Cache entries for medications missing from `medications` are dropped.
    /// Their durable entries stay, so a medication that reappears is not
    /// alerted again for the same due instant.
    pub fn evaluate(&mut self, medications: &[Medication], now: NaiveDateTime) -> Vec<DueAlert> {
        let present: HashSet<MedicationId> = medications.iter().map(|medication| medication.id).collect();
        self.last_notified.retain(|id, _| present.contains(id));

        let mut alerts = Vec::new();

        for medication in medications {
            let Some(raw_due) = medication.next_due_time.as_deref() else {
                continue;
            };
            let Some(due_at) = schedule::parse_due_time(raw_due) else {
                continue;
            };
            if !schedule::is_due(due_at, now) {
                continue;
            }
            if self.last_notified(medication.id).as_deref() == Some(raw_due) {
                continue;
            }

            self.record(medication.id, raw_due);
            alerts.push(DueAlert {
                id: medication.id,
                name: medication.name.clone(),
                dosage_form: medication.dosage_form.clone(),
                due_time: raw_due.to_string(),
            });
        }

        alerts
    }

    /// Drop the in-memory cache; the durable store keeps its entries
    pub fn clear_cache(&mut self) {
        self.last_notified.clear();
    }

    fn last_notified(&mut self, id: MedicationId) -> Option<String> {
        if let Some(due_time) = self.last_notified.get(&id) {
            return Some(due_time.clone());
        }
        let stored = self.store.load(id)?;
        self.last_notified.insert(id, stored.clone());
        Some(stored)
    }

    fn record(&mut self, id: MedicationId, due_time: &str) {
        self.last_notified.insert(id, due_time.to_string());
        self.store.save(id, due_time);
    }
}

impl std::fmt::Debug for NotificationLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationLedger")
            .field("last_notified", &self.last_notified)
            .finish_non_exhaustive()
    }
}
