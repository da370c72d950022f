use chrono::NaiveDateTime;

use crate::notifications::{DueAlert, LedgerStore, NotificationLedger};
use crate::schedule::DueStatus;
use crate::{Medication, MedicationId};

/// State of the link to the medication API, as shown in the status badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected(String),
}

impl ConnectionStatus {
    pub fn label(&self) -> String {
        match self {
            ConnectionStatus::Connecting => "Connecting...".to_string(),
            ConnectionStatus::Connected => "Connected".to_string(),
            ConnectionStatus::Disconnected(reason) => format!("Disconnected: {}", reason),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "warning",
            ConnectionStatus::Connected => "success",
            ConnectionStatus::Disconnected(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ConnectionStatus::Disconnected(_))
    }
}

/// One rendered line of the medication list
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationRow {
    pub id: MedicationId,
    pub name: String,
    pub dosage_form: String,
    pub dosages_per_day: u32,
    pub attributes: Option<String>,
    pub status: DueStatus,
}

impl MedicationRow {
    fn new(medication: &Medication, now: NaiveDateTime) -> Self {
        Self {
            id: medication.id,
            name: medication.name.clone(),
            dosage_form: medication.dosage_form.clone(),
            dosages_per_day: medication.doses_per_day(),
            attributes: medication.display_attributes().map(str::to_string),
            status: DueStatus::evaluate(medication.due_at(), now),
        }
    }

    pub fn is_due(&self) -> bool {
        self.status.is_due()
    }

    pub fn time_text(&self) -> String {
        self.status.to_string()
    }

    /// Card line: a countdown gets a label, the markers stand alone
    pub fn next_dose_text(&self) -> String {
        match self.status {
            DueStatus::Upcoming { .. } => format!("Next dose: {}", self.time_text()),
            DueStatus::Due | DueStatus::Unscheduled => self.time_text(),
        }
    }
}

/// Everything the client knows while a user is logged in
///
/// The snapshot is only ever replaced wholesale by a successful fetch.
/// Nothing here mutates a medication locally.
#[derive(Debug)]
pub struct ClientSession {
    username: Option<String>,
    snapshot: Vec<Medication>,
    connection: ConnectionStatus,
    ledger: NotificationLedger,
}

impl ClientSession {
    pub fn new(store: Box<dyn LedgerStore>) -> Self {
        Self {
            username: None,
            snapshot: Vec::new(),
            connection: ConnectionStatus::Connecting,
            ledger: NotificationLedger::new(store),
        }
    }

    pub fn start(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
        self.snapshot.clear();
        self.connection = ConnectionStatus::Connecting;
    }

    /// End the session: forget the user and the snapshot
    pub fn teardown(&mut self) {
        self.username = None;
        self.snapshot.clear();
        self.connection = ConnectionStatus::Connecting;
        self.ledger.clear_cache();
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn snapshot(&self) -> &[Medication] {
        &self.snapshot
    }

    pub fn connection(&self) -> &ConnectionStatus {
        &self.connection
    }

    pub fn find(&self, id: MedicationId) -> Option<&Medication> {
        self.snapshot.iter().find(|medication| medication.id == id)
    }

    /// Replace the snapshot with a fresh fetch and collect newly due alerts.
    /// A fetch that resolves after logout is dropped.
    pub fn apply_snapshot(&mut self, medications: Vec<Medication>, now: NaiveDateTime) -> Vec<DueAlert> {
        if !self.is_authenticated() {
            return Vec::new();
        }
        self.snapshot = medications;
        self.connection = ConnectionStatus::Connected;
        self.ledger.evaluate(&self.snapshot, now)
    }

    /// Keep the snapshot but mark the connection as broken.
    /// Returns true when this flips the status into the error state.
    pub fn record_fetch_failure(&mut self, reason: impl Into<String>) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        let was_error = self.connection.is_error();
        self.connection = ConnectionStatus::Disconnected(reason.into());
        !was_error
    }

    /// Local one-second tick. `None` means there is nothing to redraw.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<Vec<DueAlert>> {
        if !self.is_authenticated() || self.snapshot.is_empty() {
            return None;
        }
        Some(self.ledger.evaluate(&self.snapshot, now))
    }

    pub fn rows(&self, now: NaiveDateTime) -> Vec<MedicationRow> {
        self.snapshot
            .iter()
            .map(|medication| MedicationRow::new(medication, now))
            .collect()
    }
}
