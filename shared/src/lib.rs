use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod actions;
pub mod error;
pub mod interactions;
pub mod notifications;
pub mod schedule;
pub mod session;

pub use actions::{ActionOutcome, MedicationApi};
pub use error::{ApiError, MedicationFormError};
pub use interactions::{check_interactions, InteractionRule, STANDARD_RULES};
pub use notifications::{DueAlert, LedgerStore, MemoryLedgerStore, NotificationLedger};
pub use schedule::DueStatus;
pub use session::{ClientSession, ConnectionStatus, MedicationRow};

/// Server-assigned medication identifier
pub type MedicationId = i64;

/// Attribute value the server reports for a medication without any tags
pub const STANDARD_ATTRIBUTES: &str = "Standard";

/// A medication as served by `GET /medications`
///
/// The client never creates or mutates these locally; every change goes
/// through the API and comes back with the next snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    /// Free text such as "Tablet" or "Syrup"
    pub dosage_form: String,
    /// Doses per day; older records may omit it
    #[serde(default)]
    pub dosages_per_day: Option<u32>,
    /// Tag text, e.g. "Food Sensitive (Take with food)" or "Standard"
    #[serde(default)]
    pub attributes: Option<String>,
    /// Next scheduled dose (ISO-8601, usually without an offset)
    #[serde(default)]
    pub next_due_time: Option<String>,
}

impl Medication {
    /// Doses per day, falling back to one when absent or zero
    pub fn doses_per_day(&self) -> u32 {
        self.dosages_per_day.filter(|count| *count > 0).unwrap_or(1)
    }

    /// Parsed next-due instant in local wall-clock time
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        self.next_due_time.as_deref().and_then(schedule::parse_due_time)
    }

    /// Attribute text worth showing, skipping the "Standard" placeholder
    pub fn display_attributes(&self) -> Option<&str> {
        self.attributes
            .as_deref()
            .map(str::trim)
            .filter(|attrs| !attrs.is_empty() && *attrs != STANDARD_ATTRIBUTES)
    }
}

/// Username/password pair for `/auth/login` and `/auth/register`
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("password", self.password.clone()),
        ]
    }
}

/// Form input for `POST /medications`
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedication {
    pub name: String,
    pub dosage_form: String,
    pub dosages_per_day: u32,
    pub food_sensitive: bool,
    pub username: String,
    /// First dose; the server picks one when absent
    pub start_time: Option<NaiveDateTime>,
}

impl NewMedication {
    /// Reject input the server would store as an unusable record
    pub fn validate(&self) -> Result<(), MedicationFormError> {
        validate_fields(&self.name, &self.dosage_form, self.dosages_per_day)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("name", self.name.trim().to_string()),
            ("dosageForm", self.dosage_form.trim().to_string()),
            ("dosagesPerDay", self.dosages_per_day.to_string()),
            ("foodSensitive", self.food_sensitive.to_string()),
            ("username", self.username.clone()),
        ];
        if let Some(start) = self.start_time {
            pairs.push(("startTime", start.format(schedule::WIRE_FORMAT).to_string()));
        }
        pairs
    }
}

/// Form input for `PUT /medications/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationUpdate {
    pub name: String,
    pub dosage_form: String,
    pub dosages_per_day: u32,
}

impl MedicationUpdate {
    /// Prefill an edit form from the current snapshot entry
    pub fn from_medication(medication: &Medication) -> Self {
        Self {
            name: medication.name.clone(),
            dosage_form: medication.dosage_form.clone(),
            dosages_per_day: medication.doses_per_day(),
        }
    }

    pub fn validate(&self) -> Result<(), MedicationFormError> {
        validate_fields(&self.name, &self.dosage_form, self.dosages_per_day)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.trim().to_string()),
            ("dosageForm", self.dosage_form.trim().to_string()),
            ("dosagesPerDay", self.dosages_per_day.to_string()),
        ]
    }
}

fn validate_fields(name: &str, dosage_form: &str, dosages_per_day: u32) -> Result<(), MedicationFormError> {
    if name.trim().is_empty() {
        return Err(MedicationFormError::EmptyName);
    }
    if dosage_form.trim().is_empty() {
        return Err(MedicationFormError::EmptyDosageForm);
    }
    if dosages_per_day == 0 {
        return Err(MedicationFormError::NoDoses);
    }
    Ok(())
}

/// Severity of a user-facing toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

/// A transient message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}
