//! User-triggered operations against the medication API
//!
//! Each flow makes exactly one call and turns the result into a toast. The
//! caller reloads the list after `ActionOutcome::Completed`; nothing here
//! touches the snapshot.

use async_trait::async_trait;

use crate::{
    interactions, ApiError, Credentials, Medication, MedicationId, MedicationUpdate, NewMedication, Notice,
};

/// The REST surface the client talks to
#[async_trait(?Send)]
pub trait MedicationApi {
    async fn register(&self, credentials: &Credentials) -> Result<String, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;

    async fn list_medications(&self, username: &str) -> Result<Vec<Medication>, ApiError>;

    async fn add_medication(&self, request: &NewMedication) -> Result<Medication, ApiError>;

    async fn update_medication(&self, id: MedicationId, update: &MedicationUpdate) -> Result<Medication, ApiError>;

    async fn delete_medication(&self, id: MedicationId) -> Result<(), ApiError>;

    async fn take_medication(&self, id: MedicationId) -> Result<(), ApiError>;

    async fn snooze_medication(&self, id: MedicationId) -> Result<(), ApiError>;
}

/// Result of a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server accepted the change; show the notice and reload
    Completed(Notice),
    /// Nothing changed server-side; show the notice only
    Failed(Notice),
    /// The user backed out before any request was sent
    Cancelled,
}

impl ActionOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ActionOutcome::Completed(notice) | ActionOutcome::Failed(notice) => Some(notice),
            ActionOutcome::Cancelled => None,
        }
    }

    pub fn needs_reload(&self) -> bool {
        matches!(self, ActionOutcome::Completed(_))
    }
}

fn rejected(prefix: &str, error: &ApiError, connection_message: &str) -> Notice {
    match error {
        ApiError::Status { .. } => {
            let detail = error.server_message().unwrap_or("Unknown error");
            Notice::error(format!("{}: {}", prefix, detail))
        }
        _ => Notice::error(connection_message),
    }
}

pub async fn register<A: MedicationApi + ?Sized>(api: &A, credentials: &Credentials) -> ActionOutcome {
    match api.register(credentials).await {
        Ok(_) => ActionOutcome::Completed(Notice::success("Registration successful! Please sign in.")),
        Err(error) => ActionOutcome::Failed(rejected(
            "Registration failed",
            &error,
            "Connection error during registration.",
        )),
    }
}

pub async fn login<A: MedicationApi + ?Sized>(api: &A, credentials: &Credentials) -> ActionOutcome {
    match api.login(credentials).await {
        Ok(_) => ActionOutcome::Completed(Notice::success(format!("Welcome, {}!", credentials.username))),
        Err(error) => ActionOutcome::Failed(rejected("Login failed", &error, "Connection error during login.")),
    }
}

/// Add a medication, then run the advisory interaction check against the
/// snapshot the user was looking at. A warning replaces the success toast
/// but never undoes the add.
pub async fn add_medication<A: MedicationApi + ?Sized>(
    api: &A,
    request: &NewMedication,
    snapshot: &[Medication],
) -> ActionOutcome {
    if let Err(invalid) = request.validate() {
        return ActionOutcome::Failed(Notice::warning(invalid.to_string()));
    }

    match api.add_medication(request).await {
        Ok(created) => match interactions::check_interactions(&created, snapshot) {
            Some(warning) => ActionOutcome::Completed(Notice::error(warning)),
            None => ActionOutcome::Completed(Notice::success("Medication added successfully!")),
        },
        Err(_) => ActionOutcome::Failed(Notice::error(
            "Failed to add medication. Please ensure the backend is running.",
        )),
    }
}

pub async fn update_medication<A: MedicationApi + ?Sized>(
    api: &A,
    id: MedicationId,
    update: &MedicationUpdate,
) -> ActionOutcome {
    if let Err(invalid) = update.validate() {
        return ActionOutcome::Failed(Notice::warning(invalid.to_string()));
    }

    match api.update_medication(id, update).await {
        Ok(_) => ActionOutcome::Completed(Notice::success(format!("💊 {} updated successfully.", update.name.trim()))),
        Err(_) => ActionOutcome::Failed(Notice::error("Failed to update medication.")),
    }
}

pub fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to delete {}?", name)
}

/// Delete after asking the user; declining sends nothing
pub async fn delete_medication<A, F>(api: &A, id: MedicationId, name: &str, confirm: F) -> ActionOutcome
where
    A: MedicationApi + ?Sized,
    F: FnOnce(&str) -> bool,
{
    if !confirm(&delete_prompt(name)) {
        return ActionOutcome::Cancelled;
    }

    match api.delete_medication(id).await {
        Ok(()) => ActionOutcome::Completed(Notice::success(format!("🗑️ {} deleted successfully.", name))),
        Err(_) => ActionOutcome::Failed(Notice::error("Failed to delete medication.")),
    }
}

pub async fn take_medication<A: MedicationApi + ?Sized>(api: &A, id: MedicationId, name: &str) -> ActionOutcome {
    match api.take_medication(id).await {
        Ok(()) => ActionOutcome::Completed(Notice::success(format!("✅ {} marked as taken! Next dose scheduled.", name))),
        Err(_) => ActionOutcome::Failed(Notice::error("Failed to record medication. Please check connection.")),
    }
}

pub async fn snooze_medication<A: MedicationApi + ?Sized>(api: &A, id: MedicationId, name: &str) -> ActionOutcome {
    match api.snooze_medication(id).await {
        Ok(()) => ActionOutcome::Completed(Notice::warning(format!("⏰ {} snoozed for 15 minutes.", name))),
        Err(_) => ActionOutcome::Failed(Notice::error("Failed to snooze medication. Please check connection.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::MemoryLedgerStore;
    use crate::{ClientSession, NoticeLevel};
    use chrono::NaiveDateTime;
    use std::cell::{Cell, RefCell};

    /// In-memory stand-in for the REST server
    #[derive(Default)]
    struct FakeApi {
        medications: RefCell<Vec<Medication>>,
        calls: RefCell<Vec<String>>,
        next_id: Cell<MedicationId>,
        offline: Cell<bool>,
    }

    impl FakeApi {
        fn with(medications: Vec<Medication>) -> Self {
            let next_id = medications.iter().map(|m| m.id).max().unwrap_or(0) + 1;
            let api = Self::default();
            *api.medications.borrow_mut() = medications;
            api.next_id.set(next_id);
            api
        }

        fn call(&self, name: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(name);
            if self.offline.get() {
                Err(ApiError::Network("Failed to fetch".to_string()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl MedicationApi for FakeApi {
        async fn register(&self, credentials: &Credentials) -> Result<String, ApiError> {
            self.call(format!("register {}", credentials.username))?;
            if credentials.username == "taken" {
                return Err(ApiError::Status { status: 400, body: "Username already exists".to_string() });
            }
            Ok("User registered successfully. ID: 1".to_string())
        }

        async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
            self.call(format!("login {}", credentials.username))?;
            if credentials.password != "secret" {
                return Err(ApiError::Status { status: 401, body: "Invalid username or password.".to_string() });
            }
            Ok(format!("Login successful for user: {}", credentials.username))
        }

        async fn list_medications(&self, username: &str) -> Result<Vec<Medication>, ApiError> {
            self.call(format!("list {}", username))?;
            Ok(self.medications.borrow().clone())
        }

        async fn add_medication(&self, request: &NewMedication) -> Result<Medication, ApiError> {
            self.call(format!("add {}", request.name))?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let created = Medication {
                id,
                name: request.name.clone(),
                dosage_form: request.dosage_form.clone(),
                dosages_per_day: Some(request.dosages_per_day),
                attributes: Some(if request.food_sensitive {
                    "Food Sensitive (Take with food)".to_string()
                } else {
                    "Standard".to_string()
                }),
                next_due_time: Some("2025-06-01T08:00:10".to_string()),
            };
            self.medications.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_medication(&self, id: MedicationId, update: &MedicationUpdate) -> Result<Medication, ApiError> {
            self.call(format!("update {}", id))?;
            let mut medications = self.medications.borrow_mut();
            let medication = medications
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(ApiError::Status { status: 404, body: String::new() })?;
            medication.name = update.name.clone();
            medication.dosage_form = update.dosage_form.clone();
            medication.dosages_per_day = Some(update.dosages_per_day);
            Ok(medication.clone())
        }

        async fn delete_medication(&self, id: MedicationId) -> Result<(), ApiError> {
            self.call(format!("delete {}", id))?;
            self.medications.borrow_mut().retain(|m| m.id != id);
            Ok(())
        }

        async fn take_medication(&self, id: MedicationId) -> Result<(), ApiError> {
            self.call(format!("take {}", id))
        }

        async fn snooze_medication(&self, id: MedicationId) -> Result<(), ApiError> {
            self.call(format!("snooze {}", id))
        }
    }

    fn med(id: MedicationId, name: &str) -> Medication {
        Medication {
            id,
            name: name.to_string(),
            dosage_form: "Tablet".to_string(),
            dosages_per_day: Some(1),
            attributes: Some("Standard".to_string()),
            next_due_time: Some("2025-06-01T08:00:00".to_string()),
        }
    }

    fn new_med(name: &str) -> NewMedication {
        NewMedication {
            name: name.to_string(),
            dosage_form: "Tablet".to_string(),
            dosages_per_day: 1,
            food_sensitive: false,
            username: "alice".to_string(),
            start_time: None,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-06-01T07:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[tokio::test]
    async fn test_delete_after_confirmation_removes_from_next_snapshot() {
        let api = FakeApi::with(vec![med(1, "Aspirin"), med(2, "Iron")]);
        let mut session = ClientSession::new(Box::new(MemoryLedgerStore::new()));
        session.start("alice");
        session.apply_snapshot(api.list_medications("alice").await.unwrap(), now());

        let outcome = delete_medication(&api, 1, "Aspirin", |prompt| {
            assert_eq!(prompt, "Are you sure you want to delete Aspirin?");
            true
        })
        .await;
        assert!(outcome.needs_reload());
        assert_eq!(outcome.notice().unwrap().message, "🗑️ Aspirin deleted successfully.");

        // The snapshot only changes once the reload lands
        assert!(session.find(1).is_some());
        session.apply_snapshot(api.list_medications("alice").await.unwrap(), now());
        let names: Vec<_> = session.rows(now()).into_iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["Iron".to_string()]);
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let api = FakeApi::with(vec![med(1, "Aspirin")]);

        let outcome = delete_medication(&api, 1, "Aspirin", |_| false).await;
        assert_eq!(outcome, ActionOutcome::Cancelled);
        assert!(outcome.notice().is_none());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_warns_on_interaction_but_still_completes() {
        let api = FakeApi::with(vec![med(1, "Aspirin")]);
        let snapshot = api.medications.borrow().clone();

        let outcome = add_medication(&api, &new_med("Warfarin"), &snapshot).await;
        let ActionOutcome::Completed(notice) = outcome else {
            panic!("add should complete");
        };
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "⚠️ CRITICAL INTERACTION: Warfarin and Aspirin may cause bleeding risks!");
        assert_eq!(api.medications.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_add_without_interaction() {
        let api = FakeApi::with(vec![med(1, "Vitamin C")]);
        let snapshot = api.medications.borrow().clone();

        let outcome = add_medication(&api, &new_med("Aspirin"), &snapshot).await;
        assert_eq!(outcome, ActionOutcome::Completed(Notice::success("Medication added successfully!")));
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name_without_request() {
        let api = FakeApi::default();

        let outcome = add_medication(&api, &new_med("  "), &[]).await;
        assert_eq!(outcome, ActionOutcome::Failed(Notice::warning("Please enter a medication name.")));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_failure_message() {
        let api = FakeApi::default();
        api.offline.set(true);

        let outcome = add_medication(&api, &new_med("Aspirin"), &[]).await;
        assert!(!outcome.needs_reload());
        assert_eq!(
            outcome.notice().unwrap().message,
            "Failed to add medication. Please ensure the backend is running."
        );
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let api = FakeApi::default();
        let good = Credentials { username: "alice".to_string(), password: "secret".to_string() };
        let bad = Credentials { password: "nope".to_string(), ..good.clone() };

        assert_eq!(login(&api, &good).await, ActionOutcome::Completed(Notice::success("Welcome, alice!")));
        assert_eq!(
            login(&api, &bad).await,
            ActionOutcome::Failed(Notice::error("Login failed: Invalid username or password."))
        );

        api.offline.set(true);
        assert_eq!(
            login(&api, &good).await,
            ActionOutcome::Failed(Notice::error("Connection error during login."))
        );
    }

    #[tokio::test]
    async fn test_register_outcomes() {
        let api = FakeApi::default();
        let fresh = Credentials { username: "bob".to_string(), password: "pw".to_string() };
        let taken = Credentials { username: "taken".to_string(), password: "pw".to_string() };

        assert!(register(&api, &fresh).await.needs_reload());
        assert_eq!(
            register(&api, &taken).await,
            ActionOutcome::Failed(Notice::error("Registration failed: Username already exists"))
        );
    }

    #[tokio::test]
    async fn test_take_and_snooze() {
        let api = FakeApi::with(vec![med(4, "Iron")]);

        let taken = take_medication(&api, 4, "Iron").await;
        assert_eq!(taken.notice().unwrap().level, NoticeLevel::Success);

        let snoozed = snooze_medication(&api, 4, "Iron").await;
        assert_eq!(snoozed, ActionOutcome::Completed(Notice::warning("⏰ Iron snoozed for 15 minutes.")));
        assert_eq!(api.calls(), vec!["take 4".to_string(), "snooze 4".to_string()]);

        api.offline.set(true);
        assert_eq!(
            snooze_medication(&api, 4, "Iron").await.notice().unwrap().message,
            "Failed to snooze medication. Please check connection."
        );
    }

    #[tokio::test]
    async fn test_update_medication() {
        let api = FakeApi::with(vec![med(1, "Aspirin")]);
        let update = MedicationUpdate {
            name: "Aspirin 81mg".to_string(),
            dosage_form: "Chewable".to_string(),
            dosages_per_day: 2,
        };

        let outcome = update_medication(&api, 1, &update).await;
        assert_eq!(outcome, ActionOutcome::Completed(Notice::success("💊 Aspirin 81mg updated successfully.")));
        assert_eq!(api.medications.borrow()[0].doses_per_day(), 2);

        let missing = update_medication(&api, 99, &update).await;
        assert_eq!(missing, ActionOutcome::Failed(Notice::error("Failed to update medication.")));
    }
}
