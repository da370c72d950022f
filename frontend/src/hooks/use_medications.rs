use chrono::{Local, NaiveDateTime};
use shared::{
    actions, ActionOutcome, ClientSession, ConnectionStatus, Medication, MedicationApi, MedicationId, MedicationRow,
    MedicationUpdate, Notice,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::forms::add_medication_form::MedicationDraft;
use crate::config::ClientConfig;
use crate::hooks::use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notifier;
use crate::services::storage;

const COMPONENT: &str = "medications";

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Clone)]
pub struct MedicationsState {
    pub rows: Vec<MedicationRow>,
    pub connection: ConnectionStatus,
    /// Medication open in the edit modal
    pub editing: Option<Medication>,
    pub adding: bool,
    /// Bumped after a successful add so the form clears itself
    pub form_generation: u32,
}

#[derive(Clone, PartialEq)]
pub struct UseMedicationsActions {
    pub add: Callback<MedicationDraft>,
    pub take: Callback<(MedicationId, String)>,
    pub snooze: Callback<(MedicationId, String)>,
    pub delete: Callback<(MedicationId, String)>,
    pub open_edit: Callback<MedicationId>,
    pub close_edit: Callback<()>,
    pub save_edit: Callback<(MedicationId, MedicationUpdate)>,
}

pub struct UseMedicationsResult {
    pub state: MedicationsState,
    pub actions: UseMedicationsActions,
}

/// Show the outcome's toast and resync when the server accepted a change
fn settle(outcome: &ActionOutcome, push_notice: &Callback<Notice>, reload: &Callback<()>) {
    if let Some(notice) = outcome.notice() {
        push_notice.emit(notice.clone());
    }
    if outcome.needs_reload() {
        reload.emit(());
    }
}

/// Sync & render loop for the logged-in user.
///
/// Owns the `ClientSession`, a 5-second poll that replaces the snapshot
/// and a 1-second tick that only redraws the countdowns. Both timers run
/// while `username` is set and stop when it is cleared.
#[hook]
pub fn use_medications(
    api_client: &ApiClient,
    config: &ClientConfig,
    username: Option<String>,
    push_notice: Callback<Notice>,
) -> UseMedicationsResult {
    let session = use_mut_ref(|| ClientSession::new(storage::ledger_store()));
    let form_generation = use_mut_ref(|| 0u32);
    let force_update = use_force_update();
    let editing = use_state(|| Option::<Medication>::None);
    let adding = use_state(|| false);

    // Full reload: replace the snapshot or flag the connection
    let reload = {
        let api_client = api_client.clone();
        let session = session.clone();
        let force_update = force_update.clone();
        let push_notice = push_notice.clone();

        use_callback((), move |_, _| {
            let Some(username) = session.borrow().username().map(str::to_string) else {
                return;
            };
            let api_client = api_client.clone();
            let session = session.clone();
            let force_update = force_update.clone();
            let push_notice = push_notice.clone();

            spawn_local(async move {
                let result = api_client.list_medications(&username).await;

                // A response for a user who has since logged out is dropped
                if session.borrow().username() != Some(username.as_str()) {
                    return;
                }

                match result {
                    Ok(medications) => {
                        Logger::debug_with_component(
                            COMPONENT,
                            &format!("Loaded {} medications", medications.len()),
                        );
                        let alerts = session.borrow_mut().apply_snapshot(medications, now());
                        notifier::announce(&alerts, &push_notice);
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Error loading medications: {}", e));
                        let lost_connection = session.borrow_mut().record_fetch_failure(e.connection_reason());
                        if lost_connection {
                            push_notice.emit(Notice::error("Lost connection to the medication server."));
                        }
                    }
                }

                force_update.force_update();
            });
        })
    };

    // Local tick: redraw countdowns from the snapshot, no network
    let tick = {
        let session = session.clone();
        let force_update = force_update.clone();
        let push_notice = push_notice.clone();

        use_callback((), move |_, _| {
            let alerts = session.borrow_mut().tick(now());
            if let Some(alerts) = alerts {
                notifier::announce(&alerts, &push_notice);
                force_update.force_update();
            }
        })
    };

    // Session lifecycle follows the logged-in user
    {
        let session = session.clone();
        let reload = reload.clone();
        let editing = editing.clone();
        let force_update = force_update.clone();

        use_effect_with(username.clone(), move |username| {
            match username {
                Some(username) => {
                    Logger::info_with_component(COMPONENT, &format!("Starting session for {}", username));
                    session.borrow_mut().start(username.clone());
                    notifier::request_permission();
                    reload.emit(());
                }
                None => {
                    if session.borrow().is_authenticated() {
                        Logger::info_with_component(COMPONENT, "Tearing down session");
                    }
                    session.borrow_mut().teardown();
                    editing.set(None);
                }
            }
            force_update.force_update();
            || ()
        });
    }

    let logged_out = username.is_none();
    use_periodic_refresh(
        PeriodicRefreshConfig::every("poll", config.poll_interval_ms),
        reload.clone(),
        logged_out,
    );
    use_periodic_refresh(
        PeriodicRefreshConfig::every("tick", config.tick_interval_ms),
        tick,
        logged_out,
    );

    let add = {
        let api_client = api_client.clone();
        let session = session.clone();
        let form_generation = form_generation.clone();
        let adding = adding.clone();
        let force_update = force_update.clone();
        let push_notice = push_notice.clone();
        let reload = reload.clone();

        use_callback((), move |draft: MedicationDraft, _| {
            let Some(username) = session.borrow().username().map(str::to_string) else {
                return;
            };
            let request = draft.into_request(username);
            let snapshot = session.borrow().snapshot().to_vec();
            let api_client = api_client.clone();
            let form_generation = form_generation.clone();
            let adding = adding.clone();
            let force_update = force_update.clone();
            let push_notice = push_notice.clone();
            let reload = reload.clone();

            spawn_local(async move {
                adding.set(true);

                let outcome = actions::add_medication(&api_client, &request, &snapshot).await;
                if outcome.needs_reload() {
                    *form_generation.borrow_mut() += 1;
                    force_update.force_update();
                }
                settle(&outcome, &push_notice, &reload);

                adding.set(false);
            });
        })
    };

    let take = {
        let api_client = api_client.clone();
        let push_notice = push_notice.clone();
        let reload = reload.clone();

        use_callback((), move |(id, name): (MedicationId, String), _| {
            let api_client = api_client.clone();
            let push_notice = push_notice.clone();
            let reload = reload.clone();

            Logger::debug_with_component(COMPONENT, &format!("Take requested for {}", id));
            spawn_local(async move {
                let outcome = actions::take_medication(&api_client, id, &name).await;
                settle(&outcome, &push_notice, &reload);
            });
        })
    };

    let snooze = {
        let api_client = api_client.clone();
        let push_notice = push_notice.clone();
        let reload = reload.clone();

        use_callback((), move |(id, name): (MedicationId, String), _| {
            let api_client = api_client.clone();
            let push_notice = push_notice.clone();
            let reload = reload.clone();

            Logger::debug_with_component(COMPONENT, &format!("Snooze requested for {}", id));
            spawn_local(async move {
                let outcome = actions::snooze_medication(&api_client, id, &name).await;
                settle(&outcome, &push_notice, &reload);
            });
        })
    };

    let delete = {
        let api_client = api_client.clone();
        let push_notice = push_notice.clone();
        let reload = reload.clone();

        use_callback((), move |(id, name): (MedicationId, String), _| {
            let api_client = api_client.clone();
            let push_notice = push_notice.clone();
            let reload = reload.clone();

            spawn_local(async move {
                let outcome = actions::delete_medication(&api_client, id, &name, gloo::dialogs::confirm).await;
                settle(&outcome, &push_notice, &reload);
            });
        })
    };

    let open_edit = {
        let session = session.clone();
        let editing = editing.clone();
        use_callback((), move |id: MedicationId, _| {
            editing.set(session.borrow().find(id).cloned());
        })
    };

    let close_edit = {
        let editing = editing.clone();
        use_callback((), move |_, _| editing.set(None))
    };

    let save_edit = {
        let api_client = api_client.clone();
        let editing = editing.clone();
        let push_notice = push_notice.clone();
        let reload = reload.clone();

        use_callback((), move |(id, update): (MedicationId, MedicationUpdate), _| {
            let api_client = api_client.clone();
            let editing = editing.clone();
            let push_notice = push_notice.clone();
            let reload = reload.clone();

            spawn_local(async move {
                let outcome = actions::update_medication(&api_client, id, &update).await;
                if outcome.needs_reload() {
                    editing.set(None);
                }
                settle(&outcome, &push_notice, &reload);
            });
        })
    };

    let state = {
        let session = session.borrow();
        MedicationsState {
            rows: session.rows(now()),
            connection: session.connection().clone(),
            editing: (*editing).clone(),
            adding: *adding,
            form_generation: *form_generation.borrow(),
        }
    };

    let actions = UseMedicationsActions {
        add,
        take,
        snooze,
        delete,
        open_edit,
        close_edit,
        save_edit,
    };

    UseMedicationsResult { state, actions }
}
