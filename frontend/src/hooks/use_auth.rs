use shared::{actions, ActionOutcome, Credentials, Notice};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Register,
}

#[derive(Clone)]
pub struct AuthState {
    /// Logged-in user; `None` shows the auth view
    pub username: Option<String>,
    pub form: AuthForm,
    pub submitting: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseAuthActions {
    pub login: Callback<Credentials>,
    pub register: Callback<Credentials>,
    pub logout: Callback<()>,
    pub show_form: Callback<AuthForm>,
}

pub struct UseAuthResult {
    pub state: AuthState,
    pub actions: UseAuthActions,
}

#[hook]
pub fn use_auth(api_client: &ApiClient, push_notice: Callback<Notice>) -> UseAuthResult {
    let username = use_state(storage::load_session);
    let form = use_state(|| AuthForm::Login);
    let submitting = use_state(|| false);

    let login = {
        let api_client = api_client.clone();
        let username = username.clone();
        let submitting = submitting.clone();
        let push_notice = push_notice.clone();

        use_callback((), move |credentials: Credentials, _| {
            let api_client = api_client.clone();
            let username = username.clone();
            let submitting = submitting.clone();
            let push_notice = push_notice.clone();

            spawn_local(async move {
                submitting.set(true);

                let outcome = actions::login(&api_client, &credentials).await;
                if let ActionOutcome::Completed(_) = &outcome {
                    Logger::info_with_component("auth", &format!("Logged in as {}", credentials.username));
                    storage::save_session(&credentials.username);
                    username.set(Some(credentials.username.clone()));
                } else {
                    Logger::warn_with_component("auth", &format!("Login failed for {}", credentials.username));
                }
                if let Some(notice) = outcome.notice() {
                    push_notice.emit(notice.clone());
                }

                submitting.set(false);
            });
        })
    };

    let register = {
        let api_client = api_client.clone();
        let form = form.clone();
        let submitting = submitting.clone();
        let push_notice = push_notice.clone();

        use_callback((), move |credentials: Credentials, _| {
            let api_client = api_client.clone();
            let form = form.clone();
            let submitting = submitting.clone();
            let push_notice = push_notice.clone();

            spawn_local(async move {
                submitting.set(true);

                let outcome = actions::register(&api_client, &credentials).await;
                if outcome.needs_reload() {
                    form.set(AuthForm::Login);
                }
                if let Some(notice) = outcome.notice() {
                    push_notice.emit(notice.clone());
                }

                submitting.set(false);
            });
        })
    };

    let logout = {
        let username = username.clone();
        let push_notice = push_notice.clone();

        use_callback((), move |_, _| {
            storage::clear_session();
            username.set(None);
            Logger::info_with_component("auth", "Logged out");
            push_notice.emit(Notice::success("Logged out successfully."));
        })
    };

    let show_form = {
        let form = form.clone();
        use_callback((), move |target: AuthForm, _| form.set(target))
    };

    let state = AuthState {
        username: (*username).clone(),
        form: *form,
        submitting: *submitting,
    };

    let actions = UseAuthActions {
        login,
        register,
        logout,
        show_form,
    };

    UseAuthResult { state, actions }
}
