use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;

use components::auth_view::AuthView;
use components::edit_medication_modal::EditMedicationModal;
use components::forms::add_medication_form::AddMedicationForm;
use components::header::Header;
use components::medication_list::MedicationList;
use components::toast_stack::ToastStack;
use config::ClientConfig;
use hooks::use_auth::use_auth;
use hooks::use_medications::use_medications;
use hooks::use_toasts::use_toasts;
use services::api::ApiClient;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::default());
    let api_client = use_memo(config.api_base.clone(), |base| ApiClient::with_base_url(base.clone()));

    let toasts = use_toasts(config.toast_duration_ms);
    let auth = use_auth(&api_client, toasts.push.clone());
    let medications = use_medications(&api_client, &config, auth.state.username.clone(), toasts.push.clone());

    let toast_stack = html! {
        <ToastStack toasts={toasts.toasts.clone()} on_dismiss={toasts.dismiss.clone()} />
    };

    let Some(username) = auth.state.username.clone() else {
        return html! {
            <>
                <AuthView
                    form={auth.state.form}
                    submitting={auth.state.submitting}
                    on_login={auth.actions.login.clone()}
                    on_register={auth.actions.register.clone()}
                    on_show_form={auth.actions.show_form.clone()}
                />
                {toast_stack}
            </>
        };
    };

    html! {
        <>
            <Header
                username={username}
                connection={medications.state.connection.clone()}
                on_logout={auth.actions.logout.clone()}
            />
            <main class="main">
                <div class="container">
                    <AddMedicationForm
                        submitting={medications.state.adding}
                        reset_key={medications.state.form_generation}
                        on_submit={medications.actions.add.clone()}
                    />
                    <MedicationList
                        rows={medications.state.rows.clone()}
                        connection={medications.state.connection.clone()}
                        on_take={medications.actions.take.clone()}
                        on_snooze={medications.actions.snooze.clone()}
                        on_edit={medications.actions.open_edit.clone()}
                        on_delete={medications.actions.delete.clone()}
                    />
                </div>
            </main>
            <EditMedicationModal
                medication={medications.state.editing.clone()}
                on_close={medications.actions.close_edit.clone()}
                on_save={medications.actions.save_edit.clone()}
            />
            {toast_stack}
        </>
    }
}

fn main() {
    Logger::info_with_component("app", "Starting MedTrack client");
    yew::Renderer::<App>::new().render();
}
