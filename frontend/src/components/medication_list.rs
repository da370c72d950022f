use shared::{ConnectionStatus, MedicationId, MedicationRow};
use yew::prelude::*;

use super::medication_card::MedicationCard;

#[derive(Properties, PartialEq)]
pub struct MedicationListProps {
    pub rows: Vec<MedicationRow>,
    pub connection: ConnectionStatus,
    pub on_take: Callback<(MedicationId, String)>,
    pub on_snooze: Callback<(MedicationId, String)>,
    pub on_edit: Callback<MedicationId>,
    pub on_delete: Callback<(MedicationId, String)>,
}

#[function_component(MedicationList)]
pub fn medication_list(props: &MedicationListProps) -> Html {
    let error_banner = if props.connection.is_error() {
        html! {
            <div class="error-banner" role="alert">
                {"⚠️ Error loading medications. Is the server running?"}
            </div>
        }
    } else {
        html! {}
    };

    let body = if props.rows.is_empty() {
        if props.connection.is_error() {
            html! {}
        } else if props.connection == ConnectionStatus::Connecting {
            html! { <div class="loading">{"Loading medications..."}</div> }
        } else {
            html! {
                <div class="empty-state">
                    <p>{"No medications yet."}</p>
                    <small>{"Add one above to start tracking doses."}</small>
                </div>
            }
        }
    } else {
        html! {
            <ul class="medication-list">
                {for props.rows.iter().map(|row| html! {
                    <MedicationCard
                        key={row.id}
                        row={row.clone()}
                        on_take={props.on_take.clone()}
                        on_snooze={props.on_snooze.clone()}
                        on_edit={props.on_edit.clone()}
                        on_delete={props.on_delete.clone()}
                    />
                })}
            </ul>
        }
    };

    html! {
        <section class="medications-section card">
            <h2>{"📋 Your Medications"}</h2>
            {error_banner}
            {body}
        </section>
    }
}
