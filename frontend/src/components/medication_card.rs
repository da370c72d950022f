use shared::{MedicationId, MedicationRow};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MedicationCardProps {
    pub row: MedicationRow,
    pub on_take: Callback<(MedicationId, String)>,
    pub on_snooze: Callback<(MedicationId, String)>,
    pub on_edit: Callback<MedicationId>,
    pub on_delete: Callback<(MedicationId, String)>,
}

#[function_component(MedicationCard)]
pub fn medication_card(props: &MedicationCardProps) -> Html {
    let row = &props.row;

    let with_name = |callback: &Callback<(MedicationId, String)>| {
        let callback = callback.clone();
        let id = row.id;
        let name = row.name.clone();
        Callback::from(move |_: MouseEvent| callback.emit((id, name.clone())))
    };

    let on_edit_click = {
        let on_edit = props.on_edit.clone();
        let id = row.id;
        Callback::from(move |_: MouseEvent| on_edit.emit(id))
    };

    let doses_label = if row.dosages_per_day == 1 {
        "1 dose/day".to_string()
    } else {
        format!("{} doses/day", row.dosages_per_day)
    };

    html! {
        <li class={classes!("medication-card", row.is_due().then_some("due"))}>
            <div class="medication-info">
                <div class="medication-name">{&row.name}</div>
                <div class="medication-meta">
                    <span class="dosage-form">{&row.dosage_form}</span>
                    <span class="doses-per-day">{doses_label}</span>
                    {if let Some(attributes) = &row.attributes {
                        html! { <span class="medication-attributes">{attributes}</span> }
                    } else {
                        html! {}
                    }}
                </div>
                <div class={classes!("next-due", row.is_due().then_some("due-now"))}>
                    {row.next_dose_text()}
                </div>
            </div>
            <div class="medication-actions">
                <button type="button" class="btn btn-success" onclick={with_name(&props.on_take)}>
                    {"✓ Take"}
                </button>
                <button type="button" class="btn btn-secondary" onclick={with_name(&props.on_snooze)}>
                    {"⏰ Snooze"}
                </button>
                <button type="button" class="btn btn-secondary" onclick={on_edit_click}>
                    {"✏️ Edit"}
                </button>
                <button type="button" class="btn btn-danger" onclick={with_name(&props.on_delete)}>
                    {"🗑️ Delete"}
                </button>
            </div>
        </li>
    }
}
