use shared::{Medication, MedicationId, MedicationUpdate};
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EditMedicationModalProps {
    /// Medication being edited; `None` keeps the modal closed
    pub medication: Option<Medication>,
    pub on_close: Callback<()>,
    pub on_save: Callback<(MedicationId, MedicationUpdate)>,
}

#[function_component(EditMedicationModal)]
pub fn edit_medication_modal(props: &EditMedicationModalProps) -> Html {
    let name = use_state(String::new);
    let dosage_form = use_state(String::new);
    let dosages_per_day = use_state(String::new);

    // Prefill whenever a different medication is opened
    {
        let name = name.clone();
        let dosage_form = dosage_form.clone();
        let dosages_per_day = dosages_per_day.clone();
        use_effect_with(props.medication.clone(), move |medication| {
            if let Some(medication) = medication {
                let update = MedicationUpdate::from_medication(medication);
                name.set(update.name);
                dosage_form.set(update.dosage_form);
                dosages_per_day.set(update.dosages_per_day.to_string());
            }
            || ()
        });
    }

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let text_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let Some(medication) = &props.medication else {
        return html! {};
    };

    let onsubmit = {
        let id = medication.id;
        let name = name.clone();
        let dosage_form = dosage_form.clone();
        let dosages_per_day = dosages_per_day.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_save.emit((
                id,
                MedicationUpdate {
                    name: name.trim().to_string(),
                    dosage_form: dosage_form.trim().to_string(),
                    dosages_per_day: dosages_per_day.trim().parse().unwrap_or(0),
                },
            ));
        })
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <form class="modal-content" {onsubmit}>
                    <h3 class="modal-title">{format!("✏️ Edit {}", medication.name)}</h3>

                    <div class="form-group">
                        <label for="editName">{"Medication name"}</label>
                        <input
                            type="text"
                            id="editName"
                            value={(*name).clone()}
                            oninput={text_input(&name)}
                        />
                    </div>

                    <div class="form-group">
                        <label for="editDosageForm">{"Dosage form"}</label>
                        <input
                            type="text"
                            id="editDosageForm"
                            list="dosageFormOptions"
                            value={(*dosage_form).clone()}
                            oninput={text_input(&dosage_form)}
                        />
                    </div>

                    <div class="form-group">
                        <label for="editDosagesPerDay">{"Doses per day"}</label>
                        <input
                            type="number"
                            id="editDosagesPerDay"
                            min="1"
                            max="24"
                            step="1"
                            value={(*dosages_per_day).clone()}
                            oninput={text_input(&dosages_per_day)}
                        />
                    </div>

                    <div class="modal-buttons">
                        <button type="button" class="btn btn-secondary" onclick={on_cancel_click}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary">
                            {"Save"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
