use chrono::NaiveDateTime;
use shared::{schedule, NewMedication};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const DOSAGE_FORMS: [&str; 6] = ["Tablet", "Capsule", "Liquid", "Injection", "Inhaler", "Drops"];

/// Add-form contents before the username is attached
#[derive(Clone, Debug, PartialEq)]
pub struct MedicationDraft {
    pub name: String,
    pub dosage_form: String,
    pub dosages_per_day: u32,
    pub food_sensitive: bool,
    pub start_time: Option<NaiveDateTime>,
}

impl MedicationDraft {
    /// Build a draft from raw field values. Unparseable dose counts become
    /// zero so validation rejects them; an unparseable start time is dropped.
    pub fn from_fields(name: &str, dosage_form: &str, dosages_per_day: &str, food_sensitive: bool, start_time: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            dosage_form: dosage_form.trim().to_string(),
            dosages_per_day: dosages_per_day.trim().parse().unwrap_or(0),
            food_sensitive,
            start_time: schedule::parse_due_time(start_time),
        }
    }

    pub fn into_request(self, username: String) -> NewMedication {
        NewMedication {
            name: self.name,
            dosage_form: self.dosage_form,
            dosages_per_day: self.dosages_per_day,
            food_sensitive: self.food_sensitive,
            username,
            start_time: self.start_time,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AddMedicationFormProps {
    pub submitting: bool,
    /// Changing this clears the form
    pub reset_key: u32,
    pub on_submit: Callback<MedicationDraft>,
}

#[function_component(AddMedicationForm)]
pub fn add_medication_form(props: &AddMedicationFormProps) -> Html {
    let name = use_state(String::new);
    let dosage_form = use_state(String::new);
    let dosages_per_day = use_state(|| "1".to_string());
    let food_sensitive = use_state(|| false);
    let start_time = use_state(String::new);

    {
        let name = name.clone();
        let dosage_form = dosage_form.clone();
        let dosages_per_day = dosages_per_day.clone();
        let food_sensitive = food_sensitive.clone();
        let start_time = start_time.clone();
        use_effect_with(props.reset_key, move |_| {
            name.set(String::new());
            dosage_form.set(String::new());
            dosages_per_day.set("1".to_string());
            food_sensitive.set(false);
            start_time.set(String::new());
            || ()
        });
    }

    let text_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_food_sensitive_change = {
        let food_sensitive = food_sensitive.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            food_sensitive.set(input.checked());
        })
    };

    let onsubmit = {
        let name = name.clone();
        let dosage_form = dosage_form.clone();
        let dosages_per_day = dosages_per_day.clone();
        let food_sensitive = food_sensitive.clone();
        let start_time = start_time.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(MedicationDraft::from_fields(
                &name,
                &dosage_form,
                &dosages_per_day,
                *food_sensitive,
                &start_time,
            ));
        })
    };

    html! {
        <section class="add-medication-section card">
            <h2>{"➕ Add Medication"}</h2>
            <form class="add-medication-form" {onsubmit}>
                <div class="form-group">
                    <label for="medName">{"Medication name"}</label>
                    <input
                        type="text"
                        id="medName"
                        placeholder="Aspirin, Warfarin, Cipro..."
                        value={(*name).clone()}
                        oninput={text_input(&name)}
                        disabled={props.submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="dosageForm">{"Dosage form"}</label>
                    <input
                        type="text"
                        id="dosageForm"
                        list="dosageFormOptions"
                        placeholder="Tablet"
                        value={(*dosage_form).clone()}
                        oninput={text_input(&dosage_form)}
                        disabled={props.submitting}
                    />
                    <datalist id="dosageFormOptions">
                        {for DOSAGE_FORMS.iter().map(|form| html! { <option value={*form} /> })}
                    </datalist>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="dosagesPerDay">{"Doses per day"}</label>
                        <input
                            type="number"
                            id="dosagesPerDay"
                            min="1"
                            max="24"
                            step="1"
                            value={(*dosages_per_day).clone()}
                            oninput={text_input(&dosages_per_day)}
                            disabled={props.submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="startTime">{"First dose (optional)"}</label>
                        <input
                            type="datetime-local"
                            id="startTime"
                            value={(*start_time).clone()}
                            oninput={text_input(&start_time)}
                            disabled={props.submitting}
                        />
                    </div>
                </div>

                <label class="checkbox-group" for="foodSensitive">
                    <input
                        type="checkbox"
                        id="foodSensitive"
                        checked={*food_sensitive}
                        onchange={on_food_sensitive_change}
                        disabled={props.submitting}
                    />
                    {"Food sensitive (take with food)"}
                </label>

                <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                    {if props.submitting { "Adding..." } else { "Add Medication" }}
                </button>
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_draft_from_fields() {
        let draft = MedicationDraft::from_fields(" Cipro ", "Tablet", "2", true, "2025-06-01T08:30");
        assert_eq!(draft.name, "Cipro");
        assert_eq!(draft.dosages_per_day, 2);
        assert!(draft.food_sensitive);
        assert!(draft.start_time.is_some());

        let request = draft.into_request("alice".to_string());
        assert_eq!(request.username, "alice");
        assert!(request.validate().is_ok());
    }

    #[wasm_bindgen_test]
    fn test_draft_with_bad_fields() {
        let draft = MedicationDraft::from_fields("Iron", "Tablet", "two", false, "");
        assert_eq!(draft.dosages_per_day, 0);
        assert_eq!(draft.start_time, None);
        assert!(draft.into_request("alice".to_string()).validate().is_err());
    }
}
