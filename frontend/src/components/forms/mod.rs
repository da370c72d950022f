pub mod add_medication_form;
pub mod credentials_form;
