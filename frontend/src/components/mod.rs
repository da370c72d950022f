pub mod auth_view;
pub mod connection_status;
pub mod edit_medication_modal;
pub mod forms;
pub mod header;
pub mod medication_card;
pub mod medication_list;
pub mod toast_stack;
