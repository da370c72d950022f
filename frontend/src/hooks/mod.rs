pub mod use_auth;
pub mod use_medications;
pub mod use_periodic_refresh;
pub mod use_toasts;
