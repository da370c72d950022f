pub mod api;
pub mod logging;
pub mod notifier;
pub mod storage;
