pub mod app_settings;
pub mod app_state;
pub mod host;
pub mod identity;
pub mod messages;
pub mod navigation;
pub mod network;
