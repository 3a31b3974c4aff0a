pub mod api;
pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod download;
pub mod icons;
pub mod poller;
