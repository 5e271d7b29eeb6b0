// Library for tests to access modules

pub mod alerts;
pub mod client;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod log_view;
pub mod models;
pub mod page;
pub mod poller;
pub mod version;
