pub mod alert;
pub mod clients;
pub mod config;
pub mod diagnostic;
pub mod kanban;
pub mod listing;
pub mod output;
