//! Domain services used by the HTTP handlers.

pub mod font;
pub mod generator;
pub mod history;
pub mod label_store;
