//! Domain entities and value objects exposed by the lead model.

pub mod activity;
pub mod campaign;
pub mod email_template;
pub mod lead;
pub mod stage;
pub mod types;
