//! DTO modules that bridge services with the page templates.

pub mod campaigns;
pub mod composer;
pub mod dashboard;
pub mod leads;
pub mod pipeline;
