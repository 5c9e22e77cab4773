pub mod broker;
pub mod status;
