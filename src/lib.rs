pub mod argsets;
pub mod command;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod hass;
pub mod helpers;
pub mod interfaces;
pub mod platform;
pub mod sensors;
