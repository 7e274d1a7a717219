#![forbid(unsafe_code)]

pub mod app_utils;
pub mod config;
pub mod errors;
