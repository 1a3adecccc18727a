pub mod cors;
pub mod services;
