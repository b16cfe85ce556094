//! Request handlers.

pub mod connect;
pub mod health;
pub mod pages;
