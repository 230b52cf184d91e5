pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod registration;
pub mod retrieval;
pub mod state;
pub mod web;
