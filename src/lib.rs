//! Waitlist signup service for the Resale landing page: field validation,
//! an append-only signup store, CSV export, and the admin panel gate.

pub mod admin;
pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod form;
pub mod page;
pub mod validation;
