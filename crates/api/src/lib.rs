//! `billfold-api` — HTTP surface for the invoicing service.

pub mod app;
