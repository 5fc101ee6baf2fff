//! Personal notes: a REST API server backed by PostgreSQL and a client-side
//! note store that keeps an in-memory list in sync with it.

pub mod client;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
