//! Library crate for sevens-tracker, exposing the playtime engine, services and routes.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
