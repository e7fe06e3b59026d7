//! Operator console for calling and reporting matches of a remotely hosted bracket.
//!
//! The remote bracket is the source of truth for which matches exist and who
//! plays in them; this crate layers the operator's "in progress" markers on top
//! and keeps them across refreshes.

pub mod config;
pub mod console;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
