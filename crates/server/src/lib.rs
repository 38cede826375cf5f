//! Bookstall server library.
//!
//! This crate provides the server functionality as a library, allowing it to
//! be driven in-process by the integration tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod upload;
