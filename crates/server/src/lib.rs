//! Shoplite server library.
//!
//! This crate provides the verification service as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
