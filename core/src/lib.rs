//! # PARAMGATE CORE LIBRARY
//!
//! **DECLARATIVE QUERY-PARAMETER VALIDATION FOR HTTP HANDLERS**
//!
//! **ARCHITECTURE**: Trait-based value checks, per-parameter rules, per-request validator
//! **GUARANTEE**: Every violation in a request is reported in one pass
//! **COMPATIBILITY**: Framework-neutral `HttpRequest`/`HttpResponse` seam via the `gate` module

pub mod api;
pub mod config;
pub mod errors;
pub mod gate;
pub mod request;
pub mod response;

// **VALIDATION MODULE REGISTRATION**
pub mod validation;
