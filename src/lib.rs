//! CPF Value Consultation API Library
//!
//! This library provides the core functionality for the value
//! consultation service: the external CPF lookup client, the JSON
//! passthrough endpoint that shields the browser from cross-origin
//! calls, and the three server-rendered views that walk a visitor from
//! consultation to receipt. All inter-view state travels in URL query
//! parameters; there is no database, cache, or session store.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `format`: CPF masks, date and currency formatting.
//! - `handlers`: HTTP request handlers (proxy and submission flow).
//! - `lookup_client`: External lookup API client.
//! - `models`: Data models for the lookup payload and view parameters.
//! - `views`: Server-rendered landing, result, and receipt pages.

pub mod config;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod lookup_client;
pub mod models;
pub mod views;
