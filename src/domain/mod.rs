//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access and identity trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves a code, which atomically bumps the link's counter
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] stores the detail record with retry logic

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
