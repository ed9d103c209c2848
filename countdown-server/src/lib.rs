//! Transit departure countdown server.
//!
//! Answers "how long until the next bus or ferry, and what comes after
//! it?" from static published timetables, for routes whose late-night
//! trips run past midnight.

pub mod calendar;
pub mod config;
pub mod domain;
pub mod engine;
pub mod rules;
pub mod timetable;
pub mod web;
