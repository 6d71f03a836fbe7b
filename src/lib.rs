//! Statutory Annual Leave Entitlement Engine
//!
//! This crate computes the paid annual leave an employee is entitled to on a
//! given evaluation date, under either the hire-date or the fiscal-year
//! accrual basis, and exposes the calculation over HTTP.
//!
//! A calculation classifies the request into one accrual regime (monthly,
//! full annual, adjusted annual, prorated, or monthly plus a fiscal-year
//! grant) and runs the matching calculator. Statutory holidays come from a
//! [`calculation::HolidayLookup`], typically a YAML-backed
//! [`config::HolidayCalendar`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
