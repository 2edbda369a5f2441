//! Users module.
//!
//! Provisions login accounts. Each account is a [`User`](model::User) plus
//! exactly one role profile, written together in one transaction.

pub mod controller;
pub mod id_generator;
pub mod model;
pub mod router;
pub mod service;
