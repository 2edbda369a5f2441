//! Academic departments module.
//!
//! Every department belongs to one academic faculty. Offerings and profiles
//! reference a department, and offerings additionally require that it belongs
//! to the academic faculty they name.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
