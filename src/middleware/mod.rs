//! Request middleware applied to every route and to the fallback.

pub mod cors;
pub mod logging;
