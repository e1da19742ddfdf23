//! HTTP route handlers

pub mod form;
pub mod predictions;
