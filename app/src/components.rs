//! Reusable UI pieces shared by the page routes.

pub mod error_template;
