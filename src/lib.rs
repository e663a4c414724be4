//! coursetree: builds a user's programme / course / unit enrolment
//! hierarchy from the flat record collections of an institutional records
//! system, and renders it as a collapsible tree.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
