//! Admissions dashboard HTTP API.
//!
//! Every route is a business function wrapped by [`gate::create_handler`],
//! which validates, authenticates and authorizes the request and shapes the
//! result into an [`envelope::ApiEnvelope`].

pub mod app;
pub mod config;
pub mod context;
pub mod envelope;
pub mod errors;
pub mod gate;
pub mod middleware;
