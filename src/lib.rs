//! Client for the Church Community Builder (CCB) XML API.
//!
//! A request value is routed to a CCB service, the service call is POSTed
//! through a [`Transport`], and the XML answer is bound onto typed records.
//! Errors that CCB reports inside a successful HTTP response surface as
//! [`CcbError::ServiceError`].

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::HttpTransport;
pub use config::ClientConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use crate::core::{binder::Envelope, client::CcbClient, router::ApiRequest};
pub use domain::model::*;
pub use domain::ports::{ConfigProvider, ResponseStream, Transport};
pub use domain::request::*;
pub use utils::error::{CcbError, ErrorCategory, Result};
