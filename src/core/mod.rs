pub mod binder;
pub mod client;
pub mod router;
pub mod uri;

pub use crate::domain::ports::{ConfigProvider, ResponseStream, Transport};
pub use crate::utils::error::Result;
