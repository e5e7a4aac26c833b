//! API clients for external services
//!
//! - CMS: movie catalog and nested reviews from the headless content API

pub mod cms;

pub use cms::{CmsClient, CmsError};
