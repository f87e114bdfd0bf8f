//! tmcrun - local test run results and exercise notifications
//!
//! Two small coordination cores for an exercise-submission client:
//! - results: joins a concurrent test run and code style run for one
//!   exercise into a single rendering of results and a submission verdict
//! - notify: tells the user, once and without stacking, about exercises that
//!   are downloaded but not opened

pub mod background;
pub mod course;
pub mod domain;
pub mod error;
pub mod notify;
pub mod results;

pub use error::{Result, TmcError};
