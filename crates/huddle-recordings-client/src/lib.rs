//! # Huddle Recordings Client
//!
//! Request gateway for the huddle recordings API: builds authenticated requests,
//! retries transient failures with exponential backoff, and normalizes every
//! failure mode into a single [`ClientError`].

pub mod config;
pub mod error;
pub mod gateway;
pub mod recordings;
pub mod retry;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use gateway::ApiGateway;
pub use recordings::{ListRecordingsQuery, RecordingId};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
