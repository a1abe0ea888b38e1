pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod player;
pub mod scanner;
pub mod session;
pub mod utils;

pub use config::AppConfig;
pub use convert::{ConvertJob, ConvertOutcome, Profile};
pub use error::Error;
pub use session::{Clip, CommitOutcome, ReviewStatus, Session};
