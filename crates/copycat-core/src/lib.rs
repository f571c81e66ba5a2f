pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod progress;
pub mod report;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{DetectionEngine, DetectionResult};
pub use error::Error;
pub use model::{Cluster, Corpus, ScoredPair, SubmissionFolder};
pub use progress::{ProgressReporter, SilentReporter};
