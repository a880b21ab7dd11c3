// Library interface for vdotrs modules
// This allows the CLI, integration tests and benchmarks to share the engine

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod fitness;
pub mod logging;
pub mod models;
pub mod pace_zones;
pub mod race_prediction;
pub mod service;
pub mod specialty;
pub mod store;
pub mod training_log;
pub mod units;

// Re-export commonly used types for convenience
pub use models::*;
pub use config::AppConfig;
pub use engine::{PerformanceAnalysis, VdotEngine, VdotReport};
pub use error::{CalculationError, ErrorKind, ExportError, Result, VdotError};
pub use export::{export_report, export_report_to_file, ExportFormat, ReportContent};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use pace_zones::{PaceZoneTable, TrainingZone};
pub use race_prediction::RacePrediction;
pub use service::VdotService;
pub use specialty::{EventName, SpecialtyEvent, SpecialtyReport};
pub use store::{InMemoryStore, PerformanceStore};
pub use training_log::{MileageUnit, MonthlyMileage, Workout};
