pub mod alert;
pub mod config;
pub mod ledger;
pub mod routes;
pub mod scoring;
pub mod text;

pub use alert::{MissAlertSink, TracingAlertSink};
pub use ledger::SignalDetectionLedger;
pub use scoring::RiskScorer;
