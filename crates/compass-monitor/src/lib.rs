//! # compass-monitor — Health Checks and Monitoring Metrics
//!
//! Two aggregators over merchant compliance signals: the per-merchant
//! health check (penalty-based holistic score, issue list, next-audit-due
//! date, critical-issue alerting) and the dashboard metrics formula over
//! backlog sizes and active alert counts.

pub mod health;
pub mod metrics;

pub use health::{health_check, HealthCheck};
pub use metrics::{metrics_score, monitoring_metrics, MonitoringMetrics};
