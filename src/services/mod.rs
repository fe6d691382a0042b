//! Stateful collaborators around the pure scoring engine.

pub mod dashboard;
pub mod history;
pub mod notifier;

pub use dashboard::DashboardService;
pub use history::SignalHistory;
pub use notifier::SignalNotifier;
