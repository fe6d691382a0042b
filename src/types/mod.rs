pub mod history;
pub mod indicator;
pub mod metrics;
pub mod score;
pub mod signal;

pub use history::*;
pub use indicator::*;
pub use metrics::*;
pub use score::*;
pub use signal::*;
