mod system;

pub use system::{ProbeError, SystemPing};

use std::time::Duration;

/// Extra time the ping process gets past its own deadline before it is killed
pub const PROCESS_GRACE: Duration = Duration::from_secs(1);
