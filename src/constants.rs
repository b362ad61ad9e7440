// Constants module - centralized default values for configuration
//
// This module defines all default values used throughout the codebase.
// Using constants instead of magic numbers keeps the defaults in one place.

// =============================================================================
// Server defaults
// =============================================================================

/// Default number of worker threads for the HTTP service
pub const DEFAULT_THREADS: usize = 4;

/// Path of the plain-text counters endpoint
pub const STATUS_PATH: &str = "/_status";

/// Path of the version endpoint
pub const VERSION_PATH: &str = "/_version";

// =============================================================================
// Proxy defaults
// =============================================================================

/// Default origin fetch timeout in milliseconds
pub const DEFAULT_PROXY_TIMEOUT_MS: u64 = 1000;

/// Default max-requests hint (read and reported, never enforced)
pub const DEFAULT_MAX_REQUESTS: usize = 1000;

/// Upstream response headers starting with this prefix are forwarded (lowercase)
pub const FORWARDED_HEADER_PREFIX: &str = "x-";

// =============================================================================
// Image defaults
// =============================================================================

/// Default JPEG quality for the fallback encoder
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Default canvas color for contain-mode padding (white)
pub const DEFAULT_BACKGROUND_RGB: (u8, u8, u8) = (255, 255, 255);

/// Largest accepted target width
pub const DEFAULT_MAX_WIDTH: u32 = 4096;

/// Largest accepted target height
pub const DEFAULT_MAX_HEIGHT: u32 = 4096;

// =============================================================================
// Stats defaults
// =============================================================================

/// Default sliding window length in seconds
pub const DEFAULT_STAT_PERIOD_SECS: usize = 300;

/// Interval between two window snapshots
pub const STAT_TICK_INTERVAL_MS: u64 = 1000;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Service name reported to the remote log sink
pub const SERVICE_NAME: &str = "imgate";
