pub mod bucket;
pub mod registry;

pub use bucket::TokenBucket;
pub use registry::{spawn_sweeper, RateLimiterConfig, RateLimiterRegistry, SweeperHandle};
