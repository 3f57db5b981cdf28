pub mod aggregate;
pub mod assemble;
pub mod cache;
pub mod clock;
pub mod fallback;
pub mod paginate;
pub mod relative_time;
pub mod service;

pub use aggregate::Aggregator;
pub use cache::{MemoryPageCache, PageKey, ResponseCache};
pub use clock::{Clock, SystemClock};
pub use paginate::{paginate, sort_reviews, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use relative_time::format_relative_time;
pub use service::ReviewService;
