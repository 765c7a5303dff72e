pub mod filter;
pub mod stats;

pub use filter::filtered_view;
pub use stats::Statistics;
