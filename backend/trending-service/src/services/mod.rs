pub mod trending;

pub use trending::{RankingConfig, RankingService};
