pub mod weighted;

pub use weighted::WeightedScoreAggregator;
