//! Stats module - aggregate queries and distribution summaries

mod aggregator;
mod calculator;

pub use aggregator::{
    Aggregator, CountyFilter, FatalityNarrative, FatalityNarratives, OverviewRow, SummaryTotals,
    ALL_COUNTIES, DEFAULT_TOP_COUNTIES,
};
pub use calculator::{BoxStats, DescriptiveStats, StatsCalculator, WHISKER_IQR_FACTOR};
