use crate::top_rank::RankBucket;
use std::time::Duration;
use tracing::info;

/// What a run did, for the log. Nothing here feeds back into mining.
#[derive(Debug)]
pub struct RunStats {
    pub engine: &'static str,
    pub transactions: usize,
    pub frequent_items: usize,
    pub items_without_weight: usize,
    pub avg_transaction_length: f64,
    pub itemsets_reported: usize,
    pub search_time: Duration,
    pub peak_memory_mib: Option<f64>,
}

pub fn count_itemsets(buckets: &[RankBucket]) -> usize {
    buckets.iter().map(|bucket| bucket.itemsets.len()).sum()
}

impl RunStats {
    pub fn log(&self) {
        info!("Engine: {}", self.engine);
        info!("Transactions: {}", self.transactions);
        info!("Frequent 1-items: {}", self.frequent_items);
        info!("Items without a weight: {}", self.items_without_weight);
        info!("Average transaction length: {:.2}", self.avg_transaction_length);
        info!("Itemsets reported: {}", self.itemsets_reported);
        info!("Search time: {} ms", self.search_time.as_millis());
        match self.peak_memory_mib {
            Some(mib) => info!("Peak memory: {:.2} MiB", mib),
            None => info!("Peak memory: unavailable"),
        }
    }
}
