use crate::error::MineError;
use crate::item::Item;
use crate::top_rank::RankBucket;
use itertools::Itertools;
use std::fs::File;
use std::io::Write;

const SEPARATOR_WIDTH: usize = 115;

fn row(rank: &str, itemsets: &str, ws: &str) -> String {
    format!("|{:<10}|{:<90}|{:>2}\n", rank, itemsets, ws)
}

fn bucket_itemsets(bucket: &RankBucket) -> String {
    bucket
        .itemsets
        .iter()
        .map(|items| format!("{{{}}}", Item::item_vec_to_string(items)))
        .join(" ")
}

/// Renders the ranked buckets as a fixed-width table, one row per bucket.
pub fn render_report(buckets: &[RankBucket]) -> String {
    let mut report = row("Rank", "Itemset", "Ws");
    report.push_str(&"-".repeat(SEPARATOR_WIDTH));
    report.push('\n');
    for (index, bucket) in buckets.iter().enumerate() {
        report.push_str(&row(
            &(index + 1).to_string(),
            &bucket_itemsets(bucket),
            &bucket.ws.to_string(),
        ));
    }
    report
}

pub fn write_report(path: &str, buckets: &[RankBucket]) -> Result<(), MineError> {
    let report = render_report(buckets);
    let mut output = File::create(path).map_err(|e| MineError::io(path, e))?;
    output
        .write_all(report.as_bytes())
        .map_err(|e| MineError::io(path, e))?;
    output.flush().map_err(|e| MineError::io(path, e))
}
