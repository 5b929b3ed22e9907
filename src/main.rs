mod candidate;
mod command_line_args;
mod diffset;
mod encoder;
mod error;
mod item;
mod itemset;
mod memory;
mod pp_tree;
mod report;
mod stats;
mod top_rank;
mod transaction_reader;
mod vec_sets;
mod weight_reader;
mod weighting;

use crate::command_line_args::{parse_args_or_exit, Arguments, Engine};
use crate::diffset::DiffsetEncoder;
use crate::encoder::{Encoder, PrefixTreeEncoder};
use crate::error::MineError;
use crate::memory::MemorySampler;
use crate::report::write_report;
use crate::stats::{count_itemsets, RunStats};
use crate::top_rank::{mine_top_rank_k, RankBucket};
use crate::transaction_reader::read_transactions;
use crate::weight_reader::read_weights;
use crate::weighting::{rank_items, weigh_transactions, ItemRanking, WeightedDatabase};

use std::process;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn search<E: Encoder>(
    db: &WeightedDatabase,
    ranking: &ItemRanking,
    rank: usize,
    memory: &mut MemorySampler,
) -> (&'static str, Vec<RankBucket>, Duration) {
    let timer = Instant::now();
    let (encoder, seeds) = E::encode(db, ranking);
    memory.sample();
    info!(
        "Encoded {} frequent items with the {} encoder in {} ms",
        seeds.len(),
        encoder.name(),
        timer.elapsed().as_millis()
    );
    let buckets = mine_top_rank_k(&encoder, ranking, seeds, rank, memory);
    (encoder.name(), buckets, timer.elapsed())
}

fn mine_weighted_itemsets(args: &Arguments) -> Result<RunStats, MineError> {
    info!("Mining data set: {}", args.transactions_path);
    let mut memory = MemorySampler::new();

    let timer = Instant::now();
    let transactions = read_transactions(&args.transactions_path)?;
    let weights = read_weights(&args.weights_path)?;
    info!(
        "Read {} transactions and {} item weights in {} ms",
        transactions.len(),
        weights.len(),
        timer.elapsed().as_millis()
    );

    let db = weigh_transactions(transactions, &weights);
    let ranking = rank_items(&db);
    info!(
        "Total transaction weight {}; {} weighted items, {} item occurrences without a weight",
        db.ttw,
        ranking.len(),
        db.missing_weights
    );

    info!("Searching for the top {} ranks...", args.rank);
    let (engine, buckets, search_time) = match args.engine {
        Engine::Tree => search::<PrefixTreeEncoder>(&db, &ranking, args.rank, &mut memory),
        Engine::Diffset => search::<DiffsetEncoder>(&db, &ranking, args.rank, &mut memory),
    };
    info!(
        "Found {} ranks in {} ms",
        buckets.len(),
        search_time.as_millis()
    );

    write_report(&args.output_path, &buckets)?;
    info!("Wrote {}", args.output_path);

    Ok(RunStats {
        engine,
        transactions: db.num_transactions(),
        frequent_items: ranking.len(),
        items_without_weight: db.missing_items,
        avg_transaction_length: db.average_transaction_length(),
        itemsets_reported: count_itemsets(&buckets),
        search_time,
        peak_memory_mib: memory.peak_mib(),
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let arguments = parse_args_or_exit();

    match mine_weighted_itemsets(&arguments) {
        Ok(stats) => stats.log(),
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}
