use crate::candidate::generate_candidates;
use crate::encoder::Encoder;
use crate::item::Item;
use crate::itemset::{below_threshold, ranking_order, same_support, Itemset};
use crate::memory::MemorySampler;
use crate::weighting::ItemRanking;
use tracing::debug;

/// One distinct weighted support and every itemset found with it.
#[derive(Clone, Debug, PartialEq)]
pub struct RankBucket {
    pub ws: f64,
    pub itemsets: Vec<Vec<Item>>,
}

impl RankBucket {
    fn new<O>(itemset: &Itemset<O>) -> RankBucket {
        RankBucket {
            ws: itemset.ws,
            itemsets: vec![itemset.items.clone()],
        }
    }

    fn add<O>(&mut self, itemset: &Itemset<O>) {
        self.itemsets.push(itemset.items.clone());
    }
}

/// The ranked buckets, descending by ws, holding at most `rank` of them.
pub struct TopRankK {
    rank: usize,
    buckets: Vec<RankBucket>,
}

impl TopRankK {
    pub fn new(rank: usize) -> TopRankK {
        TopRankK {
            rank,
            buckets: vec![],
        }
    }

    pub fn is_full(&self) -> bool {
        self.buckets.len() >= self.rank
    }

    /// The lowest ws still held once all `rank` buckets exist; until then
    /// nothing is turned away.
    pub fn threshold(&self) -> f64 {
        match self.buckets.last() {
            Some(lowest) if self.is_full() => lowest.ws,
            _ => 0.0,
        }
    }

    pub fn buckets(&self) -> &[RankBucket] {
        &self.buckets
    }

    pub fn into_buckets(self) -> Vec<RankBucket> {
        self.buckets
    }

    /// Fills buckets from the 1-itemsets, which must be in ranking order.
    /// Returns the itemsets taken, which are the first pool to extend.
    pub fn seed<O>(&mut self, seeds: Vec<Itemset<O>>) -> Vec<Itemset<O>> {
        let mut pool = vec![];
        for itemset in seeds {
            match self.buckets.last_mut() {
                Some(last) if same_support(last.ws, itemset.ws) => last.add(&itemset),
                _ => {
                    if self.is_full() {
                        break;
                    }
                    self.buckets.push(RankBucket::new(&itemset));
                }
            }
            pool.push(itemset);
        }
        pool
    }

    /// Merges one round of candidates, sorted in ranking order, into the
    /// buckets. Returns the candidates that made it in, which are the
    /// next pool.
    pub fn merge<O>(&mut self, candidates: Vec<Itemset<O>>) -> Vec<Itemset<O>> {
        let mut pool = vec![];
        let mut candidates = candidates.into_iter().peekable();
        let mut i = 0;
        while i < self.buckets.len() {
            let ws = match candidates.peek() {
                Some(candidate) => candidate.ws,
                None => break,
            };
            if same_support(ws, self.buckets[i].ws) {
                if let Some(candidate) = candidates.next() {
                    self.buckets[i].add(&candidate);
                    pool.push(candidate);
                }
            } else if ws > self.buckets[i].ws {
                if let Some(candidate) = candidates.next() {
                    self.buckets.insert(i, RankBucket::new(&candidate));
                    if self.buckets.len() > self.rank {
                        self.buckets.pop();
                    }
                    pool.push(candidate);
                }
            } else {
                i += 1;
            }
        }

        // Whatever is left ranks below every bucket; it opens new ones
        // while there's room.
        for candidate in candidates {
            match self.buckets.last_mut() {
                Some(last) if same_support(last.ws, candidate.ws) => last.add(&candidate),
                _ => {
                    if self.is_full() {
                        break;
                    }
                    self.buckets.push(RankBucket::new(&candidate));
                }
            }
            pool.push(candidate);
        }

        // Nothing below the threshold is worth extending.
        let threshold = self.threshold();
        pool.retain(|itemset| !below_threshold(itemset.ws, threshold));
        pool
    }
}

/// Runs the level-wise top-rank-k search over `seeds`, the 1-itemsets in
/// ranking order.
pub fn mine_top_rank_k<E: Encoder>(
    encoder: &E,
    ranking: &ItemRanking,
    seeds: Vec<Itemset<E::Occurrences>>,
    rank: usize,
    memory: &mut MemorySampler,
) -> Vec<RankBucket> {
    let mut top = TopRankK::new(rank);
    let mut pool = top.seed(seeds);
    let mut length = 1;
    while !pool.is_empty() {
        let threshold = top.threshold();
        let mut candidates = generate_candidates(encoder, ranking, &pool, threshold);
        candidates.sort_by(ranking_order);
        let num_candidates = candidates.len();
        let num_parents = pool.len();
        pool = top.merge(candidates);
        memory.sample();
        debug!(
            "Length {} itemsets: {} candidates from a pool of {}, {} kept; \
             {} buckets, threshold {}",
            length + 1,
            num_candidates,
            num_parents,
            pool.len(),
            top.buckets().len(),
            threshold
        );
        length += 1;
    }
    top.into_buckets()
}
