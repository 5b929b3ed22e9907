use crate::error::MineError;
use crate::item::Item;
use crate::transaction_reader::decode_line;
use fnv::FnvHashMap;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

/// Weight of each item; the item id is the line number in the weight file.
pub struct WeightTable {
    weights: FnvHashMap<Item, f64>,
}

impl WeightTable {
    pub fn new() -> WeightTable {
        WeightTable {
            weights: FnvHashMap::default(),
        }
    }

    pub fn from_reader<R: BufRead>(reader: R, path: &str) -> Result<WeightTable, MineError> {
        let mut table = WeightTable::new();
        for (index, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes.map_err(|e| MineError::io(path, e))?;
            let line_number = index + 1;
            let line = decode_line(path, line_number, &bytes)?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            match text.parse::<f64>() {
                Ok(weight) if weight.is_finite() && weight > 0.0 => {
                    table.set(Item::with_id(line_number as u32), weight);
                }
                _ => return Err(MineError::parse(path, line_number, text)),
            }
        }
        Ok(table)
    }

    pub fn set(&mut self, item: Item, weight: f64) {
        self.weights.insert(item, weight);
    }

    pub fn get(&self, item: &Item) -> Option<f64> {
        self.weights.get(item).cloned()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }
}

pub fn read_weights(path: &str) -> Result<WeightTable, MineError> {
    let file = File::open(path).map_err(|e| MineError::io(path, e))?;
    WeightTable::from_reader(BufReader::new(file), path)
}
