// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::MineError;
use crate::item::Item;
use fnv::FnvHashSet;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

/// One line of the transaction file. The id is the 1-based line number.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: usize,
    pub items: Vec<Item>,
}

pub struct TransactionReader<R> {
    reader: R,
    path: String,
    line_number: usize,
}

impl TransactionReader<BufReader<File>> {
    pub fn open(path: &str) -> Result<TransactionReader<BufReader<File>>, MineError> {
        let file = File::open(path).map_err(|e| MineError::io(path, e))?;
        Ok(TransactionReader::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R, path: &str) -> TransactionReader<R> {
        TransactionReader {
            reader,
            path: String::from(path),
            line_number: 0,
        }
    }

    fn parse_line(&self, line: &str) -> Result<Vec<Item>, MineError> {
        let mut items = Vec::new();
        for token in line.split_whitespace() {
            match token.parse::<u32>() {
                Ok(id) if id > 0 => items.push(Item::with_id(id)),
                _ => return Err(MineError::parse(&self.path, self.line_number, line.trim())),
            }
        }
        // Some input files have transactions with duplicates items.
        // Remove any duplicates here.
        dedupe_keep_first(&mut items);
        Ok(items)
    }
}

impl<R: BufRead> Iterator for TransactionReader<R> {
    type Item = Result<Transaction, MineError>;
    fn next(&mut self) -> Option<Result<Transaction, MineError>> {
        let mut bytes = Vec::new();
        loop {
            bytes.clear();
            let len = match self.reader.read_until(b'\n', &mut bytes) {
                Ok(len) => len,
                Err(e) => return Some(Err(MineError::io(&self.path, e))),
            };
            if len == 0 {
                return None;
            }
            self.line_number += 1;
            let line = match decode_line(&self.path, self.line_number, &bytes) {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            // Blank lines hold no transaction but still use up an id.
            if line.trim().is_empty() {
                continue;
            }
            let id = self.line_number;
            return Some(self.parse_line(&line).map(|items| Transaction { id, items }));
        }
    }
}

/// A line of an input file as text; bytes that aren't UTF-8 are a parse
/// error on that line.
pub fn decode_line(path: &str, line_number: usize, bytes: &[u8]) -> Result<String, MineError> {
    match String::from_utf8(bytes.to_vec()) {
        Ok(line) => Ok(line),
        Err(_) => {
            let lossy = String::from_utf8_lossy(bytes);
            Err(MineError::parse(path, line_number, lossy.trim()))
        }
    }
}

pub fn read_transactions(path: &str) -> Result<Vec<Transaction>, MineError> {
    TransactionReader::open(path)?.collect()
}

// Unlike a sort+dedup this keeps the order items were read in.
fn dedupe_keep_first(v: &mut Vec<Item>) {
    let mut seen: FnvHashSet<Item> = FnvHashSet::default();
    v.retain(|item| seen.insert(*item));
}
