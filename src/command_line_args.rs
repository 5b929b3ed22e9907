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

use std::env;
use std::fmt;
use std::io;
use std::process;
use std::str::FromStr;

use argparse::{ArgumentParser, Store};

/// Which occurrence encoding the search runs over.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Engine {
    Tree,
    Diffset,
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Engine, String> {
        match s {
            "tree" => Ok(Engine::Tree),
            "diffset" => Ok(Engine::Diffset),
            _ => Err(format!("Unknown engine {:?}; expected tree or diffset", s)),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Engine::Tree => write!(f, "tree"),
            Engine::Diffset => write!(f, "diffset"),
        }
    }
}

pub struct Arguments {
    pub transactions_path: String,
    pub weights_path: String,
    pub output_path: String,
    pub rank: usize,
    pub engine: Engine,
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        transactions_path: String::new(),
        weights_path: String::new(),
        output_path: String::new(),
        rank: 0,
        engine: Engine::Tree,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Top-rank-k frequent weighted itemset mining.");

        parser
            .refer(&mut args.transactions_path)
            .add_option(
                &["--transactions"],
                Store,
                "Transaction file; one transaction of space separated item ids per line.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.weights_path)
            .add_option(
                &["--weights"],
                Store,
                "Weight file; line N holds the weight of item N.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store the ranked itemsets. \
                 Format: rank, itemsets, weighted support.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.rank)
            .add_option(
                &["--rank"],
                Store,
                "Number of distinct weighted support values to report, at least 1.",
            )
            .metavar("k")
            .required();

        parser
            .refer(&mut args.engine)
            .add_option(
                &["--engine"],
                Store,
                "Occurrence encoding to mine with: tree (default) or diffset.",
            )
            .metavar("engine");

        if env::args().count() == 1 {
            if let Err(err) = parser.print_help("Usage:", &mut io::stderr()) {
                eprintln!("{}", err);
            }
            process::exit(1);
        }

        match parser.parse_args() {
            Ok(()) => {}
            Err(err) => {
                process::exit(err);
            }
        }
    }

    if args.rank < 1 {
        eprintln!("Rank must be at least 1");
        process::exit(1);
    }

    args
}
