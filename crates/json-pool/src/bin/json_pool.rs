//! `json-pool` — flatten JSON files into a kernel pool and dump it.
//!
//! Usage:
//!   json-pool <file.json> [<file.json> ...]
//!
//! Each file is flattened under the `json` root prefix and dumped to
//! stdout, followed by the dump of an independent deep copy.

use std::io::{self, Write};

use json_pool::Pool;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: json-pool <file.json> [<file.json> ...]");
        std::process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for path in &args[1..] {
        let pool = match Pool::from_json_file(path) {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("{path}: {e}");
                std::process::exit(1);
            }
        };
        pool.dump(&mut out).unwrap();

        let copy = match pool.try_copy() {
            Some(copy) => copy,
            None => {
                eprintln!("{path}: failed to copy pool");
                std::process::exit(1);
            }
        };
        writeln!(out, "{}", "#".repeat(71)).unwrap();
        copy.dump(&mut out).unwrap();
    }
}
