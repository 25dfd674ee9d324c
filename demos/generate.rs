//! Print the Siamese magic square of a given odd order.
//!
//! Usage: cargo run --example generate -- <n>
//!
//! Even orders are bumped to the next odd one.
//!
//! Example:
//!   cargo run --example generate -- 7

use magic_square::MagicSquare;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let n: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("Usage: {} <n>", args[0]);
        std::process::exit(1);
    });

    match MagicSquare::siamese(format!("siamese {n}"), n) {
        Ok(sq) => {
            println!("{sq}");
            println!("constant: {}", sq.constant());
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
