//! Show which cyclic rolls of a square keep it magic.
//!
//! Usage: cargo run --example roll_map -- [size]
//!
//! Rolls the square down by `i` and right by `j` for every `i, j < size`
//! (default 5) and prints a map where `██` marks a magic result.

use magic_square::MagicSquare;
use std::env;
use tracing_subscriber::EnvFilter;

// Every row sums to 34, the columns do not.
const SQUARE: [i32; 16] = [12, 3, 13, 6, 2, 7, 9, 16, 15, 10, 8, 1, 5, 4, 14, 11];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let size: i64 = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(5);

    let mut base = MagicSquare::new("ms");
    if let Err(e) = base.list_square(&SQUARE) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let mut map = Vec::new();
    for down in 0..size {
        let mut row = Vec::new();
        for right in 0..size {
            let mut rolled = (&base << down) >> right;
            let magic = rolled.check_ms();
            println!("{rolled}\n{magic}");
            row.push(if magic { "██" } else { "  " });
        }
        map.push(row);
    }

    println!("\nrolls rightward ( x axis → )\nrolls downward ( y axis ↓ )");
    for row in &map {
        println!("[{}]", row.join("|"));
    }
    println!("██ means the rolled square is still magic");
}
