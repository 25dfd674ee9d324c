//! Verify a handful of well-known squares and show how they normalize.
//!
//! Usage: cargo run --example check_examples

use magic_square::{MagicSquare, PatternType};
use tracing_subscriber::EnvFilter;

const EXAMPLES: &[&[i32]] = &[
    &[8, 1, 6, 3, 5, 7, 4, 9, 2],
    &[
        16, 14, 7, 30, 23, 24, 17, 10, 8, 31, 32, 25, 18, 11, 4, 5, 28, 26, 19, 12, 13, 6, 29, 22,
        20,
    ],
    &[
        1, 35, 4, 33, 32, 6, 25, 11, 9, 28, 8, 30, 24, 14, 18, 16, 17, 22, 13, 23, 19, 21, 20, 15,
        12, 26, 27, 10, 29, 7, 36, 2, 34, 3, 5, 31,
    ],
    &[
        35, 26, 17, 1, 62, 53, 44, 46, 37, 21, 12, 3, 64, 55, 57, 41, 32, 23, 14, 5, 66, 61, 52,
        43, 34, 25, 16, 7, 2, 63, 54, 45, 36, 27, 11, 13, 4, 65, 56, 47, 31, 22, 24, 15, 6, 67, 51,
        42, 33,
    ],
    &[
        60, 53, 44, 37, 4, 13, 20, 29, 3, 14, 19, 30, 59, 54, 43, 38, 58, 55, 42, 39, 2, 15, 18,
        31, 1, 16, 17, 32, 57, 56, 41, 40, 61, 52, 45, 36, 5, 12, 21, 28, 6, 11, 22, 27, 62, 51, 46,
        35, 63, 50, 47, 34, 7, 10, 23, 26, 8, 9, 24, 25, 64, 49, 48, 33,
    ],
    &[2, 7, 6, 9, 5, 1, 4, 3, 8],
    &[16, 3, 2, 13, 5, 10, 11, 8, 9, 6, 7, 12, 4, 15, 14, 1],
    &[12, 3, 13, 6, 2, 7, 9, 16, 15, 10, 8, 1, 5, 4, 14, 11],
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    for (i, &cells) in EXAMPLES.iter().enumerate() {
        let mut sq = MagicSquare::new(format!("ms{i}"));
        if let Err(e) = sq.list_square(cells) {
            eprintln!("ms{i}: {e}");
            continue;
        }
        println!("{sq}");
        if sq.check_ms() {
            println!("magic, constant {}", sq.constant());
        } else {
            println!("not magic");
        }
        let pattern = sq.patternize(Some(PatternType::Median));
        println!("median pattern:\n{pattern}\n");
    }
}
