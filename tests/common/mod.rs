#![allow(dead_code)]

use std::fs::File;

use hmmtag::{Dataset, Sequence};

pub const POS_DATA: &str = "tests/data/pos.txt";

pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

pub fn pos_corpus() -> Dataset {
    let f = File::open(POS_DATA).expect("failed to open file");
    Dataset::try_from(f).expect("failed to read file")
}

/// Corpus where DET always precedes NOUN and NOUN always precedes VERB, and
/// "meows" never occurs.
pub fn det_noun_verb() -> Vec<Sequence> {
    [
        ["The", "cat", "sleeps"],
        ["A", "dog", "barks"],
        ["The", "dog", "sleeps"],
        ["Your", "cat", "runs"],
        ["A", "bird", "chirps"],
    ]
    .iter()
    .map(|words| words.iter().copied().zip(["DET", "NOUN", "VERB"]).collect())
    .collect()
}
