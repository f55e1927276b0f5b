use std::time::Instant;

use crate::{
    dataset::Sequence,
    error::{Error, Result},
    hmm::{model::Model, table::Counts, END, START},
    quark::{Quark, StringTable, TextVectorizer},
};

/// Closed symbol sets discovered in the first pass over a corpus, along with
/// the corpus rewritten as `(tag id, observation id)` pairs.
#[derive(Debug, Default)]
struct Symbols {
    tags: Quark,
    vocab: Quark,
    encoded: Vec<Vec<(usize, usize)>>,
}

impl Symbols {
    fn collect(seqs: &[Sequence]) -> Self {
        let mut this = Self::default();
        for seq in seqs.iter().filter(|s| !s.is_empty()) {
            let ids = seq
                .iter()
                .map(|(obs, tag)| (this.tags.find_or_insert(tag), this.vocab.find_or_insert(obs)))
                .collect();
            this.encoded.push(ids);
        }
        this
    }

    /// Transition rows: START followed by every tag.
    fn prev_tags(&self, any: bool) -> Quark {
        let mut q = Quark::default();
        if any {
            q.find_or_insert(START);
        }
        for tag in self.tags.iter() {
            q.find_or_insert(tag);
        }
        q
    }

    /// Transition columns: every tag followed by END.
    fn next_tags(&self, any: bool) -> Quark {
        let mut q = self.tags.clone();
        if any {
            q.find_or_insert(END);
        }
        q
    }
}

/// Supervised estimator: counts transitions and emissions over a labeled
/// corpus and normalizes them, optionally with add-one smoothing.
#[derive(Debug, Clone)]
pub struct Trainer {
    smoothing: bool,
}

impl Default for Trainer {
    fn default() -> Self {
        Self { smoothing: true }
    }
}

impl Trainer {
    pub fn new(smoothing: bool) -> Self {
        Self { smoothing }
    }

    pub fn smoothing(&self) -> bool {
        self.smoothing
    }

    /// Sets a parameter by name, e.g. `smoothing=0`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let invalid = || Error::InvalidParam {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name {
            "smoothing" | "laplace" => {
                self.smoothing = match value {
                    "1" | "true" | "yes" | "on" => true,
                    "0" | "false" | "no" | "off" => false,
                    _ => return Err(invalid()),
                };
                Ok(())
            }
            _ => Err(invalid()),
        }
    }

    pub fn train(&self, seqs: &[Sequence]) -> Model {
        let begin = Instant::now();
        let skipped = seqs.iter().filter(|s| s.is_empty()).count();
        if skipped > 0 {
            log::warn!("skipping {skipped} empty sequences");
        }
        let symbols = Symbols::collect(seqs);
        let any = !symbols.encoded.is_empty();
        log::info!(
            "train (N: {}, T: {}, V: {}, smoothing: {})",
            symbols.encoded.len(),
            symbols.tags.len(),
            symbols.vocab.len(),
            self.smoothing
        );

        let mut trans = Counts::zeroed(symbols.prev_tags(any), symbols.next_tags(any));
        let mut emit = Counts::zeroed(symbols.tags.clone(), symbols.vocab.clone());

        // Transition rows are [START, tags...] and columns [tags..., END], so a
        // tag id maps to row id + 1 and column id unchanged.
        let end = symbols.tags.len();
        for seq in &symbols.encoded {
            let mut prev = 0;
            for &(t, o) in seq {
                emit.add(t, o);
                trans.add(prev, t);
                prev = t + 1;
            }
            trans.add(prev, end);
        }

        let model = Model::new(
            trans.normalize(self.smoothing),
            emit.normalize(self.smoothing),
            symbols.tags,
            symbols.vocab,
        );
        log::info!("training done, time cost: {:?}", begin.elapsed());
        model
    }
}
