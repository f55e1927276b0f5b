//! Supervised hidden Markov model tagger.
//!
//! A [`Trainer`] estimates transition and emission tables from a corpus of
//! labeled sequences by counting, optionally with add-one smoothing. The
//! resulting [`Model`] hands out [`Tagger`]s that run Viterbi decoding in the
//! log domain.
//!
//! ```
//! use hmmtag::{Sequence, Trainer};
//!
//! let corpus = vec![
//!     Sequence::from_iter([("The", "DET"), ("cat", "NOUN"), ("sleeps", "VERB")]),
//!     Sequence::from_iter([("A", "DET"), ("dog", "NOUN"), ("barks", "VERB")]),
//! ];
//! let model = Trainer::new(true).train(&corpus);
//! let tagger = model.tagger();
//! let tags = tagger.tag(&["The", "dog", "sleeps"]).unwrap();
//! assert_eq!(tags, ["DET", "NOUN", "VERB"]);
//! ```

pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod quark;

pub use crate::dataset::{Dataset, Sequence};
pub use crate::error::{Error, Result};
pub use crate::evaluation::{Estimation, Evaluation};
pub use crate::hmm::model::Model;
pub use crate::hmm::table::Table;
pub use crate::hmm::tagger::Tagger;
pub use crate::hmm::trainer::Trainer;
pub use crate::hmm::{DEFAULT_EPSILON, END, START};
pub use crate::quark::{Quark, StringTable};
