mod common;

use hmmtag::{Error, Model, StringTable, Trainer};

fn pos_model(smoothing: bool) -> Model {
    common::init_logger();
    Trainer::new(smoothing).train(&common::pos_corpus().seqs)
}

/// Every tag path of `len` items, in lexicographic order of tag ids.
fn all_paths(model: &Model, len: usize) -> Vec<Vec<String>> {
    let tags: Vec<String> = model.tags().iter().map(str::to_string).collect();
    let mut paths = vec![vec![]];
    for _ in 0..len {
        paths = paths
            .into_iter()
            .flat_map(|p: Vec<String>| {
                tags.iter().map(move |t| {
                    let mut p = p.clone();
                    p.push(t.clone());
                    p
                })
            })
            .collect();
    }
    paths
}

#[test]
fn structure_dominates_unseen_word() {
    let model = Trainer::new(true).train(&common::det_noun_verb());
    assert!(!model.vocabulary().contains("meows"));
    let (tags, log_prob) = model.tagger().viterbi(&["The", "cat", "meows"]).unwrap();
    assert_eq!(tags, ["DET", "NOUN", "VERB"]);
    assert!(log_prob.is_finite());
}

#[test]
fn tag_test_sentences() {
    let model = pos_model(true);
    let tagger = model.tagger();
    let (tags, log_prob) = tagger.viterbi(&["The", "cat", "meows"]).unwrap();
    assert_eq!(tags, ["DET", "NOUN", "VERB"]);
    assert!((log_prob - -7.944789816853545).abs() < 1e-9, "{log_prob}");

    let (tags, log_prob) = tagger.viterbi(&["My", "dog", "barks", "loudly"]).unwrap();
    assert_eq!(tags, ["DET", "NOUN", "VERB", "ADV"]);
    assert!((log_prob - -11.987841084688094).abs() < 1e-9, "{log_prob}");
}

#[test]
fn output_has_input_length() {
    let model = pos_model(true);
    let tagger = model.tagger();
    let words = ["The", "bird", "sings", "sweetly", "and", "the", "dog", "barks"];
    for n in 1..=words.len() {
        let tags = tagger.tag(&words[..n]).unwrap();
        assert_eq!(tags.len(), n);
        assert!(tags.iter().all(|t| model.tags().contains(t)));
    }
}

#[test]
fn all_unseen_words() {
    let model = pos_model(true);
    let (tags, log_prob) = model.tagger().viterbi(&["zz", "yy", "xx"]).unwrap();
    assert_eq!(tags, ["DET", "NOUN", "VERB"]);
    assert!(log_prob.is_finite());
    assert!((log_prob - -43.32289590250226).abs() < 1e-9, "{log_prob}");
}

#[test]
fn repeated_decoding_is_identical() {
    let model = pos_model(true);
    let tagger = model.tagger();
    let xseq = ["A", "dog", "runs", "fast"];
    let first = tagger.viterbi(&xseq).unwrap();
    for _ in 0..10 {
        assert_eq!(tagger.viterbi(&xseq).unwrap(), first);
    }
}

#[test]
fn viterbi_matches_exhaustive_search() {
    let model = pos_model(true);
    let tagger = model.tagger();
    for xseq in [vec!["The", "cat", "meows"], vec!["sleeps", "A", "fast"], vec!["bird"]] {
        let (best, log_prob) = tagger.viterbi(&xseq).unwrap();
        assert!((tagger.score(&xseq, &best).unwrap() - log_prob).abs() < 1e-9);
        let max = all_paths(&model, xseq.len())
            .iter()
            .map(|path| tagger.score(&xseq, path).unwrap())
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((max - log_prob).abs() < 1e-9, "{max} != {log_prob}");
    }
}

#[test]
fn zero_probabilities_without_smoothing() {
    let model = pos_model(false);
    let tagger = model.tagger();
    let (tags, log_prob) = tagger.viterbi(&["The", "cat", "meows"]).unwrap();
    assert_eq!(tags, ["DET", "NOUN", "VERB"]);
    assert!((log_prob - -4.511103676949024).abs() < 1e-9, "{log_prob}");

    let (tags, _) = tagger.viterbi(&["The", "zz", "sings", "fast"]).unwrap();
    assert_eq!(tags, ["DET", "NOUN", "VERB", "ADV"]);

    // no path has nonzero probability: still a full-length answer
    let (tags, log_prob) = tagger.viterbi(&["sleeps", "The"]).unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(log_prob, f64::NEG_INFINITY);
}

#[test]
fn empty_sequence_is_rejected() {
    let model = pos_model(true);
    let empty: [&str; 0] = [];
    assert!(matches!(model.tagger().viterbi(&empty), Err(Error::EmptySequence)));
    assert!(matches!(model.tagger().score(&empty, &empty), Err(Error::EmptySequence)));
}

#[test]
fn empty_model_is_rejected() {
    let model = Trainer::default().train(&[]);
    assert!(matches!(model.tagger().tag(&["The"]), Err(Error::EmptyModel)));
}

#[test]
fn score_rejects_length_mismatch() {
    let model = pos_model(true);
    let err = model.tagger().score(&["The", "cat"], &["DET"]).unwrap_err();
    assert!(matches!(
        err,
        Error::LengthMismatch {
            observations: 2,
            tags: 1
        }
    ));
}

#[test]
fn score_rejects_sentinel_tags() {
    let model = pos_model(true);
    let tagger = model.tagger();
    let err = tagger
        .score(&["The", "cat", "sleeps"], &["DET", "<E>", "VERB"])
        .unwrap_err();
    assert!(matches!(err, Error::SentinelInPath { position: 1, tag } if tag == hmmtag::END));
    let err = tagger.score(&["The", "cat"], &["<S>", "NOUN"]).unwrap_err();
    assert!(matches!(err, Error::SentinelInPath { position: 0, .. }));
}

#[test]
fn known_tag_path_scores_like_decoder() {
    let model = pos_model(true);
    let tagger = model.tagger();
    let (best, log_prob) = tagger.viterbi(&["The", "cat", "meows"]).unwrap();
    let score = tagger.score(&["The", "cat", "meows"], &best).unwrap();
    assert!((score - log_prob).abs() < 1e-12, "{score} {log_prob}");
}

#[test]
fn unknown_tags_score_with_epsilon() {
    let model = pos_model(true);
    let tagger = model.tagger().with_epsilon(0.5).unwrap();
    let score = tagger.score(&["The"], &["PRON"]).unwrap();
    assert!((score - 3.0 * 0.5f64.ln()).abs() < 1e-12);
}

#[test]
fn epsilon_parameter() {
    let model = pos_model(true);
    let mut tagger = model.tagger();
    assert_eq!(tagger.epsilon(), hmmtag::DEFAULT_EPSILON);
    tagger.set("epsilon", "1e-8").unwrap();
    assert_eq!(tagger.epsilon(), 1e-8);
    assert!(matches!(tagger.set("epsilon", "0"), Err(Error::InvalidParam { .. })));
    assert!(matches!(tagger.set("epsilon", "abc"), Err(Error::InvalidParam { .. })));
    assert!(matches!(tagger.set("beam", "3"), Err(Error::InvalidParam { .. })));
    assert!(model.tagger().with_epsilon(1.5).is_err());
    assert_eq!(tagger.epsilon(), 1e-8);
    assert_eq!(tagger.labels().len(), 4);
}

#[test]
fn concurrent_decoding_shares_the_model() {
    let model = pos_model(true);
    let sentences = [
        vec!["The", "cat", "meows"],
        vec!["My", "dog", "barks", "loudly"],
        vec!["A", "bird", "chirps"],
        vec!["zz", "yy"],
    ];
    let expected: Vec<_> = sentences
        .iter()
        .map(|s| model.tagger().viterbi(s).unwrap())
        .collect();
    let model = &model;
    std::thread::scope(|scope| {
        let handles: Vec<_> = sentences
            .iter()
            .map(|s| scope.spawn(move || model.tagger().viterbi(s).unwrap()))
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}
