use std::collections::HashSet;
use wordle_entropy::entropy::rank_cancellable;
use wordle_entropy::{
    expected_information, filter_candidates, rank_guesses, CancelToken, CandidateSet, Corpus,
    FeedbackMatrix, FeedbackPattern, SolverError,
};

const EPSILON: f64 = 1e-9;

fn get_test_corpus() -> Corpus {
    let words = [
        "crane", "slate", "trace", "clout", "civic", "chomp", "could", "crate", "cloth", "speed",
        "erase", "creep",
    ];
    Corpus::new(words.iter().map(|w| w.to_string()).collect(), 5).unwrap()
}

fn setup() -> (Corpus, FeedbackMatrix) {
    let corpus = get_test_corpus();
    let matrix = FeedbackMatrix::build(&corpus).unwrap();
    (corpus, matrix)
}

#[test]
fn test_single_candidate_has_no_information() {
    let (corpus, matrix) = setup();
    let one = CandidateSet::from_positions(vec![3], corpus.len()).unwrap();
    for guess in 0..corpus.len() {
        assert_eq!(expected_information(&matrix, guess, &one).unwrap(), 0.0);
    }
}

#[test]
fn test_two_distinct_candidates_give_one_bit() {
    let (corpus, matrix) = setup();
    let crane = corpus.position("crane").unwrap();
    let slate = corpus.position("slate").unwrap();
    let pair = CandidateSet::from_positions(vec![crane, slate], corpus.len()).unwrap();
    let bits = expected_information(&matrix, crane, &pair).unwrap();
    assert!((bits - 1.0).abs() < EPSILON);
}

#[test]
fn test_entropy_bounds() {
    let (corpus, matrix) = setup();
    let full = CandidateSet::full(corpus.len());
    let m = full.len() as f64;

    for guess in 0..corpus.len() {
        let bits = expected_information(&matrix, guess, &full).unwrap();
        let distinct: HashSet<u16> = matrix.row(guess).iter().copied().collect();

        assert!(bits >= 0.0);
        assert!(bits <= m.log2() + EPSILON);
        if distinct.len() == 1 {
            assert_eq!(bits, 0.0);
        } else {
            assert!(bits > 0.0);
        }
        if distinct.len() == full.len() {
            assert!((bits - m.log2()).abs() < EPSILON);
        } else {
            assert!(bits < m.log2() - EPSILON);
        }
    }
}

#[test]
fn test_lookups_use_corpus_positions_after_filtering() {
    let (corpus, matrix) = setup();
    let full = CandidateSet::full(corpus.len());
    let observed = FeedbackPattern::parse("gbbbb", 5).unwrap();
    let filtered = filter_candidates(&corpus, "crane", &observed, &full).unwrap();

    let codec = corpus.codec();
    for guess in corpus.words() {
        let position = corpus.position(guess).unwrap();
        let mut buckets = std::collections::HashMap::new();
        for answer in filtered.words(&corpus) {
            let id = codec.encode(&codec.compute_pattern(guess, answer).unwrap()).unwrap();
            *buckets.entry(id).or_insert(0usize) += 1;
        }
        let m = filtered.len() as f64;
        let expected: f64 = buckets
            .values()
            .map(|&c| {
                let p = c as f64 / m;
                -p * p.log2()
            })
            .sum();
        let bits = expected_information(&matrix, position, &filtered).unwrap();
        assert!((bits - expected).abs() < EPSILON, "guess {}", guess);
    }
}

#[test]
fn test_ranking_after_filtering() {
    let (corpus, matrix) = setup();
    let full = CandidateSet::full(corpus.len());
    let observed = FeedbackPattern::parse("gbbbb", 5).unwrap();
    let filtered = filter_candidates(&corpus, "crane", &observed, &full).unwrap();

    let ranking = rank_guesses(&corpus, &matrix, &filtered).unwrap();
    assert_eq!(ranking.len(), corpus.len());

    let entries = ranking.entries();
    for pair in entries.windows(2) {
        assert!(pair[0].entropy >= pair[1].entropy);
        if pair[0].entropy == pair[1].entropy {
            assert!(pair[0].position < pair[1].position, "ties keep corpus order");
        }
    }

    // crane already told us everything it can.
    let crane = entries.iter().find(|a| a.word == "crane").unwrap();
    assert_eq!(crane.entropy, 0.0);
    assert!(!crane.is_possible_answer);
    assert!(ranking.best().unwrap().entropy > 0.0);

    // Words covering four fresh letters split all five candidates apart;
    // civic repeats letters and falls behind the probe slate.
    let top: Vec<&str> = entries[..4].iter().map(|a| a.word.as_str()).collect();
    assert_eq!(top, vec!["clout", "chomp", "could", "cloth"]);
    for analysis in &entries[..4] {
        assert!((analysis.entropy - 5f64.log2()).abs() < EPSILON);
    }
    let rank_of = |word: &str| entries.iter().position(|a| a.word == word).unwrap();
    assert!(rank_of("slate") < rank_of("civic"));

    let restricted = ranking.restricted_to_candidates();
    assert_eq!(restricted.len(), filtered.len());
    assert!(restricted.entries().iter().all(|a| filtered.contains(a.position)));
}

#[test]
fn test_expected_remaining() {
    let (corpus, matrix) = setup();
    let full = CandidateSet::full(corpus.len());
    let ranking = rank_guesses(&corpus, &matrix, &full).unwrap();
    for analysis in ranking.entries() {
        assert!(analysis.expected_remaining >= 1.0);
        assert!(analysis.expected_remaining <= full.len() as f64);
    }
}

#[test]
fn test_top() {
    let (corpus, matrix) = setup();
    let ranking = rank_guesses(&corpus, &matrix, &CandidateSet::full(corpus.len())).unwrap();
    assert_eq!(ranking.top(3).len(), 3);
    assert_eq!(ranking.top(100).len(), corpus.len());
    assert_eq!(ranking.top(1)[0], *ranking.best().unwrap());
}

#[test]
fn test_empty_candidate_set() {
    let (corpus, matrix) = setup();
    let empty = CandidateSet::from_positions(vec![], corpus.len()).unwrap();
    assert!(matches!(
        rank_guesses(&corpus, &matrix, &empty),
        Err(SolverError::EmptyCandidateSet)
    ));
    assert!(matches!(
        expected_information(&matrix, 0, &empty),
        Err(SolverError::EmptyCandidateSet)
    ));
}

#[test]
fn test_guess_position_out_of_range() {
    let (corpus, matrix) = setup();
    let full = CandidateSet::full(corpus.len());
    assert!(matches!(
        expected_information(&matrix, corpus.len(), &full),
        Err(SolverError::PositionOutOfRange { .. })
    ));
}

#[test]
fn test_cancelled_ranking() {
    let (corpus, matrix) = setup();
    let full = CandidateSet::full(corpus.len());
    let cancel = CancelToken::new();
    cancel.cancel();
    assert!(matches!(
        rank_cancellable(&corpus, &matrix, &full, &cancel),
        Err(SolverError::Cancelled)
    ));
}

#[test]
fn test_matrix_for_other_word_length() {
    let corpus = Corpus::new(vec!["crane".to_string(), "slate".to_string()], 5).unwrap();
    let matrix = FeedbackMatrix::from_raw(2, 6, vec![728, 0, 0, 728]).unwrap();
    let full = CandidateSet::full(corpus.len());
    assert!(matches!(
        rank_guesses(&corpus, &matrix, &full),
        Err(SolverError::MatrixWordLength { expected: 5, actual: 6 })
    ));
}

#[test]
fn test_cancel_token_clones_share_flag() {
    let cancel = CancelToken::new();
    let watched = cancel.clone();
    assert!(!watched.is_cancelled());
    cancel.cancel();
    assert!(watched.is_cancelled());
}
