use test_case::test_case;
use wordle_entropy::{Feedback, FeedbackPattern, PatternCodec, PatternDraft, PatternId, SolverError};

fn codec() -> PatternCodec {
    PatternCodec::new(5).unwrap()
}

fn pattern(guess: &str, answer: &str) -> FeedbackPattern {
    codec().compute_pattern(guess, answer).unwrap()
}

#[test]
fn test_all_correct() {
    let pattern = pattern("crane", "crane");
    assert!(pattern.is_win());
    assert_eq!(pattern, FeedbackPattern::all_correct(5));
    assert_eq!(codec().encode(&pattern).unwrap(), codec().all_correct());
    assert_eq!(codec().all_correct(), PatternId(242));
}

#[test]
fn test_all_absent() {
    let pattern = pattern("quick", "dream");
    assert_eq!(pattern, FeedbackPattern::new(vec![Feedback::Absent; 5]));
    assert_eq!(codec().encode(&pattern).unwrap(), PatternId(0));
}

#[test_case("crane", "charm", "gygbb" ; "mixed")]
#[test_case("speed", "creep", "byggb" ; "duplicate letters in guess")]
#[test_case("arose", "creep", "bgbby" ; "duplicate letters in answer")]
#[test_case("geese", "creep", "bygbb" ; "duplicate guess limited by answer")]
#[test_case("speed", "erase", "ybyyb" ; "repeated letter credited left to right")]
#[test_case("sores", "those", "yybyb" ; "second s gets nothing")]
#[test_case("lemma", "legal", "ggbby" ; "double m one a")]
#[test_case("roman", "apron", "yybyg" ; "all but one present")]
#[test_case("elite", "ledge", "yybbg" ; "correct e claims before present")]
fn test_feedback_rule(guess: &str, answer: &str, expected: &str) {
    assert_eq!(
        pattern(guess, answer),
        FeedbackPattern::parse(expected, 5).unwrap(),
        "guess={}, answer={}",
        guess,
        answer
    );
}

#[test]
fn test_repeated_letter_never_over_credited() {
    let words = ["speed", "erase", "geese", "eerie", "levee", "creep", "emcee", "sheep"];
    for guess in words {
        for answer in words {
            let feedbacks = pattern(guess, answer);
            for letter in b'a'..=b'z' {
                let credited = guess
                    .bytes()
                    .zip(feedbacks.feedbacks())
                    .filter(|&(g, &f)| g == letter && f != Feedback::Absent)
                    .count();
                let in_answer = answer.bytes().filter(|&b| b == letter).count();
                assert!(credited <= in_answer, "{} vs {}: letter {}", guess, answer, letter as char);
            }
        }
    }
}

#[test]
fn test_pattern_encoding_decoding() {
    let codec = codec();
    for id in 0..codec.num_patterns() {
        let id = PatternId(id as u16);
        let pattern = codec.decode(id).unwrap();
        assert_eq!(codec.encode(&pattern).unwrap(), id);
    }
}

#[test]
fn test_enumerate_patterns_in_id_order() {
    let codec = PatternCodec::new(3).unwrap();
    let patterns: Vec<_> = codec.enumerate_patterns().collect();
    assert_eq!(patterns.len(), 27);
    for (id, pattern) in patterns.iter().enumerate() {
        assert_eq!(codec.encode(pattern).unwrap(), PatternId(id as u16));
    }
    assert_eq!(patterns[1].feedbacks(), &[Feedback::Present, Feedback::Absent, Feedback::Absent]);
}

#[test]
fn test_codec_errors() {
    let codec = codec();
    assert!(matches!(
        codec.decode(PatternId(243)),
        Err(SolverError::InvalidId { id: 243, limit: 243 })
    ));
    assert!(matches!(
        codec.encode(&FeedbackPattern::all_correct(4)),
        Err(SolverError::InvalidLength { expected: 5, actual: 4 })
    ));
    assert!(matches!(
        codec.compute_pattern("cranes", "crane"),
        Err(SolverError::InvalidLength { .. })
    ));
    assert!(matches!(codec.compute_pattern("CRANE", "crane"), Err(SolverError::InvalidWord(_))));
    assert!(matches!(PatternCodec::new(0), Err(SolverError::UnsupportedWordLength(0))));
    assert!(matches!(PatternCodec::new(11), Err(SolverError::UnsupportedWordLength(11))));
}

#[test]
fn test_longest_word_length_fits() {
    let codec = PatternCodec::new(10).unwrap();
    assert_eq!(codec.num_patterns(), 59049);
    let id = codec.compute_id(b"abcdefghij", b"abcdefghij");
    assert_eq!(id, codec.all_correct());
}

#[test]
fn test_pattern_parse() {
    let pattern = FeedbackPattern::parse("gybbb", 5).unwrap();
    assert_eq!(
        pattern.feedbacks(),
        &[Feedback::Correct, Feedback::Present, Feedback::Absent, Feedback::Absent, Feedback::Absent]
    );
    assert_eq!(pattern, FeedbackPattern::parse("21000", 5).unwrap());
    assert_eq!(pattern, FeedbackPattern::parse("cviii", 5).unwrap());
}

#[test]
fn test_pattern_parse_invalid() {
    assert!(matches!(FeedbackPattern::parse("gybbb1", 5), Err(SolverError::InvalidLength { .. })));
    assert!(matches!(FeedbackPattern::parse("gybb", 5), Err(SolverError::InvalidLength { .. })));
    assert!(matches!(FeedbackPattern::parse("gybzb", 5), Err(SolverError::InvalidPatternChar('z'))));
}

#[test]
fn test_draft_input() {
    let mut draft = PatternDraft::new(5);
    assert!(!draft.is_complete());
    assert!(matches!(draft.finalize(), Err(SolverError::IncompletePattern)));

    for _ in 0..5 {
        assert!(draft.push(Feedback::Absent));
    }
    assert!(!draft.push(Feedback::Correct));
    assert_eq!(draft.pop(), Some(Feedback::Absent));
    assert_eq!(draft.slots()[4], None);
    assert!(draft.push(Feedback::Correct));
    assert!(draft.is_complete());

    let pattern = draft.finalize().unwrap();
    assert_eq!(pattern.feedbacks()[4], Feedback::Correct);

    draft.set(0, None).unwrap();
    assert!(!draft.is_complete());
    assert!(draft.set(5, None).is_err());

    draft.clear();
    assert!(draft.slots().iter().all(Option::is_none));
}

#[test]
fn test_emoji_display() {
    let pattern = FeedbackPattern::parse("gybbg", 5).unwrap();
    assert_eq!(pattern.to_emoji_string(), "🟩🟨⬛⬛🟩");
    assert_eq!(pattern.to_string(), "🟩🟨⬛⬛🟩");
}
