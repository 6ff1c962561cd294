//! Integration tests for composing and running analysis pipelines.

use std::sync::{Arc, Mutex};

use kopis::analysis::token::PreTokenizedStream;
use kopis::prelude::*;

fn options() -> AnalysisOptions {
    AnalysisOptions::default()
}

#[test]
fn test_gaps_and_matches_partition_text() {
    let texts = [
        "hello, world  and friends",
        "  leading and trailing  ",
        "",
        "nospace",
        "   ",
    ];
    let separators = RegexTokenizer::with_pattern(r"\s+").unwrap();
    let pieces = RegexTokenizer::with_gaps(r"\s+").unwrap();
    let options = options().with_chars(true);

    for text in texts {
        let mut tokens = separators.tokenize(text, &options).collect_tokens();
        tokens.extend(pieces.tokenize(text, &options).collect_tokens());
        tokens.sort_by_key(|t| t.start_char);

        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, text);
    }
}

#[test]
fn test_path_tokenizer_prefixes() {
    let tokens = PathTokenizer::new()
        .unwrap()
        .tokenize("/a/b/c", &options())
        .collect_texts();
    assert_eq!(tokens, vec!["/a", "/a/b", "/a/b/c"]);
}

#[test]
fn test_composition_flattens_the_same_way() {
    let tokenizer = || RegexTokenizer::new().unwrap();

    let left = ((tokenizer() | LowercaseFilter::new()) | StopFilter::new()).build().unwrap();
    let right = (tokenizer() | (LowercaseFilter::new() | StopFilter::new())).build().unwrap();
    let flat = (tokenizer() | LowercaseFilter::new() | StopFilter::new()).build().unwrap();

    assert_eq!(left, right);
    assert_eq!(left, flat);
    assert_eq!(flat.len(), 3);

    let names: Vec<&str> = flat.stages().iter().map(Stage::name).collect();
    assert_eq!(names, vec!["regex", "lowercase", "stop"]);
}

#[test]
fn test_pipeline_splices_into_pipeline() {
    let head = (RegexTokenizer::new().unwrap() | LowercaseFilter::new()).build().unwrap();
    let tail = (StripFilter::new() | StopFilter::new()).build();
    assert!(tail.is_err());

    let combined = (head | (StripFilter::new() | StopFilter::new())).build().unwrap();
    assert_eq!(combined.len(), 4);
}

#[test]
fn test_illegal_compositions() {
    let filter_first = (LowercaseFilter::new() | RegexTokenizer::new().unwrap()).build();
    assert!(filter_first.unwrap_err().is_composition());

    let second_tokenizer =
        (RegexTokenizer::new().unwrap() | LowercaseFilter::new() | IdTokenizer::new()).build();
    let err = second_tokenizer.unwrap_err();
    assert!(err.is_composition());
    assert!(err.to_string().contains("only one tokenizer"));

    let chain = RegexTokenizer::new().unwrap() | IdTokenizer::new() | LowercaseFilter::new();
    assert!(chain.error().is_some());
}

#[test]
fn test_stop_filter_removes_or_marks() {
    let filter = StopFilter::new();
    let words = ["a", "an", "apple"];

    let removed = filter
        .filter(Box::new(PreTokenizedStream::new(words, &options())), &options())
        .collect_texts();
    assert_eq!(removed, vec!["apple"]);

    let keep = options().with_remove_stopwords(false);
    let marked = filter
        .filter(Box::new(PreTokenizedStream::new(words, &keep)), &keep)
        .collect_tokens();
    let flags: Vec<(&str, bool)> = marked.iter().map(|t| (t.text.as_str(), t.stopped)).collect();
    assert_eq!(flags, vec![("a", true), ("an", true), ("apple", false)]);
}

#[test]
fn test_multi_filter_dispatches_on_mode() {
    let analyzer = (RegexTokenizer::new().unwrap()
        | MultiFilter::new()
            .with_mode("a", LowercaseFilter::new())
            .with_mode("b", PassFilter::new()))
    .build()
    .unwrap();

    let text = "Mixed CASE Words";
    let lower = analyzer.analyze(text, &options().with_mode("a")).unwrap().collect_texts();
    let untouched = analyzer.analyze(text, &options().with_mode("b")).unwrap().collect_texts();

    assert_eq!(lower, vec!["mixed", "case", "words"]);
    assert_eq!(untouched, vec!["Mixed", "CASE", "Words"]);
}

#[test]
fn test_stem_filter_idempotent_and_respects_stopped() {
    let analyzer = (RegexTokenizer::new().unwrap()
        | LowercaseFilter::new()
        | StopFilter::from_words(["running"])
        | StemFilter::new())
    .build()
    .unwrap();

    let once = analyzer
        .analyze("jumping connections generously", &options())
        .unwrap()
        .collect_texts();
    let twice = analyzer
        .analyze(&once.join(" "), &options())
        .unwrap()
        .collect_texts();
    assert_eq!(once, twice);

    let keep = options().with_remove_stopwords(false);
    let tokens = analyzer.analyze("running jumping", &keep).unwrap().collect_tokens();
    assert_eq!(tokens[0].text, "running");
    assert!(tokens[0].stopped);
    assert_eq!(tokens[1].text, "jump");
}

#[test]
fn test_logging_filter_sees_every_token() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let analyzer = (RegexTokenizer::new().unwrap()
        | LoggingFilter::with_sink(move |line: &str| sink.lock().unwrap().push(line.to_string()))
        | LowercaseFilter::new())
    .build()
    .unwrap();

    let texts = analyzer.analyze("One Two", &options()).unwrap().collect_texts();
    assert_eq!(texts, vec!["one", "two"]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].contains("\"One\""));
}

#[test]
fn test_early_drop_is_safe() {
    let analyzer = StemmingAnalyzer::new().build().unwrap();
    let mut stream = analyzer
        .analyze("first second third fourth", &options())
        .unwrap();
    assert!(stream.advance());
    assert_eq!(stream.token().text, "first");
    drop(stream);

    let texts = analyzer.analyze("again", &options()).unwrap().collect_texts();
    assert_eq!(texts, vec!["again"]);
}

#[test]
fn test_shared_across_threads() {
    let analyzer = StemmingAnalyzer::new().build().unwrap();
    let inputs = ["running dogs", "jumping cats", "flying birds", "swimming fish"];

    let results: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|text| {
                let analyzer = &analyzer;
                scope.spawn(move || {
                    analyzer
                        .analyze(*text, &AnalysisOptions::default())
                        .unwrap()
                        .collect_texts()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results[0], vec!["run", "dog"]);
    assert_eq!(results[1], vec!["jump", "cat"]);
    assert_eq!(results[2], vec!["fli", "bird"]);
    assert_eq!(results[3], vec!["swim", "fish"]);
}

#[test]
fn test_keep_original_and_offsets() {
    let analyzer = StemmingAnalyzer::new().build().unwrap();
    let options = options().with_keep_original(true).with_chars(true).with_start_char(10);
    let tokens = analyzer.analyze("Running fast", &options).unwrap().collect_tokens();

    assert_eq!(tokens[0].text, "run");
    assert_eq!(tokens[0].original_text.as_deref(), Some("Running"));
    assert_eq!((tokens[0].start_char, tokens[0].end_char), (Some(10), Some(17)));
    assert_eq!((tokens[1].start_char, tokens[1].end_char), (Some(18), Some(22)));
}
