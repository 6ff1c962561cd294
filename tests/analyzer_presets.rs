//! End-to-end tests for the analyzer presets.

use kopis::prelude::*;

const SENTENCE: &str = "Hello there, this is a TEST";
const REPEATED: &str = "Testing is testing and testing";

fn run(analyzer: &PipelineAnalyzer, text: &str) -> Vec<String> {
    analyzer
        .analyze(text, &AnalysisOptions::default())
        .unwrap()
        .collect_texts()
}

#[test]
fn test_simple_analyzer() {
    let analyzer = SimpleAnalyzer::new().build().unwrap();
    assert_eq!(run(&analyzer, SENTENCE), vec!["hello", "there", "this", "is", "a", "test"]);
}

#[test]
fn test_keyword_analyzer_keeps_punctuation() {
    let analyzer = KeywordAnalyzer::new().lowercase(true).build().unwrap();
    assert_eq!(run(&analyzer, SENTENCE), vec!["hello", "there,", "this", "is", "a", "test"]);
}

#[test]
fn test_standard_analyzer() {
    let analyzer = StandardAnalyzer::new().build().unwrap();
    assert_eq!(run(&analyzer, REPEATED), vec!["testing", "testing", "testing"]);
}

#[test]
fn test_stemming_analyzer() {
    let analyzer = StemmingAnalyzer::new().build().unwrap();
    assert_eq!(run(&analyzer, REPEATED), vec!["test", "test", "test"]);
}

#[test]
fn test_language_analyzer() {
    let analyzer = LanguageAnalyzer::new("es").build().unwrap();
    assert_eq!(run(&analyzer, "Por el mar corren las liebres"), vec!["mar", "corr", "liebr"]);

    let german = LanguageAnalyzer::new("german").build().unwrap();
    let texts = run(&german, "Die Katzen und die Häuser");
    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("katz"));
}

#[test]
fn test_index_and_query_modes_agree() {
    let analyzer = StemmingAnalyzer::new().build().unwrap();
    let indexed = analyzer
        .analyze("The runners were running", &AnalysisOptions::index())
        .unwrap()
        .collect_texts();
    let queried = analyzer
        .analyze("RUNNING runners", &AnalysisOptions::query())
        .unwrap()
        .collect_texts();

    assert!(queried.iter().all(|term| indexed.contains(term)));
}

#[test]
fn test_presets_extend_with_operator() {
    let analyzer = (StandardAnalyzer::new().without_stop_words().build().unwrap()
        | CharsetFilter::accent_folding())
    .build()
    .unwrap();
    assert_eq!(run(&analyzer, "Café Crème brûlée"), vec!["cafe", "creme", "brulee"]);
}

#[test]
fn test_positions_continue_from_start_pos() {
    let analyzer = StandardAnalyzer::new().build().unwrap();
    let options = AnalysisOptions::default().with_positions(true).with_start_pos(5);
    let tokens = analyzer.analyze("alpha beta", &options).unwrap().collect_tokens();
    let positions: Vec<usize> = tokens.iter().filter_map(|t| t.position).collect();
    assert_eq!(positions, vec![5, 6]);
}
