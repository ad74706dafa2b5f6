use kotok::*;

fn runtime_available() -> bool {
    match TaggerLibrary::availability() {
        Availability::Available { .. } => true,
        Availability::Unavailable { reason } => {
            eprintln!("skipping pipeline integration tests: {reason}");
            false
        }
    }
}

fn get_pipeline() -> Pipeline {
    Pipeline::from_config(&PipelineConfig::default()).expect("Failed to construct pipeline")
}

#[test]
fn test_all_sequential() {
    // Pipeline construction mutates runtime-global state in the native
    // library; run everything from one test to keep it serialized.
    if !runtime_available() {
        return;
    }
    run_tokenize();
    run_tokenize_entry_point();
    run_remove_function_words();
    run_re_tag();
}

fn run_tokenize() {
    println!("Starting run_tokenize");
    let pipeline = get_pipeline();
    let text = "나는 학교에 간다.";
    let result = pipeline
        .tokenize(text, &TagCategories::default())
        .expect("Failed to tokenize");

    assert!(!result.all.is_empty());
    // The terminating period is tagged SF and must not survive filtering.
    assert!(result.all.iter().any(|pair| pair.tag == "SF"));
    assert!(result.content.iter().all(|pair| pair.tag != "SF"));
    assert_eq!(result.lemmas.len(), result.content.len());
}

fn run_tokenize_entry_point() {
    println!("Starting run_tokenize_entry_point");
    let result = tokenize("stanza-custom", "안녕하세요. 반갑습니다.").expect("Failed to tokenize");

    assert!(!result.all.is_empty());
    assert!(result.content.len() <= result.all.len());

    let err = tokenize("mecab", "텍스트").expect_err("unsupported backend must fail");
    assert!(matches!(err, KotokError::Configuration(_)));
}

fn run_remove_function_words() {
    println!("Starting run_remove_function_words");
    let result = tokenize("stanza-custom", "나는 학교에 간다.").expect("Failed to tokenize");

    let (cleaned, lemmas) =
        remove_function_words(&result.content, "stanza-custom").expect("Failed to filter");
    assert!(cleaned.len() <= result.content.len());
    assert_eq!(lemmas.len(), cleaned.len());
    // 는 (topic particle) and 에 (locative case marker) are function words.
    assert!(cleaned.iter().all(|pair| pair.tag != "JX" && pair.tag != "JKB"));
}

fn run_re_tag() {
    println!("Starting run_re_tag");
    let mut pipeline = get_pipeline();
    pipeline
        .add_re_tag(r"^https?://", "SW")
        .expect("Failed to add rule");

    let result = pipeline
        .tokenize(
            "자세한 내용은 https://example.com 을 보세요.",
            &TagCategories::default(),
        )
        .expect("Failed to tokenize");

    // The URL lemma is forced into a stopword tag and filtered out.
    assert!(result
        .content
        .iter()
        .all(|pair| !pair.lemma.starts_with("https://")));
}
