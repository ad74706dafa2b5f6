use kotok::{remove_function_words, tokenize_with_categories, Pipeline, PipelineConfig, TagCategories};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = "자세한 내용은 https://example.com 을 보세요.";

    // Route URLs into a stopword tag the model does not emit for them.
    let mut pipeline = Pipeline::from_config(&PipelineConfig::default())?;
    pipeline.add_re_tag(r"^https?://", "SW")?;

    let categories = TagCategories::default();
    let result = pipeline.tokenize(text, &categories)?;
    println!("content pairs: {:?}", result.content);

    // Strip particles and endings from the content view as well.
    let (bare, lemmas) = remove_function_words(&result.content, "stanza-custom")?;
    println!("content words only: {bare:?}");
    println!("lemmas: {lemmas:?}");

    // Categories are plain configuration; a custom vocabulary works too.
    let custom = TagCategories::empty().with_stopwords(["SF"]);
    let narrow = tokenize_with_categories("stanza-custom", text, &custom)?;
    println!("only sentence-final punctuation removed: {} pairs", narrow.content.len());

    Ok(())
}
