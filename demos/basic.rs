use kotok::tokenize;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = "나는 학교에 간다.";
    let result = tokenize("stanza-custom", text)?;

    println!("all pairs:");
    for pair in &result.all {
        println!("  {}/{}", pair.lemma, pair.tag);
    }

    println!("content pairs (stopwords removed):");
    for pair in &result.content {
        println!("  {}/{}", pair.lemma, pair.tag);
    }

    println!("content lemmas: {:?}", result.lemmas);

    Ok(())
}
