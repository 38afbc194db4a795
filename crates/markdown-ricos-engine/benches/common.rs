// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, *italic* and a [link](https://example.com).\n\n- Bullet point\n- Another ***item***\n\n1. First\n2. Second\n\n> A quote with __emphasis__\n\n![image](https://static.wixstatic.com/media/853f36_abc~mv2.png)\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n---\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_inline_heavy(words: usize) -> String {
    let markers = ["**bold**", "*it*", "***both***", "[l](http://x)", "plain", "__u__"];
    markers
        .iter()
        .cycle()
        .take(words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
