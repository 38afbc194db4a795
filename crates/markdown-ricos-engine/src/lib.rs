pub mod builders;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod media;
pub mod model;
pub mod parsing;
pub mod style;
pub mod walker;

use log::debug;

pub use builders::NodeFactory;
pub use envelope::{Response, extract_markdown};
pub use error::{ConvertError, Result};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use media::{ImageReference, classify};
pub use model::{Decoration, Document, Metadata, Node, NodeType};
pub use parsing::inline::{Segment, resolve};
pub use parsing::{Token, lex};
pub use style::{Color, Style};
pub use walker::{BlockWalker, build};

/// Sample document used by the CLI's `--example` mode.
pub const EXAMPLE_MARKDOWN: &str = "# Titre principal

Ceci est un paragraphe avec du texte.

## Sous-titre

- Item 1
- Item 2
- Item 3

### Liste ordonnée

1. Premier
2. Deuxième
3. Troisième

> Ceci est une citation

---

```javascript
console.log('Hello World');
```
";

/// Converts markdown source into a timestamped RICOS document.
pub fn convert_markdown(
    markdown: &str,
    style: &Style,
    ids: &mut dyn IdGenerator,
) -> Result<Document> {
    let tokens = lex(markdown);
    debug!("lexed {} block tokens", tokens.len());
    convert_tokens(&tokens, style, ids)
}

/// Like [`convert_markdown`], for an already tokenized document.
pub fn convert_tokens(
    tokens: &[Token],
    style: &Style,
    ids: &mut dyn IdGenerator,
) -> Result<Document> {
    style.validate()?;
    let document = build(tokens, style, ids)?;
    Ok(document.with_metadata(Metadata::now()))
}
