/// A symmetric delimiter run such as `**`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub run: &'static [u8],
    /// Underscore runs may not open or close inside a word.
    pub word_bound: bool,
}

impl Delimiter {
    const fn star(run: &'static [u8]) -> Self {
        Self {
            run,
            word_bound: false,
        }
    }

    const fn underscore(run: &'static [u8]) -> Self {
        Self {
            run,
            word_bound: true,
        }
    }

    /// The repeated delimiter byte.
    pub fn byte(&self) -> u8 {
        self.run[0]
    }

    pub fn width(&self) -> usize {
        self.run.len()
    }
}

/// Emphasis strengths, each with the delimiters that produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    BoldItalic,
    Bold,
    Italic,
}

impl Emphasis {
    const BOLD_ITALIC: &'static [Delimiter] = &[Delimiter::star(b"***")];
    const BOLD: &'static [Delimiter] = &[Delimiter::star(b"**"), Delimiter::underscore(b"__")];
    const ITALIC: &'static [Delimiter] = &[Delimiter::star(b"*"), Delimiter::underscore(b"_")];

    pub fn delimiters(self) -> &'static [Delimiter] {
        match self {
            Emphasis::BoldItalic => Self::BOLD_ITALIC,
            Emphasis::Bold => Self::BOLD,
            Emphasis::Italic => Self::ITALIC,
        }
    }
}
