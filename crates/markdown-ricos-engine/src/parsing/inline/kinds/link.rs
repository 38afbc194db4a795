/// `[text](url)` syntax.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const TEXT_CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const URL_CLOSE: u8 = b')';
    /// A `!` right before `[` makes the construct an image, not a link.
    pub const IMAGE_BANG: u8 = b'!';
}
