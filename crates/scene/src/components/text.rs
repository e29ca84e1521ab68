/// Text carried by label-like elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextContent {
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
