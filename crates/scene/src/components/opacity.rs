/// Presentation opacity, `0.0` hidden through `1.0` fully visible.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Opacity {
    pub value: f64,
}

impl Opacity {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn opaque() -> Self {
        Self { value: 1.0 }
    }

    pub fn transparent() -> Self {
        Self { value: 0.0 }
    }

    pub fn is_visible(&self) -> bool {
        self.value > 0.0
    }
}
