use foundation::handles::Handle;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(pub Handle);

impl ElementId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }
}
