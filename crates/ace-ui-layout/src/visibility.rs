/// How a node takes part in layout and paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum VisibleType {
    #[default]
    Visible,
    /// Takes up space but is not painted.
    Invisible,
    /// Neither measured nor painted; the subtree is skipped entirely.
    Gone,
}
