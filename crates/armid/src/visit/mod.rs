//! visitor pattern helpers
mod visit_attributes;
pub use visit_attributes::VisitAttributes;

/// Visitor that visits its subjects along with the block path they sit in
///
/// The scope of an attribute in `resource "a" "b" { nested { x = 1 } }` is
/// `["resource", "a", "b", "nested"]`.
pub trait Visit<T> {
    fn visit(&mut self, scope: &[String], value: &T);
}

// blanket impl for FnMut
impl<T, F> Visit<T> for F
where
    F: FnMut(&[String], &T),
{
    fn visit(&mut self, scope: &[String], value: &T) {
        self(scope, value)
    }
}
