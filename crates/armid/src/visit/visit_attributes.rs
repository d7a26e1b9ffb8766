use super::Visit;
use hcl_edit::structure::{Attribute, Body, Structure};

/// Recursively visit all [Attribute]s, including those of nested blocks
pub trait VisitAttributes {
    fn visit_attributes(&self, visitor: &mut dyn Visit<Attribute>);
}

impl VisitAttributes for Body {
    fn visit_attributes(&self, visitor: &mut dyn Visit<Attribute>) {
        walk(self, &mut Vec::new(), visitor);
    }
}

fn walk(body: &Body, scope: &mut Vec<String>, visitor: &mut dyn Visit<Attribute>) {
    for structure in body.iter() {
        match structure {
            Structure::Attribute(attribute) => visitor.visit(scope, attribute),
            Structure::Block(block) => {
                let depth = scope.len();
                scope.push(block.ident.value().to_string());
                scope.extend(block.labels.iter().map(|label| label.as_str().to_string()));

                walk(&block.body, scope, visitor);

                scope.truncate(depth);
            }
        }
    }
}
