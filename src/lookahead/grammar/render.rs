//! EBNF-style rendering of grammar nodes, used in error messages and reports.
//!
//!     disjunction    a | b
//!     sequence       a b c
//!     optional       [ a ]
//!     repetition     { a }
//!     capture        field=a
//!     literal        "+"
//!     reference      <ident>
//!     struct         its name
//!     parseable      its name
//!
//! Structs render by name only, which keeps recursive grammars finite. Any other cycle is cut
//! with `...` when a node shows up again on the current path.

use super::{Grammar, Node, NodeId};

impl Grammar {
    /// Render the construct rooted at `id`.
    pub fn render(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut path = Vec::new();
        self.render_into(id, false, &mut out, &mut path);
        out
    }

    fn render_into(&self, id: NodeId, nested: bool, out: &mut String, path: &mut Vec<NodeId>) {
        if path.contains(&id) {
            out.push_str("...");
            return;
        }
        let Some(node) = self.get(id) else {
            out.push_str(&format!("<undefined {}>", id));
            return;
        };

        path.push(id);
        match node {
            Node::Disjunction(n) => {
                if nested {
                    out.push('(');
                }
                for (i, child) in n.nodes.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    self.render_into(*child, false, out, path);
                }
                if nested {
                    out.push(')');
                }
            }
            Node::Sequence(n) => {
                let multiple = n.next.is_some();
                if nested && multiple {
                    out.push('(');
                }
                self.render_into(n.node, multiple || nested, out, path);
                let mut link = n.next;
                // Links are acyclic through `next`; the bound keeps malformed chains finite.
                let mut remaining = self.len();
                while let (Some(next), true) = (link, remaining > 0) {
                    remaining -= 1;
                    match self.get(next) {
                        Some(Node::Sequence(seq)) => {
                            out.push(' ');
                            self.render_into(seq.node, true, out, path);
                            link = seq.next;
                        }
                        _ => {
                            out.push(' ');
                            self.render_into(next, true, out, path);
                            link = None;
                        }
                    }
                }
                if nested && multiple {
                    out.push(')');
                }
            }
            Node::Capture(n) => {
                out.push_str(&n.field);
                out.push('=');
                self.render_into(n.node, true, out, path);
            }
            Node::Struct(n) => out.push_str(&n.name),
            Node::Optional(n) => {
                out.push_str("[ ");
                self.render_into(n.node, false, out, path);
                out.push_str(" ]");
            }
            Node::Repetition(n) => {
                out.push_str("{ ");
                self.render_into(n.node, false, out, path);
                out.push_str(" }");
            }
            Node::Literal(n) => out.push_str(&format!("{:?}", n.value)),
            Node::Reference(n) => out.push_str(&format!("<{}>", n.name)),
            Node::Parseable(n) => out.push_str(&n.name),
        }
        path.pop();
    }
}
