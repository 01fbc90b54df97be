//! Graphviz export.
use std::collections::BTreeSet;

use crate::config::WorkflowConfig;
use crate::transition::Transition;

const END_NODE: &str = "__end__";

impl WorkflowConfig {
    /// Render the graph as a Graphviz `digraph`.
    ///
    /// Terminal transitions point at a shared end marker; failure-like
    /// transitions are drawn dotted.
    pub fn to_dot(&self, name: &str) -> String {
        let mut dot = String::new();
        dot.push_str(&format!("digraph {} {{\n", quote(name)));
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box style=filled fontname=\"Helvetica\" color=lightgray];\n");
        dot.push_str("  edge [fontname=\"Helvetica\" arrowhead=vee];\n");

        // Targets without a node still get drawn, after the declared ones.
        let mut extra = BTreeSet::new();
        for node in self.nodes() {
            dot.push_str(&format!("  {};\n", quote(node.handler().as_str())));
            for target in node.transitions().values().flatten() {
                if !self.contains(target.as_str()) {
                    extra.insert(target.as_str());
                }
            }
        }
        for handler in &extra {
            dot.push_str(&format!("  {} [style=dashed];\n", quote(handler)));
        }

        let mut terminal = false;
        for node in self.nodes() {
            let from = quote(node.handler().as_str());
            for (transition, target) in node.transitions() {
                let to = match target {
                    Some(target) => quote(target.as_str()),
                    None => {
                        terminal = true;
                        END_NODE.to_string()
                    }
                };
                let style = match transition {
                    Transition::Fail | Transition::Error | Transition::Timeout | Transition::Cancel => {
                        " style=\"dotted\" color=\"red\""
                    }
                    _ => "",
                };
                dot.push_str(&format!(
                    "  {from} -> {to} [label={}{style}];\n",
                    quote(transition.name())
                ));
            }
        }
        if terminal {
            dot.push_str(&format!("  {END_NODE} [shape=point label=\"\"];\n"));
        }

        dot.push_str("}\n");
        dot
    }
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
