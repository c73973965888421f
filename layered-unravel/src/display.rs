use crate::{Explain, UnravelTree};
use std::fmt::Write;

const QUAD: &str = "    ";

/// Diagnostic dump of a fragment tree.
///
/// ```text
/// <0> TOP
///     <1> sentence 7 {1-6}
///         <2> phrase* 8 {1-3}
///         <2> clause 10 {5-6} lno
/// ```
///
/// A `*` marks base types; the last column is the boundary class. Not a
/// stable format.
pub struct ExplainDisplay<'a> {
    tree: &'a UnravelTree,
    explain: Explain,
}

impl<'a> ExplainDisplay<'a> {
    pub fn new(tree: &'a UnravelTree, explain: Explain) -> Self {
        Self { tree, explain }
    }
}

impl<'a> std::fmt::Display for ExplainDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut is_first = true;
        for (id, depth) in self.tree.iter() {
            if is_first {
                is_first = false;
            } else {
                f.write_char('\n')?;
            }

            let indent = QUAD.repeat(depth);
            let (chunk, info) = match (self.tree.chunk(id), self.tree.info(id)) {
                (Some(chunk), Some(info)) => (chunk, info),
                _ => {
                    write!(f, "{}<{}> TOP", indent, depth)?;
                    continue;
                }
            };

            let node = &info.node;
            let base = if node.is_base_non_slot { "*" } else { "" };
            write!(f, "{}<{}> {}{} {} ", indent, depth, node.node_type, base, chunk.node)?;
            if chunk.begin == chunk.end {
                write!(f, "{{{}}}", chunk.begin)?;
            } else {
                write!(f, "{{{}-{}}}", chunk.begin, chunk.end)?;
            }
            if !info.boundary_cls.is_empty() {
                write!(f, " {}", info.boundary_cls)?;
            }

            if self.explain == Explain::Details {
                let detail = format!("{}{}", indent, QUAD.repeat(4));
                let highlight = node
                    .highlight
                    .as_ref()
                    .map(|hl| format!("{} {}", hl.cls, hl.style).trim_end().to_string())
                    .unwrap_or_default();
                let level_cls = node
                    .level_cls
                    .iter()
                    .map(|(key, cls)| format!("{}={}", key, cls))
                    .collect::<Vec<_>>()
                    .join(" ");
                let fields: [(&str, String); 10] = [
                    ("after_child", node.after_child.clone().unwrap_or_default()),
                    ("descend", node.descend.map(|d| d.to_string()).unwrap_or_default()),
                    ("has_graphics", node.has_graphics.to_string()),
                    ("highlight", highlight),
                    ("is_base_non_slot", node.is_base_non_slot.to_string()),
                    ("is_descend", node.is_descend.to_string()),
                    ("is_slot", node.is_slot.to_string()),
                    ("level_cls", level_cls),
                    ("node_type", node.node_type.clone()),
                    ("text_cls", node.text_cls.clone()),
                ];
                for (key, value) in fields.iter() {
                    let value = if value.is_empty() { "-" } else { value.as_str() };
                    write!(f, "\n{}{:<16} = {}", detail, key, value)?;
                }
            }
        }
        Ok(())
    }
}
