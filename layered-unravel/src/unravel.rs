//! Unravel a node into a tree of fragments dressed with rendering info.

use crate::chunk::{bounds_of, ranges_from_list, Bounds};
use crate::display::ExplainDisplay;
use crate::fragment::fragment;
use crate::{
    BoundaryClass, Chunk, DisplayOptions, Explain, FragmentTree, RenderContext, UnravelError,
    UnravelResult,
};
use layered_corpus::{Corpus, Locality, Node, Slot};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Highlight of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub cls: String,
    /// Inline style, empty when no colour was given.
    pub style: String,
}

/// Rendering info shared by all fragments of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContext {
    pub node_type: String,
    pub is_slot: bool,
    /// Slots and nodes of the format's descend type carry text.
    pub is_descend: bool,
    /// `Some(false)` stops a renderer from descending into nodes of the
    /// descend type or of a lexical type; `None` leaves it open.
    pub descend: Option<bool>,
    /// A non-slot node of a base type or of a descendant type of a base type.
    pub is_base_non_slot: bool,
    pub text_cls: String,
    pub highlight: Option<Highlight>,
    pub level_cls: BTreeMap<String, String>,
    pub has_graphics: bool,
    /// Material the renderer puts after each child of the node.
    pub after_child: Option<String>,
}

/// Rendering info of one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkInfo {
    pub node: Arc<NodeContext>,
    pub boundary: BoundaryClass,
    /// CSS rendering of `boundary` for the requested text direction.
    pub boundary_cls: String,
}

pub type UnravelTree = FragmentTree<ChunkInfo>;

/// Builds fragment trees for nodes of one corpus.
///
/// Holds only shared references; every call works on its own data, so one
/// `Unraveler` can serve concurrent requests.
#[derive(Debug)]
pub struct Unraveler<'a, L: Locality + ?Sized = Corpus> {
    corpus: &'a Corpus,
    locality: &'a L,
    context: &'a RenderContext,
}

impl<'a> Unraveler<'a, Corpus> {
    /// Use the corpus itself for containment queries.
    pub fn for_corpus(corpus: &'a Corpus, context: &'a RenderContext) -> UnravelResult<Self> {
        Self::new(corpus, corpus, context)
    }
}

impl<'a, L: Locality + ?Sized> Unraveler<'a, L> {
    pub fn new(corpus: &'a Corpus, locality: &'a L, context: &'a RenderContext) -> UnravelResult<Self> {
        context.validate(corpus.otype())?;
        Ok(Self {
            corpus,
            locality,
            context,
        })
    }

    /// Unravel `n` and also return the diagnostic dump.
    ///
    /// `mode` must be `"true"` or `"details"`.
    pub fn explain(
        &self,
        n: Node,
        options: &DisplayOptions,
        mode: &str,
    ) -> UnravelResult<(UnravelTree, String)> {
        let explain: Explain = mode.parse()?;
        let tree = self.unravel(n, options)?;
        let dump = ExplainDisplay::new(&tree, explain).to_string();
        for line in dump.lines() {
            debug!(target: "layered_unravel::explain", "{}", line);
        }
        Ok((tree, dump))
    }

    pub fn unravel(&self, n: Node, options: &DisplayOptions) -> UnravelResult<UnravelTree> {
        let corpus = self.corpus;
        let context = self.context;
        let otype = corpus.otype();
        options.validate(otype)?;

        let n_type = otype.type_of(n).ok_or(UnravelError::NodeOutOfRange {
            node: n,
            max_node: corpus.max_node(),
        })?;
        let slot_type = otype.slot_type();
        let is_lex = context.lex_types.contains(n_type);

        let n_extent = corpus.extent_of(n);
        let n_slots: BTreeSet<Slot> = if is_lex {
            n_extent.iter().take(1).copied().collect()
        } else {
            n_extent.iter().copied().collect()
        };

        // intersecting nodes

        let mut i_nodes: BTreeSet<Node> = if self.is_big(n_type, options) {
            BTreeSet::new()
        } else if let Some(types) = context.descendant_type.get(n_type) {
            self.locality.embedded(n, Some(types)).into_iter().collect()
        } else if is_lex {
            BTreeSet::new()
        } else {
            self.locality.embedded(n, None).into_iter().collect()
        };
        if options.hide_types {
            i_nodes.retain(|&m| {
                otype
                    .type_of(m)
                    .map_or(true, |t| !options.hidden_types.contains(t))
            });
        }
        i_nodes.insert(n);

        // chunk every node and record its boundaries

        let mut chunks: Vec<BTreeSet<Chunk>> = vec![BTreeSet::new(); otype.all_types().len()];
        let mut boundaries: HashMap<Node, Bounds> = HashMap::new();

        for m in i_nodes {
            let position = otype.position_of(m).ok_or(UnravelError::NodeOutOfRange {
                node: m,
                max_node: corpus.max_node(),
            })?;
            let m_type = otype.all_types()[position].as_str();
            if self.is_excluded(m, m_type) {
                continue;
            }

            let extent = corpus.extent_of(m);
            let slots: &[Slot] = if is_lex { &extent[..extent.len().min(1)] } else { &extent };
            if m != n
                && m_type == n_type
                && n_slots.iter().all(|s| slots.binary_search(s).is_ok())
            {
                continue;
            }

            let ranges = ranges_from_list(slots);
            for &(b, e) in &ranges {
                chunks[position].insert(Chunk::new(m, b, e));
            }
            boundaries.insert(m, bounds_of(&ranges));
        }

        fragment(&mut chunks, |node| corpus.sort_key(node));

        // Every fragment lies either inside n or outside it, so testing the
        // first slot is enough.
        let mut fragments: Vec<Chunk> = chunks
            .into_iter()
            .flatten()
            .filter(|chunk| n_slots.contains(&chunk.begin))
            .collect();
        fragments.sort_by_key(|chunk| {
            (
                corpus.sort_key(chunk.begin),
                Reverse(chunk.end),
                corpus.sort_key(chunk.node),
            )
        });

        let sub_base_types = self.sub_base_types(options, slot_type);
        let format = options.fmt.as_ref().and_then(|fmt| context.formats.get(fmt));
        let descend_type = format
            .and_then(|format| format.descend_type.as_deref())
            .unwrap_or(slot_type);
        let text_cls = format
            .and_then(|format| format.text_cls.as_deref())
            .unwrap_or(&context.default_text_cls);

        let mut node_contexts: HashMap<Node, Arc<NodeContext>> = HashMap::new();
        let tree = FragmentTree::assemble(&fragments, |chunk| {
            let node = node_contexts
                .entry(chunk.node)
                .or_insert_with(|| {
                    let node_type = otype.type_of(chunk.node).unwrap_or(slot_type);
                    let is_slot = otype.is_slot(chunk.node);
                    Arc::new(NodeContext {
                        node_type: node_type.to_string(),
                        is_slot,
                        is_descend: is_slot || node_type == descend_type,
                        descend: if node_type == descend_type
                            || context.lex_types.contains(node_type)
                        {
                            Some(false)
                        } else {
                            None
                        },
                        is_base_non_slot: !is_slot
                            && (options.base_types.contains(node_type)
                                || sub_base_types.contains(node_type)),
                        text_cls: context
                            .styles
                            .get(node_type)
                            .map_or(text_cls, String::as_str)
                            .to_string(),
                        highlight: highlight(options, chunk.node),
                        level_cls: if options.pretty {
                            context.level_cls.get(node_type).cloned().unwrap_or_default()
                        } else {
                            BTreeMap::new()
                        },
                        has_graphics: context.has_graphics.contains(node_type),
                        after_child: context.after_child.get(node_type).cloned(),
                    })
                })
                .clone();
            let boundary = BoundaryClass::of(chunk, boundaries.get(&chunk.node));
            ChunkInfo {
                node,
                boundary,
                boundary_cls: boundary.css(options.direction),
            }
        });

        debug!(
            node = n,
            node_type = n_type,
            fragments = tree.len(),
            "unravelled"
        );

        Ok(tree)
    }

    /// Big nodes are not expanded unless `full` is set.
    ///
    /// In plain display a verse type is big exactly when it is shown inside a
    /// tuple, unless the context shows verses in tuples.
    fn is_big(&self, node_type: &str, options: &DisplayOptions) -> bool {
        if options.full {
            return false;
        }
        let context = self.context;
        if !options.pretty
            && context.verse_types.contains(node_type)
            && !context.show_verse_in_tuple
        {
            return options.in_tuple;
        }
        if context.big_types.contains(node_type) {
            return true;
        }
        let otype = self.corpus.otype();
        match (
            options.condense_type.as_deref().and_then(|t| otype.position(t)),
            otype.position(node_type),
        ) {
            (Some(condense), Some(position)) => position < condense,
            _ => false,
        }
    }

    fn is_excluded(&self, m: Node, m_type: &str) -> bool {
        self.context.exclusions.get(m_type).map_or(false, |conditions| {
            conditions
                .iter()
                .any(|(feature, value)| self.corpus.feature_value(feature, m).as_ref() == Some(value))
        })
    }

    /// Descendant types of the base types, when base types are more than the
    /// slot type alone.
    fn sub_base_types(&self, options: &DisplayOptions, slot_type: &str) -> BTreeSet<String> {
        let only_slots = options.base_types.len() == 1 && options.base_types.contains(slot_type);
        if options.base_types.is_empty() || only_slots {
            return BTreeSet::new();
        }
        options
            .base_types
            .iter()
            .filter_map(|base| self.context.descendant_type.get(base))
            .flatten()
            .cloned()
            .collect()
    }
}

fn highlight(options: &DisplayOptions, n: Node) -> Option<Highlight> {
    options.highlights.get(&n).map(|color| Highlight {
        cls: "hl".to_string(),
        style: color
            .as_ref()
            .map(|color| format!("background-color: {};", color))
            .unwrap_or_default(),
    })
}
