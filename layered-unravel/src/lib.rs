#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fragment trees for rendering corpus nodes.
//!
//! Annotations from independent sources cross each other: a clause may start
//! in the middle of one phrase and end in the middle of another. Markup needs
//! proper nesting, so [`Unraveler`] cuts crossing chunks into fragments at the
//! crossing points and stacks the fragments into a [`FragmentTree`]. Each
//! fragment records whether its sides are real node boundaries or cuts.
//!
//! ## Usage
//!
//! ```ignore
//! use layered_unravel::{DisplayOptions, RenderContext, Unraveler};
//!
//! let context = RenderContext::from_toml_str(config)?;
//! let unraveler = Unraveler::for_corpus(&corpus, &context)?;
//! let (tree, dump) = unraveler.explain(sentence, &DisplayOptions::default(), "true")?;
//! println!("{}", dump);
//! ```
//!
//! ## Steps
//!
//! 1. Collect the nodes embedded in the focus node.
//! 2. Split every node into runs of consecutive slots (chunks).
//! 3. [`fragment()`] the chunks until no two partially overlap.
//! 4. Keep fragments inside the focus node, in canonical order.
//! 5. Stack them with [`FragmentTree::assemble`].

mod chunk;
mod context;
mod display;
mod errors;
mod fragment;
mod tree;
mod unravel;

pub use chunk::{ranges_from_list, Boundary, BoundaryClass, Chunk};
pub use context::{DisplayOptions, Explain, FormatSpec, RenderContext, TextDirection};
pub use display::ExplainDisplay;
pub use errors::{UnravelError, UnravelResult};
pub use fragment::{fragment, is_laminar, split_points};
pub use tree::{FragmentTree, Shape, TreeId, TreeIter};
pub use unravel::{ChunkInfo, Highlight, NodeContext, UnravelTree, Unraveler};

#[cfg(test)]
mod tests {
    mod properties;
    mod scenarios;
    mod support;
}
