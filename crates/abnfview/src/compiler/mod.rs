//! Grammar compilers.
//!
//! Two independent structural folds over a rule definition: one produces
//! decorated ABNF text, the other a railroad diagram tree. The driver runs
//! both over every rule of a grammar in declared order.

mod context;
mod decorator;
mod diagram;
mod driver;
mod entry_points;
mod error;
mod resolver;
mod text;

pub use context::{DEFAULT_MAX_DEPTH, RenderContext};
pub use decorator::{
    Decorator, HtmlDecorator, LinkStyle, PlainDecorator, construct_class, escape_attr, escape_html,
};
pub use diagram::{DiagramCompiler, render_diagram};
pub use driver::{
    DiagramPolicy, Layout, RenderOptions, RenderedRule, Renderer, Rendering, render_grammar,
};
pub use entry_points::{EntryPoints, find_entry_points};
pub use error::RenderError;
pub use resolver::classify;
pub use text::{TextCompiler, render_text};
