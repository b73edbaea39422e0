pub mod compiler;
pub mod grammar;
pub mod types;

pub use compiler::{
    Decorator, DiagramPolicy, EntryPoints, HtmlDecorator, Layout, LinkStyle, PlainDecorator,
    RenderError, RenderOptions, RenderedRule, Renderer, Rendering, classify, find_entry_points,
    render_diagram, render_grammar, render_text,
};
pub use grammar::{Grammar, LoadError, Node};
pub use types::{DependencyMetadata, DiagramNode, Provenance};
