//! CLI command implementations.

pub(crate) mod args;
pub(crate) mod markdown;
pub(crate) mod render;

pub(crate) use markdown::MarkdownArgs;
pub(crate) use render::RenderArgs;
