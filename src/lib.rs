#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod debounce;
pub mod fragment;
pub mod host;
pub mod markdown;
pub mod models;
pub mod processor;
pub mod resolver;
pub mod uri;

pub use config::{ResolverConfig, RewriteTarget};
pub use debounce::Debouncer;
pub use fragment::{HtmlFragment, ImageElement, RenderedFragment};
pub use host::{HostWorkspace, ResourceRoots, StaticWorkspace};
pub use models::{ImageReference, Resolution, RewriteReport, SkipReason};
pub use processor::{EditorUpdateHook, ImageSrcProcessor};
pub use resolver::{Resolver, resolve};
pub use uri::AbsolutePathPolicy;
