//! # folio-csf
//!
//! Pure annotation transforms for Folio.
//!
//! Every function here is a pure function of its inputs. Caching, identity
//! and invalidation are the store's business; this crate only decides how
//! annotations layer:
//!
//! - [`normalize_project_annotations`]: canonical arg/global type shapes
//! - [`process_module`]: loaded module → structured file record
//! - [`prepare_meta`]: project ⊕ component
//! - [`prepare_story`]: project ⊕ component ⊕ story (story wins)
//! - [`prepare_context`]: resolved story + live args/globals + hooks
//! - [`render_story`]: decorator composition around the render function

mod context;
mod decorate;
mod error;
mod merge;
mod normalize;
mod prepare;
mod process;

pub use context::{include_conditional_arg, map_args, prepare_context};
pub use decorate::{decorate, default_render, render_story};
pub use error::CsfError;
pub use merge::{combine_parameters, combine_tags};
pub use normalize::{normalize_input_types, normalize_project_annotations};
pub use prepare::{prepare_meta, prepare_story};
pub use process::process_module;
