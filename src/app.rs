//! Application module: exposes the page model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the current
//! selection and the presentation state. `app::forms` handles the search box
//! and the newsletter form.

mod forms;
mod model;

pub use model::*;
