//! `billfold-pdf` — renders a finalized invoice and the company profile into
//! a paginated A4 PDF document.
//!
//! Rendering is a pure function of its inputs: the same invoice and profile
//! always produce an equivalent visual document. Styling is local
//! construction detail, not shared state.

pub mod render;

pub use render::{render_invoice, RenderError};
