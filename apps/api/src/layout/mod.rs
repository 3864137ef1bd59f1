//! Text measurement for the template renderer: static font metrics and greedy word wrap.

pub mod font_metrics;
pub mod wrap;

pub use font_metrics::{FontFamily, FontWeight};
pub use wrap::wrap_text;
