//! Error types
//!
//! Scoping itself never fails; only parsing template CSS and structural DOM
//! edits done through the integration helpers can.

use shady_css::CssError;
use shady_dom::DomError;

/// Shady Parts error
#[derive(Debug, thiserror::Error)]
pub enum PartsError {
    #[error("CSS error: {0}")]
    Css(#[from] CssError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
