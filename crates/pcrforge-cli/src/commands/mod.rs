pub mod analyze;
pub mod generate;
pub mod score;

use pcrforge::engine::config::TemplateLayout;
use tracing::warn;

/// Degenerate layouts are still searched and scored, only flagged.
fn warn_on_degenerate_layout(layout: &TemplateLayout) {
    if let Err(e) = layout.check_geometry() {
        warn!("{}. Regions will overlap and costs may be misleading.", e);
    }
}
