//! Doodle Canvas - raster drawing core for the fighter doodle game
//!
//! Exposes the pixel surface, the stroke/bucket/picker tools, the undo
//! history, the per-canvas store and the image payload codecs used when a
//! drawing is submitted.

pub mod brush;
pub mod canvas;
pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod fill;
pub mod history;
pub mod input;
pub mod store;
pub mod surface;
pub mod transport;

pub use brush::{BrushSettings, Tool};
pub use canvas::{ChangeListener, DoodleCanvas, PointerOutcome};
pub use color::{Color, PALETTE};
pub use config::CanvasConfig;
pub use error::CanvasError;
pub use store::{CanvasSlot, CanvasStore, FileStore, MemoryStore};
pub use transport::{CharacterSubmission, SubmissionTransport, SubmitResponse};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the default tracing subscriber.
///
/// `RUST_LOG` overrides the filter. Does nothing if the host already set one.
pub fn init_logging() {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doodle_canvas=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_ok() {
        tracing::info!("Doodle canvas logging initialized");
    }
}
