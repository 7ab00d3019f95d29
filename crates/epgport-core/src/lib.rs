// epgport-core: Static-port batch logic between epgport-api and the CLI.

pub mod batch;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod orchestrator;
pub mod patch;

// ── Primary re-exports ──────────────────────────────────────────────
pub use batch::{BatchOptions, BatchReport, SchemaOutcome, SubmitStatus, run_batch};
pub use config::{CertificateVerification, ServerConfig};
pub use error::CoreError;
pub use input::{load_rows, read_rows};
pub use model::{
    FabricInterfaceSet, FabricKey, SchemaDocument, SiteAnp, SiteBinding, SiteEpg, StaticPort,
    StaticPortRow, Template,
};
pub use orchestrator::{MsoOrchestrator, Orchestrator};
pub use patch::apply_row;
