// ── Domain model ──
//
// Input rows, resolved fabric data, and the schema document tree the
// patcher walks.

pub mod fabric;
pub mod row;
pub mod schema;

pub use fabric::FabricInterfaceSet;
pub use row::{FabricKey, StaticPortRow, VLAN_RANGE};
pub use schema::{SchemaDocument, SiteAnp, SiteBinding, SiteEpg, StaticPort, Template};
