// Orchestrator response types
//
// Wire models for the listings the tool consumes. Only the fields needed
// for name resolution are modeled; listings are wrapped in a single-key
// object (`{ "sites": [...] }`, `{ "nodes": [...] }`, ...) and an absent
// list is treated as empty.

use serde::{Deserialize, Serialize};

// ── Authentication ───────────────────────────────────────────────────

/// Login request body for `POST /login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub user_name: &'a str,
    pub user_passwd: &'a str,
    pub domain: &'a str,
}

/// Login response. The token doubles as the `AuthCookie` value and is
/// moved into a `SecretString` as soon as it is decoded.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub jwttoken: String,
}

/// `GET /api/config/dn/userapikey/local-admin?showPassword=yes`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyList {
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

#[derive(Debug, Deserialize)]
pub struct ApiKey {
    pub name: String,
    pub key: String,
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SiteList {
    #[serde(default)]
    pub sites: Vec<Site>,
}

/// A fabric site as listed by `GET /mso/api/v1/sites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
}

// ── Fabric nodes & interfaces ────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct NodeList {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// A switch node within a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub dn: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InterfaceList {
    #[serde(default)]
    pub interfaces: Vec<Interface>,
}

/// An interface descriptor on a node (`eth1/1` → `topology/pod-1/paths-101/pathep-[eth1/1]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub dn: String,
}

// ── Schemas ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SchemaList {
    #[serde(default)]
    pub schemas: Vec<SchemaSummary>,
}

/// Schema listing entry. The listing carries full documents; only the
/// identity fields are decoded here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    pub id: String,
    pub display_name: String,
}
