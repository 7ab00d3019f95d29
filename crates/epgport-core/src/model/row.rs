use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Interface type whose node DN is derived from pod/node instead of looked up.
pub const VPC_INTERFACE_TYPE: &str = "vpc";

/// VLAN ids the orchestrator accepts for port encapsulation.
pub const VLAN_RANGE: RangeInclusive<u16> = 1..=4094;

/// One desired static-port binding, as read from the CSV input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPortRow {
    pub schema: String,
    pub template_name: String,
    pub application_profile_name: String,
    pub epg_name: String,
    pub site_name: String,
    pub pod_name: String,
    pub node_name: String,
    /// `port`, `vpc`, `dpc`, ...
    pub intf_type: String,
    pub intf_name: String,
    pub vlan: u16,
    /// `immediate` or `lazy`.
    pub deployment_immediacy: String,
    /// `regular`, `native`, or `untagged`.
    pub mode: String,
    /// CSV line the row was read from (header is line 1); 0 if not read
    /// from CSV.
    #[serde(skip)]
    pub line: u64,
}

impl StaticPortRow {
    /// The fabric lookup key this row depends on.
    pub fn fabric_key(&self) -> FabricKey {
        FabricKey {
            site: self.site_name.clone(),
            pod: self.pod_name.clone(),
            node: self.node_name.clone(),
            intf_type: self.intf_type.clone(),
        }
    }
}

/// `(site, pod, node, interface type)`: one fabric interface listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FabricKey {
    pub site: String,
    pub pod: String,
    pub node: String,
    pub intf_type: String,
}

impl FabricKey {
    /// The interface type as the orchestrator's interface query expects it.
    pub fn wire_interface_type(&self) -> &str {
        match self.intf_type.as_str() {
            "port" => "physical",
            other => other,
        }
    }

    /// Whether the node DN is derived rather than looked up.
    pub fn is_vpc(&self) -> bool {
        self.intf_type == VPC_INTERFACE_TYPE
    }

    /// Node DN for vpc interfaces: `topology/{pod}/{node}`.
    pub fn vpc_node_dn(&self) -> String {
        format!("topology/{}/{}", self.pod, self.node)
    }
}

impl fmt::Display for FabricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{} ({})", self.site, self.pod, self.node, self.intf_type)
    }
}
