// Schema document tree
//
// Typed view of an orchestrator schema, limited to the path the patcher
// walks: `templates[]` for template ids and
// `sites[] → anps[] → epgs[] → staticPorts[]` for the insertion point.
// Every node flattens unmodeled fields into `extra`, and lists the server
// omitted stay omitted, so a fetched document serializes back with its
// sibling data intact. Existing static ports are kept as raw JSON; only the
// entries this tool adds are typed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A full schema document as fetched from `GET /schemas/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<Template>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sites: Option<Vec<SiteBinding>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A template definition (`templates[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(rename = "templateID")]
    pub template_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The deployment of one template to one site (`sites[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteBinding {
    #[serde(rename = "siteId")]
    pub site_id: String,
    #[serde(rename = "templateID")]
    pub template_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anps: Option<Vec<SiteAnp>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Site-local application profile settings (`sites[].anps[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAnp {
    #[serde(rename = "anpRef")]
    pub anp_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epgs: Option<Vec<SiteEpg>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Site-local endpoint group settings (`sites[].anps[].epgs[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteEpg {
    #[serde(rename = "epgRef")]
    pub epg_ref: String,
    /// Entries already on the server are opaque; they are never rejected
    /// or rewritten.
    #[serde(
        rename = "staticPorts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub static_ports: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A static binding of an interface path to an EPG, as appended by the
/// patcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPort {
    #[serde(rename = "type")]
    pub port_type: String,
    pub path: String,
    pub port_encap_vlan: u16,
    pub deployment_immediacy: String,
    pub mode: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemaDocument {
    pub fn templates(&self) -> &[Template] {
        self.templates.as_deref().unwrap_or_default()
    }

    pub fn sites(&self) -> &[SiteBinding] {
        self.sites.as_deref().unwrap_or_default()
    }

    /// `templateID` of the template named `name`.
    pub fn template_id(&self, name: &str) -> Option<&str> {
        self.templates()
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.template_id.as_str())
    }

    /// Index of the site binding for `(site_id, template_id)`.
    pub fn site_binding_index(&self, site_id: &str, template_id: &str) -> Option<usize> {
        self.sites()
            .iter()
            .position(|s| s.site_id == site_id && s.template_id == template_id)
    }

    /// Mutable endpoint group at `(site, anp, epg)` indices.
    pub fn epg_mut(&mut self, site: usize, anp: usize, epg: usize) -> Option<&mut SiteEpg> {
        self.sites
            .as_mut()?
            .get_mut(site)?
            .anps
            .as_mut()?
            .get_mut(anp)?
            .epgs
            .as_mut()?
            .get_mut(epg)
    }

    /// Total static ports under the EPG with `epg_ref`, across all site bindings.
    pub fn static_port_count(&self, epg_ref: &str) -> usize {
        self.sites()
            .iter()
            .flat_map(SiteBinding::anps)
            .flat_map(SiteAnp::epgs)
            .filter(|e| e.epg_ref == epg_ref)
            .map(|e| e.static_ports().len())
            .sum()
    }
}

impl SiteBinding {
    pub fn anps(&self) -> &[SiteAnp] {
        self.anps.as_deref().unwrap_or_default()
    }

    /// Index of the application profile whose `anpRef` equals `anp_ref`.
    pub fn anp_index(&self, anp_ref: &str) -> Option<usize> {
        self.anps().iter().position(|a| a.anp_ref == anp_ref)
    }
}

impl SiteAnp {
    pub fn epgs(&self) -> &[SiteEpg] {
        self.epgs.as_deref().unwrap_or_default()
    }

    /// Index of the endpoint group whose `epgRef` equals `epg_ref`.
    pub fn epg_index(&self, epg_ref: &str) -> Option<usize> {
        self.epgs().iter().position(|e| e.epg_ref == epg_ref)
    }
}

impl SiteEpg {
    pub fn static_ports(&self) -> &[Value] {
        self.static_ports.as_deref().unwrap_or_default()
    }

    /// Append `entry`, creating `staticPorts` if the server omitted it.
    pub fn push_static_port(&mut self, entry: Value) {
        self.static_ports.get_or_insert_with(Vec::new).push(entry);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn raw() -> Value {
        json!({
            "id": "s1",
            "displayName": "Prod",
            "schemaVersion": 7,
            "templates": [
                { "name": "T1", "templateID": "t-1", "tenantId": "tn-1", "anps": [] }
            ],
            "sites": [{
                "siteId": "site-1",
                "templateID": "t-1",
                "contracts": [],
                "anps": [{
                    "anpRef": "/schemas/s1/templates/T1/anps/AP1",
                    "epgs": [{
                        "epgRef": "/schemas/s1/templates/T1/anps/AP1/epgs/EPG1",
                        "domainAssociations": [{ "dn": "uni/phys-PHY" }],
                        "staticPorts": [{
                            "type": "port",
                            "path": "topology/pod-1/paths-101/pathep-[eth1/1]",
                            "portEncapVlan": 100,
                            "deploymentImmediacy": "immediate",
                            "mode": "regular",
                            "microSegVlan": 0
                        }]
                    }]
                }]
            }]
        })
    }

    #[test]
    fn unmodeled_fields_survive_round_trip() {
        let original = raw();
        let doc: SchemaDocument = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), original);
    }

    #[test]
    fn lookups_resolve_by_name_and_reference() {
        let doc: SchemaDocument = serde_json::from_value(raw()).unwrap();
        assert_eq!(doc.template_id("T1"), Some("t-1"));
        assert_eq!(doc.template_id("T9"), None);
        assert_eq!(doc.site_binding_index("site-1", "t-1"), Some(0));
        assert_eq!(doc.site_binding_index("site-1", "t-2"), None);

        let site = &doc.sites()[0];
        let anp = site.anp_index("/schemas/s1/templates/T1/anps/AP1").unwrap();
        assert_eq!(
            site.anps()[anp].epg_index("/schemas/s1/templates/T1/anps/AP1/epgs/EPG1"),
            Some(0)
        );
        assert_eq!(
            doc.static_port_count("/schemas/s1/templates/T1/anps/AP1/epgs/EPG1"),
            1
        );
    }

    #[test]
    fn omitted_lists_stay_omitted() {
        let original = json!({
            "id": "s1",
            "displayName": "Prod",
            "sites": [{
                "siteId": "site-1",
                "templateID": "t-1",
                "anps": [{
                    "anpRef": "/schemas/s1/templates/T1/anps/AP1",
                    "epgs": [{ "epgRef": "/schemas/s1/templates/T1/anps/AP1/epgs/EPG1" }]
                }]
            }, {
                "siteId": "site-2",
                "templateID": "t-1"
            }]
        });
        let doc: SchemaDocument = serde_json::from_value(original.clone()).unwrap();

        assert!(doc.templates().is_empty());
        assert_eq!(serde_json::to_value(&doc).unwrap(), original);
    }

    #[test]
    fn incomplete_existing_port_is_kept_verbatim() {
        let mut original = raw();
        original["sites"][0]["anps"][0]["epgs"][0]["staticPorts"] = json!([
            { "type": "port", "path": "topology/pod-1/paths-101/pathep-[eth1/1]" }
        ]);
        let doc: SchemaDocument = serde_json::from_value(original.clone()).unwrap();

        assert_eq!(
            doc.static_port_count("/schemas/s1/templates/T1/anps/AP1/epgs/EPG1"),
            1
        );
        assert_eq!(serde_json::to_value(&doc).unwrap(), original);
    }

    #[test]
    fn push_creates_missing_static_port_list() {
        let mut epg: SiteEpg = serde_json::from_value(json!({ "epgRef": "e" })).unwrap();
        epg.push_static_port(json!({ "type": "port" }));

        assert_eq!(
            serde_json::to_value(&epg).unwrap(),
            json!({ "epgRef": "e", "staticPorts": [{ "type": "port" }] })
        );
    }
}
