// ── Document patcher ──
//
// Applies one CSV row to a schema document: build the static-port entry,
// derive the anp/epg reference strings, walk
// `templates → sites → anps → epgs` to the insertion point, then append.
// Every index is resolved (or turned into a named error) before the
// document is touched, so a failing row leaves it unchanged.

use tracing::debug;

use crate::error::CoreError;
use crate::model::{FabricInterfaceSet, SchemaDocument, StaticPort, StaticPortRow};

/// Resolved position of an endpoint group inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpgLocation {
    pub site: usize,
    pub anp: usize,
    pub epg: usize,
}

/// `/schemas/{schemaId}/templates/{templateName}/anps/{profileName}`
pub fn anp_reference(schema_id: &str, template_name: &str, profile_name: &str) -> String {
    format!("/schemas/{schema_id}/templates/{template_name}/anps/{profile_name}")
}

/// `{anp_reference}/epgs/{epgName}`
pub fn epg_reference(anp_ref: &str, epg_name: &str) -> String {
    format!("{anp_ref}/epgs/{epg_name}")
}

/// Build the static-port entry for `row`, resolving the interface DN in
/// the row's fabric.
pub fn build_static_port(
    row: &StaticPortRow,
    fabric: &FabricInterfaceSet,
) -> Result<StaticPort, CoreError> {
    let path = fabric.require_interface_dn(&row.intf_name)?;
    Ok(StaticPort {
        port_type: row.intf_type.clone(),
        path: path.to_owned(),
        port_encap_vlan: row.vlan,
        deployment_immediacy: row.deployment_immediacy.clone(),
        mode: row.mode.clone(),
        extra: serde_json::Map::new(),
    })
}

/// Find the endpoint group `row` targets inside `document`.
pub fn locate_epg(
    document: &SchemaDocument,
    row: &StaticPortRow,
    site_id: &str,
) -> Result<EpgLocation, CoreError> {
    let schema = &document.display_name;

    let template_id =
        document
            .template_id(&row.template_name)
            .ok_or_else(|| CoreError::TemplateNotFound {
                schema: schema.clone(),
                name: row.template_name.clone(),
            })?;

    let anp_ref = anp_reference(&document.id, &row.template_name, &row.application_profile_name);
    let epg_ref = epg_reference(&anp_ref, &row.epg_name);

    let site = document
        .site_binding_index(site_id, template_id)
        .ok_or_else(|| CoreError::SiteBindingNotFound {
            schema: schema.clone(),
            template: row.template_name.clone(),
            site_id: site_id.to_owned(),
        })?;
    let binding = &document.sites()[site];

    let anp = binding
        .anp_index(&anp_ref)
        .ok_or_else(|| CoreError::ApplicationProfileNotFound {
            schema: schema.clone(),
            reference: anp_ref.clone(),
        })?;

    let epg = binding.anps()[anp]
        .epg_index(&epg_ref)
        .ok_or_else(|| CoreError::EndpointGroupNotFound {
            schema: schema.clone(),
            reference: epg_ref,
        })?;

    Ok(EpgLocation { site, anp, epg })
}

/// Append the static port described by `row` to its endpoint group.
pub fn apply_row(
    document: &mut SchemaDocument,
    row: &StaticPortRow,
    fabric: &FabricInterfaceSet,
) -> Result<EpgLocation, CoreError> {
    let entry = build_static_port(row, fabric)?;
    let location = locate_epg(document, row, &fabric.site_id)?;
    let encoded = serde_json::to_value(&entry).map_err(|e| CoreError::Api {
        message: format!("cannot encode static port: {e}"),
        body: None,
    })?;

    let schema = document.display_name.clone();
    let reference = epg_reference(
        &anp_reference(&document.id, &row.template_name, &row.application_profile_name),
        &row.epg_name,
    );
    let epg = document
        .epg_mut(location.site, location.anp, location.epg)
        .ok_or_else(|| CoreError::EndpointGroupNotFound {
            schema: schema.clone(),
            reference,
        })?;
    debug!(
        %schema,
        epg = %epg.epg_ref,
        path = %entry.path,
        vlan = entry.port_encap_vlan,
        "appending static port"
    );
    epg.push_static_port(encoded);

    Ok(location)
}
