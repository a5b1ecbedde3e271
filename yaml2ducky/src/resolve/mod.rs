//! Turns a parsed profile document into fully resolved key maps.

pub mod inheritance;
pub mod keydef;
pub mod range;
pub mod templates;

pub use inheritance::{ExtendsGraph, ExtendsSource, PARENT_SOURCE};
pub use keydef::{normalize_key, parse_color};
pub use range::{expand_key_map, KeySpec};
pub use templates::TemplateRegistry;

use crate::source::{ConfigNode, ProfileNode};
use duckypad_core::{CompileError, KeyMap, Orientation, ProfileConfig};
use log::{debug, info};
use serde_yaml::Mapping;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayer {
    /// Id under `layers:`, also what switchers name as their target
    pub id: String,
    /// Output profile name
    pub name: String,
    pub config: ProfileConfig,
    pub keys: KeyMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    pub name: String,
    pub config: ProfileConfig,
    pub keys: KeyMap,
    /// Layers ordered by id
    pub layers: Vec<ResolvedLayer>,
}

impl ResolvedProfile {
    pub fn layer(&self, id: &str) -> Option<&ResolvedLayer> {
        self.layers.iter().find(|l| l.id == id)
    }
}

pub fn profile_scope(name: &str) -> String {
    format!("profile '{}'", name)
}

pub fn layer_scope(id: &str) -> String {
    format!("layer '{}'", id)
}

/// Resolve the profile and all of its layers.
///
/// Each scope's map is composed from its inherited keys, then its
/// templates in listed order, then its own `keys:`; every stage replaces
/// entries key by key.
pub fn resolve_profile(
    profile: &ProfileNode,
    templates: &mut TemplateRegistry,
) -> Result<ResolvedProfile, CompileError> {
    let scope = profile_scope(&profile.name);
    let config = build_config(&profile.config, &scope)?;

    let keys = compose_scope(
        KeyMap::new(),
        &profile.templates,
        &profile.keys,
        config.orientation(),
        &scope,
        templates,
    )?;
    debug!("Resolved {} keys for {}", keys.len(), scope);

    let graph = ExtendsGraph::from_layers(&profile.layers)?;

    let mut layer_configs = BTreeMap::new();
    for (id, layer) in &profile.layers {
        let layer_config = match &layer.config {
            Some(node) => build_config(node, &layer_scope(id))?,
            None => ProfileConfig::default(),
        };
        layer_configs.insert(id.clone(), layer_config);
    }

    let mut compose = |id: &str, inherited: KeyMap| -> Result<KeyMap, CompileError> {
        let layer = profile.layers.get(id);
        let orientation = layer_configs
            .get(id)
            .map(ProfileConfig::orientation)
            .unwrap_or_default();
        let empty = Mapping::new();

        compose_scope(
            inherited,
            layer.map(|l| l.templates.as_slice()).unwrap_or(&[]),
            layer.map(|l| &l.keys).unwrap_or(&empty),
            orientation,
            &layer_scope(id),
            templates,
        )
    };

    let mut cache = BTreeMap::new();
    let mut layers = Vec::with_capacity(profile.layers.len());
    for (id, layer) in &profile.layers {
        let layer_keys = graph.resolve(id, &keys, &mut cache, &mut compose)?;
        let name = layer
            .name
            .clone()
            .unwrap_or_else(|| format!("{}-{}", profile.name, id));

        debug!("Resolved {} keys for layer '{}' ({})", layer_keys.len(), id, name);
        layers.push(ResolvedLayer {
            id: id.clone(),
            name,
            config: layer_configs.get(id).cloned().unwrap_or_default(),
            keys: layer_keys,
        });
    }

    info!(
        "Resolved profile '{}' with {} layer(s)",
        profile.name,
        layers.len()
    );

    Ok(ResolvedProfile {
        name: profile.name.clone(),
        config,
        keys,
        layers,
    })
}

fn compose_scope(
    inherited: KeyMap,
    template_names: &[String],
    keys: &Mapping,
    orientation: Orientation,
    scope: &str,
    templates: &mut TemplateRegistry,
) -> Result<KeyMap, CompileError> {
    let mut composed = inherited;
    composed.extend(templates.resolve(template_names, orientation, scope)?);

    for (id, value) in expand_key_map(keys, scope)? {
        composed.insert(id, normalize_key(&value, id, scope)?);
    }

    Ok(composed)
}

pub fn build_config(node: &ConfigNode, scope: &str) -> Result<ProfileConfig, CompileError> {
    let orientation = node
        .orientation
        .as_deref()
        .map(str::parse::<Orientation>)
        .transpose()
        .map_err(|message| CompileError::Parse {
            path: scope.to_string(),
            message,
        })?;

    let background_color = node
        .background_color
        .as_ref()
        .map(|c| parse_color(c, &format!("background_color of {}", scope)))
        .transpose()?;

    let keydown_color = node
        .keydown_color
        .as_ref()
        .map(|c| parse_color(c, &format!("keydown_color of {}", scope)))
        .transpose()?;

    Ok(ProfileConfig {
        orientation,
        background_color,
        dim_unused: node.dim_unused,
        keydown_color,
    })
}
