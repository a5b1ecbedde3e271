//! Script and settings generation for resolved profiles.

pub mod key;
pub mod script;
pub mod settings;
pub mod switcher;

pub use key::{action_scripts, is_modifier_key, is_special_key};
pub use script::{KeyScripts, Script, DEFAULT_DELAY, GOTO_PROFILE};
pub use settings::{render_settings, SETTINGS_FILE};
pub use switcher::{exit_scripts, return_scripts, source_scripts};

use crate::resolve::{layer_scope, profile_scope, ResolvedProfile};
use duckypad_core::{
    CompileError, KeyId, KeyMap, ProfileConfig, ResolvedScript, SwitchKind,
};
use log::{debug, warn};
use std::collections::BTreeMap;

/// One generated profile directory, held in memory until written.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileOutput {
    pub name: String,
    /// Layer id for layer outputs, `None` for the profile itself
    pub layer: Option<String>,
    pub scope: String,
    pub config: ProfileConfig,
    pub keys: KeyMap,
    pub scripts: Vec<ResolvedScript>,
    pub settings: String,
}

impl ProfileOutput {
    /// Directory name on disk; path separators are not allowed in it.
    pub fn dir_name(&self) -> String {
        self.name.replace(['/', '\\'], "_")
    }

    /// `(file name, contents)` for every file in the directory, settings first.
    pub fn files(&self) -> Vec<(String, String)> {
        let mut files = vec![(SETTINGS_FILE.to_string(), self.settings.clone())];

        for script in &self.scripts {
            files.push((script.key.press_file_name(), script.press.clone()));
            if let Some(release) = &script.release {
                files.push((script.key.release_file_name(), release.clone()));
            }
        }

        files
    }

    pub fn script(&self, key: KeyId) -> Option<&ResolvedScript> {
        self.scripts.iter().find(|s| s.key == key)
    }
}

/// How a layer is left again once a switcher has entered it.
#[derive(Debug, Clone)]
struct ReturnRoute {
    kind: SwitchKind,
    source: String,
}

#[derive(Debug, Default)]
struct Routes {
    /// Return slots per target layer id
    slots: BTreeMap<String, BTreeMap<KeyId, ReturnRoute>>,
    /// Oneshot layer id -> profile its action keys return to
    oneshot: BTreeMap<String, String>,
    /// Layer id -> first profile or layer that switches into it
    sources: BTreeMap<String, String>,
}

/// Generate the profile directory and one directory per layer.
pub fn generate(profile: &ResolvedProfile) -> Result<Vec<ProfileOutput>, CompileError> {
    let layer_names: BTreeMap<&str, &str> = profile
        .layers
        .iter()
        .map(|l| (l.id.as_str(), l.name.as_str()))
        .collect();

    let mut scopes = vec![(None, profile.name.as_str(), &profile.config, &profile.keys)];
    scopes.extend(
        profile
            .layers
            .iter()
            .map(|l| (Some(l.id.as_str()), l.name.as_str(), &l.config, &l.keys)),
    );

    let mut routes = Routes::default();
    for &(layer, name, _, keys) in &scopes {
        collect_routes(layer, name, keys, &layer_names, &mut routes)?;
    }

    let no_slots = BTreeMap::new();
    let mut outputs = Vec::with_capacity(scopes.len());

    for &(layer, name, config, keys) in &scopes {
        let scope = match layer {
            Some(id) => layer_scope(id),
            None => profile_scope(name),
        };
        let slots = layer
            .and_then(|id| routes.slots.get(id))
            .unwrap_or(&no_slots);
        let oneshot_return = layer.and_then(|id| routes.oneshot.get(id));
        let layer_source = layer
            .and_then(|id| routes.sources.get(id))
            .map_or(profile.name.as_str(), String::as_str);

        let scripts = generate_scripts(
            &scope,
            layer,
            keys,
            &ScopeRoutes {
                slots,
                oneshot_return,
                layer_source,
            },
            &layer_names,
        );

        debug!("Generated {} key scripts for {}", scripts.len(), scope);
        outputs.push(ProfileOutput {
            name: name.to_string(),
            layer: layer.map(str::to_string),
            scope,
            config: config.clone(),
            keys: keys.clone(),
            scripts,
            settings: render_settings(config, keys),
        });
    }

    Ok(outputs)
}

fn collect_routes(
    layer: Option<&str>,
    name: &str,
    keys: &KeyMap,
    layer_names: &BTreeMap<&str, &str>,
    routes: &mut Routes,
) -> Result<(), CompileError> {
    let scope = layer.map(layer_scope).unwrap_or_else(|| profile_scope(name));

    for (&id, def) in keys {
        let switcher = match &def.switcher {
            Some(switcher) => switcher,
            None => continue,
        };

        if !layer_names.contains_key(switcher.target.as_str()) {
            return Err(CompileError::UnknownLayerReference {
                scope,
                key: id.get(),
                layer: switcher.target.clone(),
            });
        }

        if layer == Some(switcher.target.as_str()) {
            continue;
        }

        routes
            .sources
            .entry(switcher.target.clone())
            .or_insert_with(|| name.to_string());

        if switcher.kind == SwitchKind::Oneshot {
            let existing = routes
                .oneshot
                .entry(switcher.target.clone())
                .or_insert_with(|| name.to_string());
            if existing.as_str() != name {
                warn!(
                    "Oneshot layer '{}' already returns to '{}', ignoring route from '{}'",
                    switcher.target, existing, name
                );
            }
            continue;
        }

        let slots = routes.slots.entry(switcher.target.clone()).or_default();
        match slots.get(&id) {
            Some(existing) => warn!(
                "Key {} in layer '{}' already returns to '{}', ignoring route from '{}'",
                id, switcher.target, existing.source, name
            ),
            None => {
                slots.insert(
                    id,
                    ReturnRoute {
                        kind: switcher.kind.clone(),
                        source: name.to_string(),
                    },
                );
            }
        }
    }

    Ok(())
}

/// How one scope is left again: its return slots, the oneshot return and
/// the profile a self-targeting switcher goes back to.
struct ScopeRoutes<'a> {
    slots: &'a BTreeMap<KeyId, ReturnRoute>,
    oneshot_return: Option<&'a String>,
    layer_source: &'a str,
}

fn generate_scripts(
    scope: &str,
    layer: Option<&str>,
    keys: &KeyMap,
    routes: &ScopeRoutes<'_>,
    layer_names: &BTreeMap<&str, &str>,
) -> Vec<ResolvedScript> {
    let slots = routes.slots;
    let mut ids: Vec<KeyId> = keys.keys().copied().collect();
    ids.extend(slots.keys().copied().filter(|id| !keys.contains_key(id)));
    ids.sort();

    let mut scripts = Vec::new();

    for id in ids {
        let def = keys.get(&id);

        let key_scripts = if let Some(route) = slots.get(&id) {
            if def.map_or(false, |d| !d.is_label_only()) {
                warn!(
                    "Key {} in {} is the return key to '{}'; its own action is ignored",
                    id, scope, route.source
                );
            }
            match return_scripts(&route.kind, &route.source) {
                Some(scripts) => scripts,
                None => continue,
            }
        } else {
            let def = match def.filter(|d| d.has_content()) {
                Some(def) => def,
                None => continue,
            };

            match &def.switcher {
                Some(switcher) if layer == Some(switcher.target.as_str()) => {
                    debug!(
                        "Key {} in {} switches to its own layer, returning to '{}'",
                        id, scope, routes.layer_source
                    );
                    exit_scripts(&switcher.kind, routes.layer_source)
                }
                Some(switcher) => {
                    let target = layer_names
                        .get(switcher.target.as_str())
                        .copied()
                        .unwrap_or(switcher.target.as_str());
                    source_scripts(&switcher.kind, target)
                }
                None => {
                    let mut scripts = action_scripts(def);
                    let oneshot_return = routes.oneshot_return.filter(|_| !def.action.is_none());
                    if let Some(source) = oneshot_return {
                        scripts.press.goto(source);
                    }
                    scripts
                }
            }
        };

        let mut resolved = ResolvedScript::new(id, key_scripts.press.render());
        if let Some(release) = key_scripts.release {
            resolved = resolved.with_release(release.render());
        }
        scripts.push(resolved);
    }

    scripts
}
