use crate::source::LayerNode;
use duckypad_core::{CompileError, KeyMap};
use log::debug;
use std::collections::BTreeMap;

/// Literal `extends` value naming the owning profile.
pub const PARENT_SOURCE: &str = "parent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendsSource {
    Parent,
    Layer(String),
}

impl ExtendsSource {
    pub fn name(&self) -> &str {
        match self {
            ExtendsSource::Parent => PARENT_SOURCE,
            ExtendsSource::Layer(id) => id,
        }
    }
}

/// The `extends` edges between the layers of one profile.
#[derive(Debug, Default)]
pub struct ExtendsGraph {
    edges: BTreeMap<String, Vec<ExtendsSource>>,
}

impl ExtendsGraph {
    /// Build the graph, rejecting sources that are neither `parent` nor a
    /// layer of the same profile.
    pub fn from_layers(layers: &BTreeMap<String, LayerNode>) -> Result<Self, CompileError> {
        let mut edges = BTreeMap::new();

        for (id, layer) in layers {
            let names = layer.extends.as_ref().map(|e| e.to_vec()).unwrap_or_default();
            let sources = names
                .into_iter()
                .map(|name| {
                    let name = name.trim().to_string();
                    if name == PARENT_SOURCE {
                        Ok(ExtendsSource::Parent)
                    } else if layers.contains_key(&name) {
                        Ok(ExtendsSource::Layer(name))
                    } else {
                        Err(CompileError::UnknownExtendsSource {
                            layer: id.clone(),
                            extends: name,
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            edges.insert(id.clone(), sources);
        }

        Ok(Self { edges })
    }

    pub fn sources(&self, layer: &str) -> &[ExtendsSource] {
        self.edges.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve `layer` to its final key map.
    ///
    /// Each source is resolved first and stripped of switcher declarations;
    /// sources apply in order, then `compose` layers the scope's own
    /// templates and keys over the inherited map. Finished layers are kept
    /// in `cache`. Reaching a layer that is still being resolved is a cycle.
    pub fn resolve<F>(
        &self,
        layer: &str,
        parent: &KeyMap,
        cache: &mut BTreeMap<String, KeyMap>,
        compose: &mut F,
    ) -> Result<KeyMap, CompileError>
    where
        F: FnMut(&str, KeyMap) -> Result<KeyMap, CompileError>,
    {
        let mut visiting = Vec::new();
        self.resolve_inner(layer, parent, cache, compose, &mut visiting)
    }

    fn resolve_inner<F>(
        &self,
        layer: &str,
        parent: &KeyMap,
        cache: &mut BTreeMap<String, KeyMap>,
        compose: &mut F,
        visiting: &mut Vec<String>,
    ) -> Result<KeyMap, CompileError>
    where
        F: FnMut(&str, KeyMap) -> Result<KeyMap, CompileError>,
    {
        if let Some(keys) = cache.get(layer) {
            return Ok(keys.clone());
        }

        if let Some(start) = visiting.iter().position(|l| l == layer) {
            let mut chain = visiting[start..].to_vec();
            chain.push(layer.to_string());
            return Err(CompileError::CyclicExtends { chain });
        }

        visiting.push(layer.to_string());

        let mut inherited = KeyMap::new();
        for source in self.sources(layer) {
            let source_keys = match source {
                ExtendsSource::Parent => parent.clone(),
                ExtendsSource::Layer(id) => self.resolve_inner(id, parent, cache, compose, visiting)?,
            };
            debug!(
                "Layer '{}' inherits {} keys from '{}'",
                layer,
                source_keys.len(),
                source.name()
            );
            inherited.extend(source_keys.iter().map(|(id, def)| (*id, def.inheritable())));
        }

        visiting.pop();

        let keys = compose(layer, inherited)?;
        cache.insert(layer.to_string(), keys.clone());
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duckypad_core::{KeyDef, KeyId, Label, SwitchKind, Switcher};
    use pretty_assertions::assert_eq;

    fn layers(yaml: &str) -> BTreeMap<String, LayerNode> {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn id(n: i64) -> KeyId {
        KeyId::new(n).unwrap()
    }

    fn parent_keys() -> KeyMap {
        let mut keys = KeyMap::new();
        keys.insert(id(1), KeyDef {
            label: Label::new("Ctrl"),
            switcher: Some(Switcher {
                target: "ctrl".to_string(),
                kind: SwitchKind::ModifierHold {
                    modifier: Some("CTRL".to_string()),
                },
            }),
            ..Default::default()
        });
        keys.insert(id(2), KeyDef::key("W"));
        keys
    }

    fn passthrough(_: &str, inherited: KeyMap) -> Result<KeyMap, CompileError> {
        Ok(inherited)
    }

    #[test]
    fn test_parent_inheritance_strips_switchers() {
        let graph = ExtendsGraph::from_layers(&layers("ctrl:\n  extends: parent\n")).unwrap();
        let mut cache = BTreeMap::new();
        let keys = graph
            .resolve("ctrl", &parent_keys(), &mut cache, &mut passthrough)
            .unwrap();

        assert_eq!(keys[&id(2)], KeyDef::key("W"));
        assert_eq!(keys[&id(1)].switcher, None);
        assert_eq!(keys[&id(1)].label, Label::new("Ctrl"));
    }

    #[test]
    fn test_layer_chain_and_override_order() {
        let graph = ExtendsGraph::from_layers(&layers(
            "a:\n  extends: parent\nb:\n  extends: [a]\n",
        ))
        .unwrap();

        let mut compose = |layer: &str, mut inherited: KeyMap| -> Result<KeyMap, CompileError> {
            if layer == "a" {
                inherited.insert(id(2), KeyDef::key("A"));
            }
            Ok(inherited)
        };

        let mut cache = BTreeMap::new();
        let keys = graph
            .resolve("b", &parent_keys(), &mut cache, &mut compose)
            .unwrap();
        assert_eq!(keys[&id(2)], KeyDef::key("A"));
        assert!(cache.contains_key("a"));
        assert!(cache.contains_key("b"));
    }

    #[test]
    fn test_cycle_detected() {
        let graph = ExtendsGraph::from_layers(&layers(
            "a:\n  extends: b\nb:\n  extends: a\n",
        ))
        .unwrap();

        let mut cache = BTreeMap::new();
        match graph.resolve("a", &KeyMap::new(), &mut cache, &mut passthrough) {
            Err(CompileError::CyclicExtends { chain }) => {
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("Expected CyclicExtends, got {:?}", other),
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn test_self_extends_is_cycle() {
        let graph = ExtendsGraph::from_layers(&layers("a:\n  extends: a\n")).unwrap();
        let result = graph.resolve("a", &KeyMap::new(), &mut BTreeMap::new(), &mut passthrough);
        assert!(matches!(result, Err(CompileError::CyclicExtends { .. })));
    }

    #[test]
    fn test_unknown_source() {
        match ExtendsGraph::from_layers(&layers("a:\n  extends: nowhere\n")) {
            Err(CompileError::UnknownExtendsSource { layer, extends }) => {
                assert_eq!(layer, "a");
                assert_eq!(extends, "nowhere");
            }
            other => panic!("Expected UnknownExtendsSource, got {:?}", other),
        }
    }
}
