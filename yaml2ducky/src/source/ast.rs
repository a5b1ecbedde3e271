use serde::Deserialize;
use serde_yaml::Mapping;
use std::collections::BTreeMap;
use std::fmt;

// Document nodes for YAML profile definitions
#[derive(Debug, Deserialize)]
pub struct SourceFile {
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateNode>,
    pub profile: ProfileNode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileNode {
    pub name: String,
    #[serde(default)]
    pub config: ConfigNode,
    #[serde(default)]
    pub templates: Vec<String>,
    #[serde(default)]
    pub keys: Mapping,
    #[serde(default)]
    pub layers: BTreeMap<String, LayerNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigNode {
    pub orientation: Option<String>,
    #[serde(alias = "bg_color")]
    pub background_color: Option<ColorValue>,
    #[serde(alias = "dim_unused_keys")]
    pub dim_unused: Option<bool>,
    pub keydown_color: Option<ColorValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerNode {
    pub name: Option<String>,
    pub extends: Option<OneOrMany>,
    pub config: Option<ConfigNode>,
    #[serde(default)]
    pub templates: Vec<String>,
    #[serde(default)]
    pub keys: Mapping,
}

/// A reusable key set, inline under `templates:` or in its own file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateNode {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub keys: Mapping,
    /// Orientation-aware form: abstract key names...
    pub key_definitions: Option<BTreeMap<String, KeyValue>>,
    /// ...placed on physical slots per orientation.
    #[serde(default)]
    pub key_positions: BTreeMap<String, BTreeMap<String, i64>>,
    #[serde(default)]
    pub supported_orientations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateFile {
    pub template: TemplateNode,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s.clone()],
            OneOrMany::Many(v) => v.clone(),
        }
    }
}

/// A key value as written: full object, list shorthand or bare scalar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    // Sequences are tried first so a shorthand list never binds to the
    // object's fields positionally.
    List(Vec<KeyValue>),
    Full(Box<KeyObject>),
    Scalar(Scalar),
}

impl KeyValue {
    pub fn text(s: &str) -> Self {
        KeyValue::Scalar(Scalar::Text(s.to_string()))
    }
}

/// YAML scalars keys and labels may be written as; `1` and `"1"` both
/// render as the text `1`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KeyObject {
    pub key: Option<Scalar>,
    pub modifier: Option<String>,
    #[serde(default)]
    pub hold: bool,
    pub string: Option<Scalar>,
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    pub action: Option<String>,
    pub command: Option<String>,
    pub script: Option<OneOrMany>,
    pub label: Option<LabelValue>,
    pub color: Option<ColorValue>,
    #[serde(default)]
    pub no_repeat: bool,
    #[serde(default)]
    pub allow_abort: bool,
    pub layer: Option<String>,
    pub layer_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    Line(Scalar),
    Lines(Vec<Scalar>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Components(Vec<i64>),
    Named(String),
}
