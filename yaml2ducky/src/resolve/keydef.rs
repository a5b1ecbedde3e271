//! Normalization of written key values into resolved `KeyDef`s

use crate::source::{ColorValue, KeyObject, KeyValue, LabelValue, OneOrMany, Scalar};
use duckypad_core::{CompileError, KeyAction, KeyDef, KeyId, Label, Rgb, SwitchKind, Switcher};
use log::warn;

pub fn normalize_key(value: &KeyValue, key: KeyId, scope: &str) -> Result<KeyDef, CompileError> {
    let invalid = |message: String| CompileError::InvalidKeyDefinition {
        scope: scope.to_string(),
        key: key.get(),
        message,
    };

    match value {
        KeyValue::Scalar(s) => Ok(key_def_from_name(s.to_string())),
        KeyValue::List(items) => {
            let scalars = items
                .iter()
                .map(|item| match item {
                    KeyValue::Scalar(s) => Ok(s.to_string()),
                    _ => Err(invalid("list shorthand may only hold plain values".to_string())),
                })
                .collect::<Result<Vec<_>, _>>()?;

            match scalars.as_slice() {
                [] => Ok(KeyDef::default()),
                [name] => Ok(key_def_from_name(name.clone())),
                [name, top] => Ok(key_def_from_name(name.clone()).with_label(label(top, None))),
                [name, top, bottom] => {
                    Ok(key_def_from_name(name.clone()).with_label(label(top, Some(bottom))))
                }
                _ => Err(invalid(format!(
                    "list shorthand takes at most [key, label1, label2], got {} items",
                    scalars.len()
                ))),
            }
        }
        KeyValue::Full(object) => normalize_object(object, key, scope),
    }
}

fn key_def_from_name(name: String) -> KeyDef {
    if name.is_empty() {
        KeyDef::default()
    } else {
        KeyDef::key(name)
    }
}

fn label(top: &str, bottom: Option<&str>) -> Label {
    let line = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
    Label {
        top: line(top),
        bottom: bottom.and_then(line),
    }
}

fn normalize_object(object: &KeyObject, key: KeyId, scope: &str) -> Result<KeyDef, CompileError> {
    let invalid = |message: String| CompileError::InvalidKeyDefinition {
        scope: scope.to_string(),
        key: key.get(),
        message,
    };

    let switcher = match (&object.layer, &object.layer_type) {
        (Some(target), layer_type) => Some(Switcher {
            target: target.clone(),
            kind: SwitchKind::from_declaration(layer_type.as_deref(), object.modifier.as_deref()),
        }),
        (None, Some(_)) => return Err(invalid("layer_type given without a target layer".to_string())),
        (None, None) => None,
    };

    let action = if switcher.is_some() {
        if object.key.is_some() || object.string.is_some() || object.action.is_some() {
            warn!(
                "Key {} in {}: switcher keys ignore key/string/action fields",
                key, scope
            );
        }
        KeyAction::None
    } else {
        normalize_action(object).map_err(invalid)?
    };

    let label = match &object.label {
        None => Label::default(),
        Some(LabelValue::Line(s)) => label(&s.to_string(), None),
        Some(LabelValue::Lines(lines)) => match lines.as_slice() {
            [] => Label::default(),
            [top] => label(&top.to_string(), None),
            [top, bottom] => label(&top.to_string(), Some(&bottom.to_string())),
            _ => {
                return Err(invalid(format!(
                    "label takes at most 2 lines, got {}",
                    lines.len()
                )))
            }
        },
    };

    let color = object
        .color
        .as_ref()
        .map(|c| parse_color(c, &format!("key {} in {}", key, scope)))
        .transpose()?;

    Ok(KeyDef {
        action,
        label,
        color,
        hold: object.hold,
        no_repeat: object.no_repeat,
        allow_abort: object.allow_abort,
        switcher,
    })
}

fn normalize_action(object: &KeyObject) -> Result<KeyAction, String> {
    match object.action.as_deref().map(str::to_lowercase).as_deref() {
        Some("media") => {
            let command = object
                .command
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| "media action needs a command".to_string())?;
            return Ok(KeyAction::Media(command.to_string()));
        }
        Some("custom") => return Ok(KeyAction::Script(script_lines(object.script.as_ref()))),
        Some(other) => return Err(format!("unknown action '{}'", other)),
        None => {}
    }

    if object.script.is_some() {
        return Ok(KeyAction::Script(script_lines(object.script.as_ref())));
    }

    if let Some(text) = &object.string {
        return Ok(KeyAction::Text(text.to_string()));
    }

    match &object.key {
        Some(Scalar::Text(name)) if name.is_empty() => Ok(KeyAction::None),
        Some(name) if object.key_type.as_deref().map(str::to_lowercase).as_deref() == Some("string") => {
            Ok(KeyAction::Text(name.to_string()))
        }
        Some(name) => Ok(KeyAction::Key {
            name: name.to_string(),
            modifier: object
                .modifier
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_uppercase),
        }),
        None => Ok(KeyAction::None),
    }
}

fn script_lines(script: Option<&OneOrMany>) -> Vec<String> {
    match script {
        None => Vec::new(),
        Some(OneOrMany::One(text)) => text.lines().map(str::to_string).collect(),
        Some(OneOrMany::Many(lines)) => lines.clone(),
    }
}

/// Parse a color value; `context` prefixes the error message.
pub fn parse_color(value: &ColorValue, context: &str) -> Result<Rgb, CompileError> {
    let parsed = match value {
        ColorValue::Components(components) => Rgb::from_components(components),
        ColorValue::Named(name) => Rgb::parse(name),
    };

    parsed.map_err(|e| match e {
        CompileError::InvalidColor(message) => {
            CompileError::InvalidColor(format!("{}: {}", context, message))
        }
        other => other,
    })
}
