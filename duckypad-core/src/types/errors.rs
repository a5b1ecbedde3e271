use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Range \"{spec}\" in {scope} covers {expected} keys but {actual} values were given")]
    RangeLengthMismatch {
        scope: String,
        spec: String,
        expected: usize,
        actual: usize,
    },

    #[error("Key id {id} in {scope} is outside 1..={max}")]
    KeyIdOutOfRange { scope: String, id: i64, max: u8 },

    #[error("Invalid key spec \"{spec}\" in {scope}")]
    InvalidKeySpec { scope: String, spec: String },

    #[error("Invalid definition for key {key} in {scope}: {message}")]
    InvalidKeyDefinition {
        scope: String,
        key: u8,
        message: String,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown template '{name}' referenced by {scope}")]
    UnknownTemplate { scope: String, name: String },

    #[error("Cyclic extends: {}", chain.join(" -> "))]
    CyclicExtends { chain: Vec<String> },

    #[error("Layer '{layer}' extends unknown source '{extends}'")]
    UnknownExtendsSource { layer: String, extends: String },

    #[error("Key {key} in {scope} switches to unknown layer '{layer}'")]
    UnknownLayerReference {
        scope: String,
        key: u8,
        layer: String,
    },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Assembler failed on {file}: {message}")]
    Assembler { file: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{context} name cannot be empty")]
    EmptyName { context: String },

    #[error("{context} name \"{name}\" exceeds {max} character limit ({len} chars)")]
    NameTooLong {
        context: String,
        name: String,
        len: usize,
        max: usize,
    },

    #[error("Profile name \"{name}\" is emitted more than once")]
    DuplicateName { name: String },

    #[error("Profiles \"{first}\" and \"{second}\" would both be written to directory \"{dir}\"")]
    DirectoryCollision {
        first: String,
        second: String,
        dir: String,
    },

    #[error("Key {key} in {scope}: label \"{text}\" contains non-ASCII characters")]
    NonAsciiLabel { scope: String, key: u8, text: String },

    #[error(
        "Key {key} in {scope}: label line {line} \"{text}\" exceeds {max} character limit for {orientation} ({len} chars)"
    )]
    LabelLineTooLong {
        scope: String,
        key: u8,
        line: u8,
        text: String,
        len: usize,
        max: usize,
        orientation: String,
    },

    #[error(
        "Key {key} in {scope}: label total \"{text}\" exceeds {max} character limit for {orientation} ({len} chars total)"
    )]
    LabelTooLong {
        scope: String,
        key: u8,
        text: String,
        len: usize,
        max: usize,
        orientation: String,
    },

    #[error("Total profiles ({existing} existing + {new} new) exceeds maximum limit of {max}")]
    ProfileCountExceeded {
        existing: usize,
        new: usize,
        max: usize,
    },

    #[error("Key id {key} in {scope} is outside 1..={max}")]
    KeyIdOutOfRange { scope: String, key: u8, max: u8 },
}
