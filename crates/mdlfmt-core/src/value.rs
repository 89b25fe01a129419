//! Leaf values carried by constant expressions.

use std::fmt;

use crate::types::TypeRef;

/// 128-bit identity key of a material, as reported by the event producer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ContentHash(pub [u32; 4]);

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.0 {
            write!(f, "{word:08x}")?;
        }
        Ok(())
    }
}

/// Gamma handling requested for a texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GammaMode {
    #[default]
    Default,
    Linear,
    Srgb,
}

impl GammaMode {
    /// Enumerant spelling inside the `tex` module.
    pub fn as_str(self) -> &'static str {
        match self {
            GammaMode::Default => "gamma_default",
            GammaMode::Linear => "gamma_linear",
            GammaMode::Srgb => "gamma_srgb",
        }
    }
}

/// Enum constant: the enum type it belongs to, its symbol and ordinal.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnumValue {
    pub ty: TypeRef,
    pub symbol: String,
    pub ordinal: i32,
}

/// Texture reference. An empty path is an unset texture.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextureValue {
    pub path: String,
    pub gamma: GammaMode,
}

impl TextureValue {
    pub fn is_unset(&self) -> bool {
        self.path.is_empty()
    }
}

/// Constant value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
    Color([f32; 3]),
    Enum(EnumValue),
    Texture(TextureValue),
    /// Components in order.
    Vector(Vec<f32>),
    /// Column vectors in order.
    Matrix(Vec<Vec<f32>>),
}

impl Value {
    /// Short human-readable kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Color(_) => "color",
            Value::Enum(_) => "enum",
            Value::Texture(_) => "texture",
            Value::Vector(_) => "vector",
            Value::Matrix(_) => "matrix",
        }
    }
}
