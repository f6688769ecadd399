//! Material definitions with role-tagged texture references

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The fixed set of texture roles a material can carry
///
/// A material holds at most one texture per role. `Specular` and `Glow`
/// appear in real asset sets and are accepted on load, but the export
/// pipeline does not consume them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureRole {
    /// Primary color map
    Diffuse,
    /// Color map under the newer naming convention
    BaseColor,
    /// Tangent-space normal map
    Normal,
    /// Opacity/blend mask
    Mask,
    /// Skin-specific opacity mask
    SkinMask,
    /// Specular map (not exported)
    Specular,
    /// Emissive map (not exported)
    Glow,
}

impl TextureRole {
    /// Stable lowercase name, matching the manifest key
    pub fn name(&self) -> &'static str {
        match self {
            TextureRole::Diffuse => "diffuse",
            TextureRole::BaseColor => "base_color",
            TextureRole::Normal => "normal",
            TextureRole::Mask => "mask",
            TextureRole::SkinMask => "skin_mask",
            TextureRole::Specular => "specular",
            TextureRole::Glow => "glow",
        }
    }
}

/// An opaque texture reference, resolved by a [`TextureDecoder`]
///
/// [`TextureDecoder`]: crate::texture::TextureDecoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureRef(String);

impl TextureRef {
    /// Create a reference from a path-like string
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The raw reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A material: a name plus role-tagged texture references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRef {
    /// Material name, unique within a model
    pub name: String,
    /// Texture references by role, at most one per role
    #[serde(default)]
    pub textures: HashMap<TextureRole, TextureRef>,
}

impl MaterialRef {
    /// Create a material with no textures
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            textures: HashMap::new(),
        }
    }

    /// Attach a texture, replacing any previous one in the same role
    pub fn with_texture(mut self, role: TextureRole, texture: TextureRef) -> Self {
        self.textures.insert(role, texture);
        self
    }

    /// Get the texture in a role, if any
    pub fn texture(&self, role: TextureRole) -> Option<&TextureRef> {
        self.textures.get(&role)
    }

    /// The color map slot: `Diffuse` takes priority over `BaseColor`
    pub fn color_slot(&self) -> Option<(TextureRole, &TextureRef)> {
        self.slot(TextureRole::Diffuse)
            .or_else(|| self.slot(TextureRole::BaseColor))
    }

    /// The opacity mask slot: `Mask` takes priority over `SkinMask`
    pub fn mask_slot(&self) -> Option<(TextureRole, &TextureRef)> {
        self.slot(TextureRole::Mask)
            .or_else(|| self.slot(TextureRole::SkinMask))
    }

    fn slot(&self, role: TextureRole) -> Option<(TextureRole, &TextureRef)> {
        self.textures.get(&role).map(|texture| (role, texture))
    }

    /// The material name as written to the material file
    pub fn export_name(&self) -> String {
        format!("{}_Material", self.name)
    }
}
