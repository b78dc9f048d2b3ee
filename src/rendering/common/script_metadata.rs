/// Render hints that the content authors encoded into the texture file names, as the suffix after the last
/// underscore, e.g. `Leaf01_A.tga`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScriptMetadata {
    AlphaBlend,
    Emissive,
    HiddenMesh,
    Streamed,
    NoBlend,
    ShadowCast,
}

impl ScriptMetadata {
    pub fn from_path(path: &str) -> Option<ScriptMetadata> {
        let file = path.rsplit(['/', '\\']).next()?;
        let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
        let (_, token) = stem.rsplit_once('_')?;

        match token.to_ascii_uppercase().as_str() {
            "A" => Some(ScriptMetadata::AlphaBlend),
            "R" => Some(ScriptMetadata::Emissive),
            "H" => Some(ScriptMetadata::HiddenMesh),
            "S" => Some(ScriptMetadata::Streamed),
            "N" => Some(ScriptMetadata::NoBlend),
            "C" => Some(ScriptMetadata::ShadowCast),
            _ => None,
        }
    }
}
