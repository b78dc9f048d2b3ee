/// Hints encoded into texture file names, consumed by the material setup.
pub mod script_metadata;
/// basic types (e.g. mesh) to abstract away from both the asset format and the render backend.
pub mod types;
