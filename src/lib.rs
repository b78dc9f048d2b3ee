pub mod error;
pub mod io;
pub mod rendering;
pub mod settings;
pub mod util;

pub use error::AssetError;
pub use rendering::asset_graph::asset_key::AssetKey;
pub use rendering::asset_graph::resolver::{LoadStatus, Loaded};
pub use rendering::asset_manager::AssetManager;
pub use settings::AssetConfig;
