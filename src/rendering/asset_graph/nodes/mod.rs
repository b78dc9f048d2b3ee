pub mod model_node;
pub mod texture_node;
