/// Contrasting to the importers, that convert already parsed files into our rendering IR,
/// Loaders are a lot more high level. They locate the files, call the parsers and pipe them into importers
pub mod formats;
pub mod model_loader;
pub mod texture_loader;
