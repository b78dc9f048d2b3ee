/// This module will handle converting the types from emberfall-files into an intermediate representation,
/// that can then be uploaded by any of the GPU backends.
/// This abstraction is made to be a) render backend agnostic and b) allow for caching of the intermediate
/// representation (as opposed to the parsed assets), so the GPU objects can be derived at any later time,
/// without directly working in the complexity that is the asset files themselves.
pub mod mesh_importer;
pub mod texture_importer;
