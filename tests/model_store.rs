mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{DataDir, quad_model, truecolor_rgb};
use emberfall::rendering::gpu::headless::HeadlessDevice;
use emberfall::{AssetError, LoadStatus};

#[tokio::test(flavor = "multi_thread")]
async fn quads_are_flattened_into_six_vertices() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Object1/Tree01.emd", &quad_model("Tree01", "Leaf01"))?;
    let (manager, _) = data.counting_manager();

    let model = manager.prepare_model("Object1/Tree01").await?;
    assert_eq!(model.name, "Tree01");
    assert_eq!(model.sub_meshes.len(), 1);

    let mesh = &model.sub_meshes[0].mesh;
    assert_eq!(mesh.vertices.len(), 6);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    // per corner uvs survive, even though corners 0 and 3 share their position
    assert_eq!(mesh.vertices[0].position, mesh.vertices[3].position);
    assert_eq!(mesh.vertices[3].uv.x, 3.0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn model_paths_keep_the_authored_extension() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Object1/Tree01.emd", &quad_model("Tree01", ""))?;
    let (manager, _) = data.counting_manager();

    let model = manager.prepare_model("Object1\\Tree01.emd").await?;
    assert_eq!(model.path, "Object1/Tree01.emd");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn texture_references_resolve_against_the_model_directory() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Object1/Tree01.emd", &quad_model("Tree01", "Leaf01"))?;
    let (manager, _) = data.counting_manager();

    let model = manager.prepare_model("Object1/Tree01").await?;
    assert_eq!(model.texture_path_for_mesh("Leaf01"), Some("Object1/Leaf01"));
    assert_eq!(model.texture_path_for_mesh("LEAF01"), Some("Object1/Leaf01"));
    assert_eq!(model.texture_path_for_mesh("Bark01"), None);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn decoding_a_model_prefetches_its_textures() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Object1/Tree01.emd", &quad_model("Tree01", "Leaf01.tga"))?;
    data.write("Object1/Leaf01.etc", &truecolor_rgb(1, 1, &[255, 0, 0]))?;
    let (manager, loader) = data.counting_manager();

    let model = manager.prepare_model("Object1/Tree01").await?;
    let texture_path = model
        .texture_path_for_mesh("Leaf01.tga")
        .ok_or_else(|| anyhow::anyhow!("no texture path"))?;
    assert_eq!(texture_path, "Object1/Leaf01.tga");

    // nobody asked for the texture, yet it is already being loaded
    assert!(!matches!(manager.textures().status(texture_path), LoadStatus::NotRequested));

    let texture = manager.prepare_texture(texture_path).await?;
    assert_eq!(texture.data, vec![255, 0, 0]);
    // one read for the model and one for the texture, the explicit request joined the prefetch
    assert_eq!(loader.reads(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn models_sharing_a_texture_decode_it_once() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Object1/Tree01.emd", &quad_model("Tree01", "Leaf01"))?;
    data.write("Object1/Tree02.emd", &quad_model("Tree02", "leaf01"))?;
    data.write("Object1/Leaf01.etc", &truecolor_rgb(1, 1, &[1, 1, 1]))?;
    let (manager, loader) = data.counting_manager();

    let (a, b) = tokio::join!(
        manager.prepare_model("Object1/Tree01"),
        manager.prepare_model("Object1/Tree02")
    );
    let (a, b) = (a?, b?);
    assert!(!Arc::ptr_eq(&a, &b));

    manager.prepare_texture("Object1/Leaf01").await?;
    // both prefetches target the same key, give a stray second decode the chance to show up
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(manager.textures().len(), 1);
    assert_eq!(loader.reads(), 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn parent_relative_textures_share_the_direct_entry() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Object1/Tree01.emd", &quad_model("Tree01", "..\\Shared\\Leaf01"))?;
    data.write("Shared/Leaf01.etc", &truecolor_rgb(1, 1, &[4, 5, 6]))?;
    let (manager, loader) = data.counting_manager();

    let model = manager.prepare_model("Object1/Tree01").await?;
    assert_eq!(model.texture_path_for_mesh("..\\Shared\\Leaf01"), Some("Shared/Leaf01"));

    let texture = manager.prepare_texture("Shared/Leaf01").await?;
    assert_eq!(texture.data, vec![4, 5, 6]);
    assert_eq!(manager.textures().len(), 1);
    assert_eq!(loader.reads(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_models_fail_with_not_found() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    let (manager, loader) = data.counting_manager();

    let err = manager
        .prepare_model("Object1/Rock01")
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("expected a failure"))?;
    assert!(matches!(err.as_ref(), AssetError::NotFound { path } if path == "Object1/Rock01"));
    assert!(matches!(manager.models().status("object1\\rock01"), LoadStatus::Failed(_)));
    assert_eq!(loader.reads(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn buffers_keep_their_identity() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Object1/Tree01.emd", &quad_model("Tree01", ""))?;
    let (manager, _) = data.counting_manager();
    let tables = manager.gpu_tables(HeadlessDevice::new());

    let model = manager.prepare_model("Object1/Tree01").await?;
    assert!(model.texture_paths().next().is_none());

    tables.upload_model(&model);
    let allocations = tables.device().buffer_allocations();
    assert_eq!(allocations, 2);

    // a second resolve hands out the same node, so the same buffers
    let again = manager.prepare_model("object1/tree01").await?;
    tables.upload_model(&again);
    assert_eq!(tables.device().buffer_allocations(), allocations);

    let first = tables.vertex_buffer(&model, 0).ok_or_else(|| anyhow::anyhow!("no vertex buffer"))?;
    let second = tables.vertex_buffer(&again, 0).ok_or_else(|| anyhow::anyhow!("no vertex buffer"))?;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.data.len(), 6 * 32);

    let indices = tables.index_buffer(&model, 0).ok_or_else(|| anyhow::anyhow!("no index buffer"))?;
    assert_eq!(bytemuck_len(&indices.data), 6);
    Ok(())
}

fn bytemuck_len(bytes: &[u8]) -> usize {
    bytes.len() / size_of::<u32>()
}
