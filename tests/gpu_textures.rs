mod common;

use std::sync::Arc;

use common::{DataDir, compressed_rgba, paletted_rgb, truecolor_rgb};
use emberfall::rendering::common::script_metadata::ScriptMetadata;
use emberfall::rendering::gpu::headless::HeadlessDevice;

#[tokio::test(flavor = "multi_thread")]
async fn rgb_textures_get_opaque_alpha() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    let rgb: Vec<u8> = (0..4 * 3 * 3).map(|i| i as u8).collect();
    data.write("Object1/Leaf01.etc", &truecolor_rgb(4, 3, &rgb))?;
    let (manager, _) = data.counting_manager();
    let tables = manager.gpu_tables(HeadlessDevice::new());

    manager.prepare_texture("Object1/Leaf01").await?;
    let texture = tables
        .gpu_texture(manager.textures(), "Object1/Leaf01")
        .ok_or_else(|| anyhow::anyhow!("texture has not been materialized"))?;

    assert_eq!((texture.width, texture.height), (4, 3));
    assert!(texture.rgba.chunks_exact(4).all(|px| px[3] == 255));
    assert_eq!(texture.pixel(1, 0), Some([3, 4, 5, 255]));
    assert_eq!(texture.pixel(3, 2), Some([33, 34, 35, 255]));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn textures_are_materialized_once() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    let rgba = [10u8, 20, 30, 40, 50, 60, 70, 80];
    data.write("Sky/texture/Clouds.ezt", &compressed_rgba(2, 1, &rgba))?;
    let (manager, _) = data.counting_manager();
    let tables = manager.gpu_tables(HeadlessDevice::new());

    manager.prepare_texture("Sky/Clouds.jpg").await?;
    let first = tables.gpu_texture(manager.textures(), "Sky/Clouds.jpg");
    let second = tables.gpu_texture(manager.textures(), "sky\\clouds.JPG");

    match (first, second) {
        (Some(a), Some(b)) => {
            assert!(Arc::ptr_eq(&a, &b));
            assert_eq!(a.rgba, rgba);
        }
        _ => anyhow::bail!("expected the texture on the device"),
    }
    assert_eq!(tables.device().texture_allocations(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn loading_textures_are_not_cached_as_misses() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Leaf01.epx", &paletted_rgb(1, 1, &[[9, 8, 7]], &[0]))?;
    let (manager, _) = data.counting_manager();
    let tables = manager.gpu_tables(HeadlessDevice::new());

    // the counting loader delays every read, so the texture is still loading here
    manager.textures().prefetch_texture("Leaf01");
    assert!(tables.gpu_texture(manager.textures(), "Leaf01").is_none());
    assert_eq!(tables.cached_textures(), 0);

    manager.prepare_texture("Leaf01").await?;
    let texture = tables
        .gpu_texture(manager.textures(), "Leaf01")
        .ok_or_else(|| anyhow::anyhow!("texture has not been materialized"))?;
    assert_eq!(texture.pixel(0, 0), Some([9, 8, 7, 255]));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unusable_textures_are_cached_misses() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Empty.etc", &truecolor_rgb(0, 0, &[]))?;
    let (manager, _) = data.counting_manager();
    let tables = manager.gpu_tables(HeadlessDevice::new());

    let empty = manager.prepare_texture("Empty").await?;
    assert_eq!((empty.width, empty.height), (0, 0));
    assert!(tables.gpu_texture(manager.textures(), "Empty").is_none());
    assert!(tables.gpu_texture(manager.textures(), "Empty").is_none());

    assert!(tables.gpu_texture(manager.textures(), "NeverPrepared").is_none());
    assert_eq!(tables.cached_textures(), 1);
    assert_eq!(tables.device().texture_allocations(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn script_metadata_comes_from_the_file_name() -> Result<(), anyhow::Error> {
    let data = DataDir::new()?;
    data.write("Object1/Leaf01_A.etc", &truecolor_rgb(1, 1, &[1, 2, 3]))?;
    data.write("Object1/Bark01.etc", &truecolor_rgb(1, 1, &[1, 2, 3]))?;
    let (manager, _) = data.counting_manager();

    assert_eq!(manager.script_metadata("Object1/Leaf01_A"), None);
    manager.prepare_texture("Object1/Leaf01_A.tga").await?;
    manager.prepare_texture("Object1/Bark01").await?;

    assert_eq!(manager.script_metadata("object1/leaf01_a.TGA"), Some(ScriptMetadata::AlphaBlend));
    assert_eq!(manager.script_metadata("Object1/Bark01"), None);
    Ok(())
}
