use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use emberfall::AssetManager;
use emberfall::AssetKey;
use emberfall::rendering::asset_graph::nodes::model_node::ModelAsset;
use emberfall::rendering::gpu::GpuDevice;
use emberfall::rendering::gpu::headless::HeadlessDevice;
use emberfall::rendering::gpu::resource_tables::GpuResourceTables;
use emberfall::rendering::gpu::wgpu_device::WgpuDevice;
use emberfall::rendering::loader::model_loader::ModelLoader;
use emberfall::settings::{CliArgs, Command};
use log::{info, warn};
use tokio::task::JoinSet;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    #[cfg(feature = "tracy")]
    tracy_client::Client::start();

    let args = CliArgs::parse();
    log::trace!("Starting with args: {:?}", args);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("emberfall-worker")
        .build()?;

    let manager = Arc::new(AssetManager::new(args.asset_config()));
    info!("Serving assets from {}", manager.config().root.display());

    if args.gpu {
        let tables = manager.gpu_tables(WgpuDevice::request()?);
        runtime.block_on(run(&args.command, &manager, &tables))
    } else {
        let tables = manager.gpu_tables(HeadlessDevice::new());
        runtime.block_on(run(&args.command, &manager, &tables))?;
        let device = tables.device();
        println!(
            "headless device: {} buffers, {} textures, {} bytes",
            device.buffer_allocations(),
            device.texture_allocations(),
            device.allocated_bytes()
        );
        Ok(())
    }
}

async fn run<D: GpuDevice>(
    command: &Command,
    manager: &Arc<AssetManager>,
    tables: &GpuResourceTables<D>,
) -> Result<(), anyhow::Error> {
    match command {
        Command::Model { path, obj } => {
            let model = manager.prepare_model(path).await?;
            print_model(&model);

            if let Some(obj) = obj {
                dump_obj(manager, path, obj)?;
            }

            tables.upload_model(&model);
            for path in model.texture_paths() {
                // joins the prefetch that the model decode already spawned
                match manager.prepare_texture(path).await {
                    Ok(texture) => println!("  texture {path}: {texture:?}"),
                    Err(err) => println!("  texture {path}: {err}"),
                }
                let uploaded = tables.gpu_texture(manager.textures(), path).is_some();
                println!("    uploaded to {}: {uploaded}", tables.device().backend_name());
            }
        }
        Command::Texture { path } => {
            let texture = manager.prepare_texture(path).await?;
            println!("{texture:?}");
            println!("script metadata: {:?}", manager.script_metadata(path));

            if tables.gpu_texture(manager.textures(), path).is_none() {
                warn!("{path} could not be materialized on {}", tables.device().backend_name());
            }
        }
        Command::Prewarm { paths } => {
            let mut loads = JoinSet::new();
            for path in paths {
                let manager = manager.clone();
                let path = path.clone();
                loads.spawn(async move {
                    let model = manager.prepare_model(&path).await;
                    (path, model)
                });
            }

            let mut failed = 0usize;
            while let Some(joined) = loads.join_next().await {
                let (path, model) = joined?;
                match model {
                    Ok(model) => {
                        tables.upload_model(&model);
                        println!("{path}: {} sub meshes", model.sub_meshes.len());
                    }
                    Err(err) => {
                        failed += 1;
                        println!("{path}: {err}");
                    }
                }
            }
            println!(
                "{} models, {} textures requested, {} failed",
                manager.models().len(),
                manager.textures().len(),
                failed
            );
        }
    }

    Ok(())
}

fn print_model(model: &Arc<ModelAsset>) {
    println!("{} ({}), {} bones", model.path, model.name, model.bones.len());
    for (index, sub_mesh) in model.sub_meshes.iter().enumerate() {
        println!(
            "  #{index}: {} vertices, {} triangles, texture {:?} -> {:?}",
            sub_mesh.mesh.vertices.len(),
            sub_mesh.mesh.triangle_count(),
            sub_mesh.texture_name,
            model.texture_path_for_mesh(&sub_mesh.texture_name)
        );
    }
}

fn dump_obj(manager: &AssetManager, path: &str, out: &Path) -> Result<(), anyhow::Error> {
    let mesh = ModelLoader::load_mesh(manager.loader().as_ref(), &AssetKey::new(path))?;
    let file = File::create(out).with_context(|| format!("Creating {}", out.display()))?;
    mesh.dump_to_wavefront_obj(&mut BufWriter::new(file))?;
    info!("Wrote {}", out.display());
    Ok(())
}
