//! Splits per-pixel work across scoped threads. Every output pixel only depends on the input pixel at the same
//! position, so source and destination can be chunked in lockstep without any synchronization.

/// Configuration for the parallel pixel passes.
#[derive(Debug, Clone)]
pub struct ParConfig {
    /// Minimum number of pixels per batch. Default: 16384.
    pub min_batch_pixels: usize,
    /// Number of worker threads. `None` uses [`std::thread::available_parallelism`].
    pub num_threads: Option<usize>,
}

impl Default for ParConfig {
    fn default() -> Self {
        Self {
            min_batch_pixels: 16 * 1024,
            num_threads: None,
        }
    }
}

impl ParConfig {
    pub fn with_threads(num_threads: Option<usize>) -> Self {
        Self {
            num_threads,
            ..Default::default()
        }
    }

    fn effective_threads(&self) -> usize {
        self.num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
    }
}

/// Pixel count below which spawning threads is not worth it.
const PARALLEL_THRESHOLD: usize = 64 * 1024;

/// Calls `f` on matching runs of source and destination pixels. `src` holds `src_stride` bytes per pixel,
/// `dst` holds `dst_stride` bytes per pixel and both have to describe the same number of pixels.
pub fn par_map_pixels<F>(src: &[u8], src_stride: usize, dst: &mut [u8], dst_stride: usize, config: &ParConfig, f: F)
where
    F: Fn(&[u8], &mut [u8]) + Sync,
{
    debug_assert_eq!(src.len() / src_stride, dst.len() / dst_stride);
    let pixels = src.len() / src_stride;
    let num_threads = config.effective_threads().max(1);

    if pixels < PARALLEL_THRESHOLD || pixels < config.min_batch_pixels || num_threads == 1 {
        f(src, dst);
        return;
    }

    let batch_pixels = pixels.div_ceil(num_threads).max(config.min_batch_pixels).max(1);
    let f = &f;

    std::thread::scope(|scope| {
        for (src_chunk, dst_chunk) in src
            .chunks(batch_pixels * src_stride)
            .zip(dst.chunks_mut(batch_pixels * dst_stride))
        {
            scope.spawn(move || f(src_chunk, dst_chunk));
        }
    });
}
