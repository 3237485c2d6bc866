//! CUDA availability detection
//!
//! The panel only needs a yes/no answer at construction time: the Cuda
//! checkbox is greyed out when no device is present. The probe runs once
//! and is cached for the process lifetime.

use std::sync::OnceLock;

static CUDA_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Whether a CUDA-capable GPU is present on this machine.
pub fn cuda_available() -> bool {
    *CUDA_AVAILABLE.get_or_init(probe_cuda)
}

#[cfg(feature = "nvidia")]
fn probe_cuda() -> bool {
    use nvml_wrapper::Nvml;

    match Nvml::init() {
        Ok(nvml) => match nvml.device_count() {
            Ok(0) => {
                log::info!("NVML: no CUDA devices found");
                false
            }
            Ok(count) => {
                log::info!("NVML: found {} CUDA device(s)", count);
                true
            }
            Err(e) => {
                log::warn!("NVML: failed to get device count: {}", e);
                false
            }
        },
        Err(e) => {
            log::info!("NVML: not available ({})", e);
            false
        }
    }
}

#[cfg(not(feature = "nvidia"))]
fn probe_cuda() -> bool {
    log::info!("NVML: NVIDIA support not compiled in");
    false
}
