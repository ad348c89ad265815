/// Compute device the Whisper model runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Gpu,
    Cpu,
}

impl Device {
    /// Return the accelerated device when the crate was built with a GPU
    /// backend, falling back to CPU otherwise.
    pub fn preferred() -> Self {
        #[cfg(any(feature = "cuda", feature = "metal"))]
        {
            Device::Gpu
        }
        #[cfg(not(any(feature = "cuda", feature = "metal")))]
        {
            Device::Cpu
        }
    }

    pub fn use_gpu(self) -> bool {
        self == Device::Gpu
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::preferred()
    }
}
