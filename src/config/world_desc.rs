/// Configuration descriptor for a Roomtone engine
#[derive(Debug, Clone)]
pub struct RoomtoneWorldDesc {
    /// Sample rate requested from the output device
    pub sample_rate: u32,
    /// Preferred device buffer size in frames
    pub block_size: usize,
    /// Number of audio channels (typically 2 for stereo)
    pub channels: u16,
    /// Soft cap on concurrent voices; starts past this are dropped with a warning
    pub max_sources: usize,
}

impl Default for RoomtoneWorldDesc {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            block_size: 1024,
            channels: 2,
            max_sources: 64,
        }
    }
}

impl RoomtoneWorldDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    pub fn block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    pub fn channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    pub fn max_sources(mut self, max: usize) -> Self {
        self.max_sources = max;
        self
    }
}
