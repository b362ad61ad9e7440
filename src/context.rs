//! Service context: everything a request needs, built once at startup.

use std::sync::Arc;

use crate::config::Config;
use crate::error::GatewayError;
use crate::image::ResizeEngine;
use crate::stats::StatsCounter;
use crate::upstream::{HttpOrigin, Origin};
use crate::watermark::{WatermarkAssets, Watermarker};

pub struct ServiceContext {
    pub config: Config,
    pub origin: Arc<dyn Origin>,
    pub resizer: ResizeEngine,
    pub watermarker: Option<Watermarker>,
    pub stats: Arc<StatsCounter>,
}

impl ServiceContext {
    /// Validate `config`, build the origin client and load watermark assets.
    ///
    /// Any error here must stop the process before it serves.
    pub fn initialize(config: Config) -> Result<Self, GatewayError> {
        config.validate().map_err(GatewayError::Config)?;

        let origin = HttpOrigin::new(config.proxy.url.clone(), config.proxy.timeout_duration())?;

        let watermarker = match &config.watermark {
            Some(watermark) => {
                let assets = WatermarkAssets::load(watermark.clone())?;
                tracing::info!(
                    path = %watermark.path.display(),
                    assets = assets.len(),
                    "Watermark assets loaded"
                );
                Some(Watermarker::new(assets))
            }
            None => None,
        };

        Ok(Self::new(config, Arc::new(origin), watermarker))
    }

    /// Assemble a context from parts, without touching network or disk.
    pub fn new(config: Config, origin: Arc<dyn Origin>, watermarker: Option<Watermarker>) -> Self {
        let resizer = ResizeEngine::new(
            config.image.background,
            config.image.contain_filter,
            config.image.max_size(),
        );
        let stats = Arc::new(StatsCounter::new(config.stats.period));

        Self {
            config,
            origin,
            resizer,
            watermarker,
            stats,
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.config.image.jpeg_quality
    }
}
