use folio_core::Viewport;
use web_sys as web;

pub mod background;
mod helpers;
pub mod hero;
pub mod tile;

pub use background::BackgroundSurface;
pub use hero::HeroSurface;
pub use tile::TileSurface;

/// Per-surface WebGPU context. Every surface owns its own; nothing is shared.
pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Create a context bound to `canvas`. Tiles ask for the low-power
    /// adapter since there can be dozens of them.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        viewport: Viewport,
        power_preference: wgpu::PowerPreference,
    ) -> anyhow::Result<Self> {
        let (width, height) = viewport.physical_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("folio_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("device request failed: {}", e))?;
        // the default handler panics; errors outside a scope only get logged
        device.on_uncaptured_error(Box::new(|e| {
            log::error!("[gpu] uncaptured error: {}", e);
        }));
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // canvases are layered over the page, so prefer premultiplied output
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Open a validation scope around resource creation.
    pub fn begin_setup(&self) {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
    }

    /// Close the scope from [`GpuContext::begin_setup`]. A shader, pipeline
    /// or bind group rejected by validation fails the whole setup.
    pub async fn finish_setup(&self, label: &str) -> anyhow::Result<()> {
        match self.device.pop_error_scope().await {
            Some(e) => Err(anyhow::anyhow!("{} setup rejected: {}", label, e)),
            None => Ok(()),
        }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Resize the swapchain; the canvas backing store follows.
    pub fn configure(&mut self, canvas: &web::HtmlCanvasElement, viewport: Viewport) {
        let (width, height) = viewport.physical_size();
        if width == self.config.width && height == self.config.height {
            return;
        }
        canvas.set_width(width);
        canvas.set_height(height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Next swapchain image. A lost or outdated surface is reconfigured and
    /// the frame skipped.
    pub fn acquire(&self) -> Result<Option<wgpu::SurfaceTexture>, wgpu::SurfaceError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn release(self) {
        self.device.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use wasm_bindgen_test::*;

    fn canvas() -> web::HtmlCanvasElement {
        let document = web::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        dom::append_canvas(&document, &body).unwrap()
    }

    #[wasm_bindgen_test]
    async fn rejected_shader_fails_setup() {
        let canvas = canvas();
        let viewport = Viewport::new(64.0, 64.0, 1.0);
        let Ok(gpu) = GpuContext::new(&canvas, viewport, wgpu::PowerPreference::LowPower).await
        else {
            // no WebGPU in this browser
            canvas.remove();
            return;
        };
        gpu.begin_setup();
        gpu.finish_setup("empty").await.unwrap();

        gpu.begin_setup();
        _ = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("broken"),
            source: wgpu::ShaderSource::Wgsl("fn broken( {".into()),
        });
        let err = gpu.finish_setup("broken").await.unwrap_err();
        assert!(err.to_string().starts_with("broken setup rejected"));
        gpu.release();
        canvas.remove();
    }
}
