use super::helpers::{self, PipelineSpec, QuadGeometry};
use super::GpuContext;
use crate::constants::BACKGROUND_CLEAR;
use crate::shaders::{BACKGROUND_FRAG_WGSL, BACKGROUND_VERT_WGSL};
use folio_core::{FrameUniforms, ShaderUniformState, SurfaceBackend, Viewport};
use web_sys as web;

/// Full-viewport animated backdrop drawn behind the page.
pub struct BackgroundSurface {
    canvas: web::HtmlCanvasElement,
    gpu: GpuContext,
    quad: QuadGeometry,
    uniform_buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

impl BackgroundSurface {
    pub async fn new(canvas: web::HtmlCanvasElement, viewport: Viewport) -> anyhow::Result<Self> {
        let gpu = GpuContext::new(&canvas, viewport, wgpu::PowerPreference::HighPerformance).await?;
        gpu.begin_setup();
        let device = &gpu.device;
        let quad = QuadGeometry::new(device, "background_quad");
        let uniform_buf = helpers::create_uniform_buffer(
            device,
            "background_uniforms",
            std::mem::size_of::<FrameUniforms>(),
        );
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("background_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let (vs, fs) = helpers::shader_pair(
            device,
            "background_shader",
            BACKGROUND_VERT_WGSL,
            BACKGROUND_FRAG_WGSL,
        );
        let pipeline = helpers::make_pipeline(
            device,
            PipelineSpec {
                label: "background_pipeline",
                layout: &layout,
                vs: &vs,
                vs_entry: "vs_main",
                fs: &fs,
                fs_entry: "fs_main",
                buffers: &[QuadGeometry::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                color_format: gpu.format(),
                blend: None,
                depth_stencil: None,
            },
        );
        gpu.finish_setup("background").await?;
        Ok(Self {
            canvas,
            gpu,
            quad,
            uniform_buf,
            bind_group,
            pipeline,
        })
    }
}

impl SurfaceBackend for BackgroundSurface {
    type Error = wgpu::SurfaceError;

    fn configure(&mut self, viewport: Viewport) {
        self.gpu.configure(&self.canvas, viewport);
    }

    fn draw(&mut self, uniforms: &ShaderUniformState) -> Result<(), Self::Error> {
        self.gpu
            .queue
            .write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&uniforms.to_gpu()));
        let Some(frame) = self.gpu.acquire()? else {
            return Ok(());
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("background_encoder"),
            });
        {
            let mut rpass =
                helpers::begin_pass(&mut encoder, "background_pass", &view, None, BACKGROUND_CLEAR);
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            self.quad.draw(&mut rpass);
        }
        self.gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(self) {
        self.quad.destroy();
        self.uniform_buf.destroy();
        self.gpu.release();
    }
}
