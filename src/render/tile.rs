use super::helpers::{self, PipelineSpec, QuadGeometry};
use super::GpuContext;
use crate::constants::TRANSPARENT_CLEAR;
use crate::shaders::{TILE_FRAG_WGSL, TILE_VERT_WGSL};
use folio_core::{FrameUniforms, ShaderUniformState, SurfaceBackend, Viewport};
use web_sys as web;

const PLACEHOLDER_TEXEL: [u8; 4] = [40, 24, 64, 255];

/// Textured gallery tile with a hover-reactive shader.
pub struct TileSurface {
    canvas: web::HtmlCanvasElement,
    gpu: GpuContext,
    quad: QuadGeometry,
    uniform_buf: wgpu::Buffer,
    bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

impl TileSurface {
    pub async fn new(canvas: web::HtmlCanvasElement, viewport: Viewport) -> anyhow::Result<Self> {
        let gpu = GpuContext::new(&canvas, viewport, wgpu::PowerPreference::LowPower).await?;
        gpu.begin_setup();
        let device = &gpu.device;
        let quad = QuadGeometry::new(device, "tile_quad");
        let uniform_buf = helpers::create_uniform_buffer(
            device,
            "tile_uniforms",
            std::mem::size_of::<FrameUniforms>(),
        );
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tile_bgl"),
            entries: &[
                helpers::uniform_layout_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tile_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let texture = image_texture(device, 1, 1);
        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &PLACEHOLDER_TEXEL,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        let bind_group = tile_bind_group(device, &bgl, &uniform_buf, &texture, &sampler);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tile_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let (vs, fs) = helpers::shader_pair(device, "tile_shader", TILE_VERT_WGSL, TILE_FRAG_WGSL);
        let pipeline = helpers::make_pipeline(
            device,
            PipelineSpec {
                label: "tile_pipeline",
                layout: &layout,
                vs: &vs,
                vs_entry: "vs_main",
                fs: &fs,
                fs_entry: "fs_main",
                buffers: &[QuadGeometry::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                color_format: gpu.format(),
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                depth_stencil: None,
            },
        );
        gpu.finish_setup("tile").await?;
        Ok(Self {
            canvas,
            gpu,
            quad,
            uniform_buf,
            bgl,
            sampler,
            texture,
            bind_group,
            pipeline,
        })
    }

    /// Replace the placeholder with a decoded image.
    pub fn set_image(&mut self, image: &web::HtmlImageElement) -> anyhow::Result<()> {
        let (width, height) = (image.natural_width(), image.natural_height());
        if width == 0 || height == 0 {
            anyhow::bail!("image has no pixels");
        }
        let texture = image_texture(&self.gpu.device, width, height);
        self.gpu.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.bind_group = tile_bind_group(
            &self.gpu.device,
            &self.bgl,
            &self.uniform_buf,
            &texture,
            &self.sampler,
        );
        std::mem::replace(&mut self.texture, texture).destroy();
        Ok(())
    }
}

fn image_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("tile_image"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    })
}

fn tile_bind_group(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    uniform_buf: &wgpu::Buffer,
    texture: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("tile_bg"),
        layout: bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

impl SurfaceBackend for TileSurface {
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
                label: Some("tile_encoder"),
            });
        {
            let mut rpass =
                helpers::begin_pass(&mut encoder, "tile_pass", &view, None, TRANSPARENT_CLEAR);
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            self.quad.draw(&mut rpass);
        }
        self.gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(self) {
        self.texture.destroy();
        self.quad.destroy();
        self.uniform_buf.destroy();
        self.gpu.release();
    }
}
