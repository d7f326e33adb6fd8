use super::helpers::{self, PipelineSpec, QuadGeometry};
use super::GpuContext;
use crate::constants::*;
use crate::shaders::{HERO_FRAG_WGSL, HERO_VERT_WGSL};
use folio_core::constants::{
    ISLAND_BODY_Y, ISLAND_RADIUS, PARTICLE_COUNT, PARTICLE_SEED, RING_RADIUS, RING_TUBE,
};
use folio_core::{particle_cloud, SceneSnapshot, ShaderUniformState, SurfaceBackend, Viewport};
use glam::Mat4;
use web_sys as web;
use wgpu::util::DeviceExt;

/// GPU layout of the hero frame; mirrored by `HeroUniforms` in the WGSL sources.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct HeroUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    island_inv: [[f32; 4]; 4],
    ring_inv: [[f32; 4]; 4],
    particles_model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    shape: [f32; 4],
    hemi_sky: [f32; 4],
    hemi_ground: [f32; 4],
    sun: [f32; 4],
    island_color: [f32; 4],
    ring_emissive: [f32; 4],
    particle: [f32; 4],
    resolution: [f32; 2],
    time: f32,
    _pad: f32,
}

impl HeroUniforms {
    fn new(scene: &SceneSnapshot, projection: Mat4, uniforms: &ShaderUniformState) -> Self {
        let rgb = |c: [f32; 3], w: f32| [c[0], c[1], c[2], w];
        Self {
            view_proj: scene.view_proj.to_cols_array_2d(),
            inv_view_proj: scene.view_proj.inverse().to_cols_array_2d(),
            island_inv: scene.island.inverse().to_cols_array_2d(),
            ring_inv: scene.ring.inverse().to_cols_array_2d(),
            particles_model: scene.particles.to_cols_array_2d(),
            camera_pos: scene.camera_position.extend(1.0).to_array(),
            shape: [ISLAND_RADIUS, ISLAND_BODY_Y, RING_RADIUS, RING_TUBE],
            hemi_sky: rgb(HEMI_SKY, HEMI_INTENSITY),
            hemi_ground: rgb(HEMI_GROUND, 0.0),
            sun: rgb(SUN_DIRECTION, SUN_INTENSITY),
            island_color: rgb(ISLAND_COLOR, 1.0),
            ring_emissive: rgb(RING_EMISSIVE, 1.0),
            particle: [
                PARTICLE_SIZE,
                PARTICLE_ALPHA,
                projection.x_axis.x,
                projection.y_axis.y,
            ],
            resolution: [uniforms.resolution.0, uniforms.resolution.1],
            time: uniforms.elapsed_time,
            _pad: 0.0,
        }
    }
}

/// Pinned 3D hero: raymarched island and ring plus a particle cloud.
pub struct HeroSurface {
    canvas: web::HtmlCanvasElement,
    gpu: GpuContext,
    quad: QuadGeometry,
    particles: wgpu::Buffer,
    particle_count: u32,
    uniform_buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    scene_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    depth: wgpu::TextureView,
    snapshot: Option<SceneSnapshot>,
    projection: Mat4,
}

impl HeroSurface {
    pub async fn new(canvas: web::HtmlCanvasElement, viewport: Viewport) -> anyhow::Result<Self> {
        let gpu = GpuContext::new(&canvas, viewport, wgpu::PowerPreference::HighPerformance).await?;
        gpu.begin_setup();
        let device = &gpu.device;
        let quad = QuadGeometry::new(device, "hero_quad");
        let cloud = particle_cloud(PARTICLE_COUNT, PARTICLE_SEED);
        let particles = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("hero_particles"),
            contents: bytemuck::cast_slice(&cloud),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buf = helpers::create_uniform_buffer(
            device,
            "hero_uniforms",
            std::mem::size_of::<HeroUniforms>(),
        );
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("hero_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("hero_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("hero_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let (vs, fs) = helpers::shader_pair(device, "hero_shader", HERO_VERT_WGSL, HERO_FRAG_WGSL);
        let depth_state = |write: bool| wgpu::DepthStencilState {
            format: helpers::DEPTH_FORMAT,
            depth_write_enabled: write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };
        let scene_pipeline = helpers::make_pipeline(
            device,
            PipelineSpec {
                label: "hero_scene_pipeline",
                layout: &layout,
                vs: &vs,
                vs_entry: "vs_fullscreen",
                fs: &fs,
                fs_entry: "fs_scene",
                buffers: &[QuadGeometry::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                color_format: gpu.format(),
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                depth_stencil: Some(depth_state(true)),
            },
        );
        let particle_attributes = wgpu::vertex_attr_array![0 => Float32x3];
        let particle_pipeline = helpers::make_pipeline(
            device,
            PipelineSpec {
                label: "hero_particle_pipeline",
                layout: &layout,
                vs: &vs,
                vs_entry: "vs_particles",
                fs: &fs,
                fs_entry: "fs_particles",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &particle_attributes,
                }],
                topology: wgpu::PrimitiveTopology::TriangleList,
                color_format: gpu.format(),
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                depth_stencil: Some(depth_state(false)),
            },
        );
        let (width, height) = viewport.physical_size();
        let depth = helpers::create_depth_view(device, width, height);
        gpu.finish_setup("hero").await?;
        Ok(Self {
            canvas,
            gpu,
            quad,
            particles,
            particle_count: cloud.len() as u32,
            uniform_buf,
            bind_group,
            scene_pipeline,
            particle_pipeline,
            depth,
            snapshot: None,
            projection: Mat4::IDENTITY,
        })
    }

    /// Scene state for the next draw. Frames before the first snapshot clear only.
    pub fn set_scene(&mut self, snapshot: SceneSnapshot, projection: Mat4) {
        self.snapshot = Some(snapshot);
        self.projection = projection;
    }
}

impl SurfaceBackend for HeroSurface {
    type Error = wgpu::SurfaceError;

    fn configure(&mut self, viewport: Viewport) {
        self.gpu.configure(&self.canvas, viewport);
        let (width, height) = viewport.physical_size();
        self.depth = helpers::create_depth_view(&self.gpu.device, width, height);
    }

    fn draw(&mut self, uniforms: &ShaderUniformState) -> Result<(), Self::Error> {
        if let Some(snapshot) = &self.snapshot {
            let gpu_uniforms = HeroUniforms::new(snapshot, self.projection, uniforms);
            self.gpu
                .queue
                .write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&gpu_uniforms));
        }
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
                label: Some("hero_encoder"),
            });
        {
            let mut rpass = helpers::begin_pass(
                &mut encoder,
                "hero_pass",
                &view,
                Some(&self.depth),
                TRANSPARENT_CLEAR,
            );
            if self.snapshot.is_some() {
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_pipeline(&self.scene_pipeline);
                self.quad.draw(&mut rpass);
                rpass.set_pipeline(&self.particle_pipeline);
                rpass.set_vertex_buffer(0, self.particles.slice(..));
                rpass.draw(0..6, 0..self.particle_count);
            }
        }
        self.gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release(self) {
        self.particles.destroy();
        self.quad.destroy();
        self.uniform_buf.destroy();
        self.gpu.release();
    }
}
