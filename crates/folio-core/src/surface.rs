//! Shader surface lifecycle.
//!
//! A [`ShaderSurface`] owns one backend (GPU context, geometry, program and
//! textures) plus the uniform state fed to it every frame. The frame loop
//! itself lives with the platform layer; this type enforces the ordering
//! rules: uniforms are written before the draw, resize never rebuilds
//! geometry, and once torn down nothing is drawn again.

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Container size in CSS pixels plus device pixel density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
        }
    }

    /// Backing-store size in device pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).round().max(1.0) as u32;
        let h = (self.height * self.pixel_ratio).round().max(1.0) as u32;
        (w, h)
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureStatus {
    /// No image bound yet; the placeholder is shown.
    #[default]
    Pending,
    Ready,
    /// The image failed to load; the placeholder stays.
    Fallback,
}

/// Uniform values shared by every surface program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderUniformState {
    pub elapsed_time: f32,
    pub resolution: (f32, f32),
    pub hover: f32,
    pub texture: TextureStatus,
}

impl ShaderUniformState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            elapsed_time: 0.0,
            resolution: (viewport.width, viewport.height),
            hover: 0.0,
            texture: TextureStatus::Pending,
        }
    }

    pub fn to_gpu(&self) -> FrameUniforms {
        FrameUniforms {
            resolution: [self.resolution.0, self.resolution.1],
            time: self.elapsed_time,
            hover: self.hover,
            texture_ready: if self.texture == TextureStatus::Ready {
                1.0
            } else {
                0.0
            },
            _pad: [0.0; 3],
        }
    }
}

/// GPU layout of [`ShaderUniformState`]; mirrored by `FrameUniforms` in the WGSL sources.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub hover: f32,
    pub texture_ready: f32,
    pub _pad: [f32; 3],
}

/// Platform side of a surface: owns the GPU resources.
pub trait SurfaceBackend {
    type Error: fmt::Display;

    /// Resize the render target. Must not reallocate geometry.
    fn configure(&mut self, viewport: Viewport);

    /// Upload `uniforms` and issue the draw call for one frame.
    fn draw(&mut self, uniforms: &ShaderUniformState) -> Result<(), Self::Error>;

    /// Release every GPU resource. Consumes the backend so it can only happen once.
    fn release(self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// The surface has been torn down; the caller should stop its loop.
    Stopped,
}

pub struct ShaderSurface<B: SurfaceBackend> {
    backend: Option<B>,
    viewport: Viewport,
    uniforms: ShaderUniformState,
    frames: u64,
}

impl<B: SurfaceBackend> ShaderSurface<B> {
    /// Wrap a fully constructed backend. Construction failures never reach
    /// here, so no loop can run against a partially initialised surface.
    pub fn new(mut backend: B, viewport: Viewport) -> Self {
        backend.configure(viewport);
        Self {
            backend: Some(backend),
            viewport,
            uniforms: ShaderUniformState::new(viewport),
            frames: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn uniforms(&self) -> &ShaderUniformState {
        &self.uniforms
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    pub fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Update time, then draw.
    pub fn frame(&mut self, elapsed: f32) -> Result<FrameOutcome, B::Error> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(FrameOutcome::Stopped);
        };
        self.uniforms.elapsed_time = elapsed;
        backend.draw(&self.uniforms)?;
        self.frames += 1;
        Ok(FrameOutcome::Drawn)
    }

    /// Propagate a new container size to the render target and resolution uniform.
    /// Zero-sized and unchanged viewports are ignored.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() || viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.uniforms.resolution = (viewport.width, viewport.height);
        if let Some(backend) = self.backend.as_mut() {
            backend.configure(viewport);
        }
        true
    }

    pub fn set_hover(&mut self, hovered: bool) {
        self.uniforms.hover = if hovered { 1.0 } else { 0.0 };
    }

    pub fn set_texture_status(&mut self, status: TextureStatus) {
        self.uniforms.texture = status;
    }

    /// Release GPU resources. Safe to call more than once. The caller cancels
    /// its frame loop first; any frame that still arrives is a no-op.
    pub fn teardown(&mut self) {
        if let Some(backend) = self.backend.take() {
            backend.release();
            log::debug!("[surface] released after {} frames", self.frames);
        }
    }
}

impl<B: SurfaceBackend> Drop for ShaderSurface<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
