//! Quad geometry, per-frame uniforms and pipeline construction.

use thiserror::Error;
use wgpu::util::DeviceExt;

/// The full-screen quad: 4 corner vertices, 2 triangles. The draw call
/// contract depends on exactly this topology.
pub const QUAD_VERTICES: [[f32; 2]; 4] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Everything the shaders see from the host, written once per tick.
/// Layout mirrors the WGSL struct: vec2 at 0, f32 at 8, vec3 at 16.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub resolution: [f32; 2],
    pub time_ms: f32,
    pub _pad0: f32,
    pub camera_pos: [f32; 3],
    pub _pad1: f32,
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: &'static str, log: String },

    #[error("failed to link render pipeline: {log}")]
    Link { log: String },
}

pub struct QuadBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

pub fn upload_quad(device: &wgpu::Device) -> QuadBuffers {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("quad_vertex_buffer"),
        contents: bytemuck::cast_slice(&QUAD_VERTICES),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("quad_index_buffer"),
        contents: bytemuck::cast_slice(&QUAD_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    });

    QuadBuffers {
        vertex_buffer,
        index_buffer,
        index_count: QUAD_INDICES.len() as u32,
    }
}

pub struct SceneResources {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

pub fn create_scene_resources(device: &wgpu::Device) -> SceneResources {
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniform_buffer"),
        size: std::mem::size_of::<SceneUniform>() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bind_group_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bind_group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    SceneResources {
        uniform_buffer,
        bind_group_layout,
        bind_group,
    }
}

/// Compile one WGSL stage inside a validation error scope so a broken
/// shader surfaces as a `Result` with the naga diagnostic, not a panic.
pub fn compile_shader(
    device: &wgpu::Device,
    stage: &'static str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(stage),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(module),
        Some(e) => Err(ShaderError::Compile {
            stage,
            log: e.to_string(),
        }),
    }
}

/// Build the full-screen quad pipeline from a flattened vertex/fragment
/// source pair. Stage mismatches show up when the pipeline is created, so
/// that step runs inside its own validation scope.
pub fn create_quad_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    bind_group_layout: &wgpu::BindGroupLayout,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<wgpu::RenderPipeline, ShaderError> {
    let vertex_module = compile_shader(device, "vertex", vertex_source)?;
    let fragment_module = compile_shader(device, "fragment", fragment_source)?;

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("quad_pipeline_layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("quad_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vertex_module,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                }],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    });
    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(pipeline),
        Some(e) => Err(ShaderError::Link { log: e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_topology_is_two_triangles_over_four_vertices() {
        assert_eq!(QUAD_VERTICES.len(), 4);
        assert_eq!(QUAD_INDICES, [0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn uniform_layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 32);
        assert_eq!(std::mem::offset_of!(SceneUniform, resolution), 0);
        assert_eq!(std::mem::offset_of!(SceneUniform, time_ms), 8);
        assert_eq!(std::mem::offset_of!(SceneUniform, camera_pos), 16);
    }
}
