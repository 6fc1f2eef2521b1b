use crate::core::SceneContext;
use crate::scene::{
    build_vertices, DrawList, GeometryId, Pass, TextureDesc, TextureId, MAX_POINT_LIGHTS,
};
use crate::world::Subsystem;
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use web_sys as web;

mod helpers;
mod label;
use helpers::{
    create_color_map, create_color_map_layout, create_depth_texture, make_scene_pipeline,
    PipelineSpec,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    sun_dir: [f32; 4],
    sun_color: [f32; 4],
    ambient: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4],
    point_pos: [[f32; 4]; MAX_POINT_LIGHTS],
    point_color: [[f32; 4]; MAX_POINT_LIGHTS],
    counts: [u32; 4],
}

impl Globals {
    fn from_frame(ctx: &SceneContext, list: &DrawList) -> Self {
        let (view_proj, eye) = match ctx.camera() {
            Some(view) => (view.view_projection, view.position),
            None => (Mat4::IDENTITY, Vec3::ZERO),
        };
        let (sun_dir, sun_color) = list.sun.unwrap_or((Vec3::Y, Vec3::ZERO));
        let mut point_pos = [[0.0; 4]; MAX_POINT_LIGHTS];
        let mut point_color = [[0.0; 4]; MAX_POINT_LIGHTS];
        for (i, p) in list.points.iter().enumerate().take(MAX_POINT_LIGHTS) {
            point_pos[i] = p.position.extend(p.range).to_array();
            point_color[i] = p.radiance.extend(0.0).to_array();
        }
        let (fog_color, fog_range) = match list.fog {
            Some(fog) => (fog.color.extend(1.0), [fog.near, fog.far, 0.0, 0.0]),
            None => (Vec3::ZERO.extend(0.0), [0.0; 4]),
        };
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: eye.extend(1.0).to_array(),
            sun_dir: sun_dir.extend(0.0).to_array(),
            sun_color: sun_color.extend(0.0).to_array(),
            ambient: list.ambient.extend(0.0).to_array(),
            fog_color: fog_color.to_array(),
            fog_range,
            point_pos,
            point_color,
            counts: [list.points.len().min(MAX_POINT_LIGHTS) as u32, 0, 0, 0],
        }
    }
}

struct GeometryBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

struct ColorMap {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// WebGPU forward renderer for the shared scene graph. Attached to the
/// orchestrator as its last subsystem so it draws after everything moved.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: (wgpu::Texture, wgpu::TextureView),
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    points_pipeline: wgpu::RenderPipeline,
    geometries: FnvHashMap<GeometryId, GeometryBuffer>,
    color_map_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: ColorMap,
    /// `None` marks an image that failed to rasterize; it draws as white.
    color_maps: FnvHashMap<TextureId, Option<ColorMap>>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
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
        let depth = create_depth_texture(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let color_map_layout = create_color_map_layout(&device);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let (texture, bind_group) = create_color_map(
            &device,
            &queue,
            &color_map_layout,
            &sampler,
            (1, 1),
            &[255; 4],
        );
        let white = ColorMap {
            _texture: texture,
            bind_group,
        };
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&bgl, &color_map_layout],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            PipelineSpec {
                label: "opaque_pipeline",
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: true,
                blend: None,
            },
        );
        let transparent_pipeline = make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            PipelineSpec {
                label: "transparent_pipeline",
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: false,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            },
        );
        let points_pipeline = make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            PipelineSpec {
                label: "points_pipeline",
                topology: wgpu::PrimitiveTopology::PointList,
                depth_write: false,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            },
        );

        let instance_capacity = 256;
        let instance_buffer = Self::create_instance_buffer(&device, instance_capacity);
        log::info!("[render] WebGPU ready ({:?}, {}x{})", format, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            globals_buffer,
            globals_bind_group,
            opaque_pipeline,
            transparent_pipeline,
            points_pipeline,
            geometries: FnvHashMap::default(),
            color_map_layout,
            sampler,
            white,
            color_maps: FnvHashMap::default(),
            instance_buffer,
            instance_capacity,
            clear_color: wgpu::Color {
                r: 0.039,
                g: 0.039,
                b: 0.047,
                a: 1.0,
            },
        })
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: (capacity * std::mem::size_of::<crate::scene::InstanceRaw>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth = create_depth_texture(&self.device, width, height);
        }
    }

    /// Upload geometry first seen this frame and drop buffers whose geometry
    /// has been disposed.
    fn sync_geometry(&mut self, ctx: &SceneContext, list: &DrawList) {
        let scene = ctx.scene();
        let gpu = scene.gpu();
        self.geometries
            .retain(|id, _| gpu.geometry(*id).is_some_and(|g| !g.is_disposed()));
        for batch in &list.batches {
            let id = batch.key.geometry;
            if self.geometries.contains_key(&id) {
                continue;
            }
            let Some(resident) = gpu.geometry(id) else {
                continue;
            };
            let vertices = build_vertices(&resident.desc);
            if vertices.is_empty() {
                continue;
            }
            let buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("geometry"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            self.geometries.insert(
                id,
                GeometryBuffer {
                    buffer,
                    vertex_count: vertices.len() as u32,
                },
            );
        }
    }

    /// Rasterize and upload color maps first referenced this frame and drop
    /// those whose texture has been disposed.
    fn sync_color_maps(&mut self, ctx: &SceneContext, list: &DrawList) {
        let scene = ctx.scene();
        let gpu = scene.gpu();
        self.color_maps
            .retain(|id, _| gpu.texture(*id).is_some_and(|t| !t.is_disposed()));
        for id in list.batches.iter().filter_map(|b| b.map) {
            if self.color_maps.contains_key(&id) {
                continue;
            }
            let Some(resident) = gpu.texture(id) else {
                continue;
            };
            let pixels = match &resident.desc {
                TextureDesc::Text(image) => label::rasterize(image),
            };
            let map = match pixels {
                Ok(pixels) => {
                    let (texture, bind_group) = create_color_map(
                        &self.device,
                        &self.queue,
                        &self.color_map_layout,
                        &self.sampler,
                        resident.desc.extent(),
                        &pixels,
                    );
                    Some(ColorMap {
                        _texture: texture,
                        bind_group,
                    })
                }
                Err(e) => {
                    log::warn!("[render] color map {:?} drawn blank: {:?}", id, e);
                    None
                }
            };
            self.color_maps.insert(id, map);
        }
    }

    fn color_map(&self, id: Option<TextureId>) -> &wgpu::BindGroup {
        id.and_then(|id| self.color_maps.get(&id))
            .and_then(Option::as_ref)
            .map_or(&self.white.bind_group, |m| &m.bind_group)
    }

    pub fn render(&mut self, ctx: &SceneContext) -> Result<(), wgpu::SurfaceError> {
        let list = DrawList::collect(&ctx.scene());
        self.sync_geometry(ctx, &list);
        self.sync_color_maps(ctx, &list);

        if list.instances.len() > self.instance_capacity {
            self.instance_capacity = list.instances.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(&self.device, self.instance_capacity);
        }
        if !list.instances.is_empty() {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&list.instances),
            );
        }
        let globals = Globals::from_frame(ctx, &list);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.1,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            let mut bound: Option<Pass> = None;
            for batch in &list.batches {
                let Some(geometry) = self.geometries.get(&batch.key.geometry) else {
                    continue;
                };
                if bound != Some(batch.key.pass) {
                    rpass.set_pipeline(match batch.key.pass {
                        Pass::Opaque => &self.opaque_pipeline,
                        Pass::Transparent => &self.transparent_pipeline,
                        Pass::Points => &self.points_pipeline,
                    });
                    bound = Some(batch.key.pass);
                }
                rpass.set_bind_group(1, self.color_map(batch.map), &[]);
                rpass.set_vertex_buffer(0, geometry.buffer.slice(..));
                rpass.draw(
                    0..geometry.vertex_count,
                    batch.first..batch.first + batch.count,
                );
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl Subsystem for GpuState {
    fn label(&self) -> &'static str {
        "renderer"
    }

    fn resize(&mut self, ctx: &SceneContext) {
        let (w, h) = ctx.viewport().physical_size();
        self.resize_if_needed(w, h);
    }

    fn update(&mut self, ctx: &SceneContext) {
        match self.render(ctx) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
            }
            Err(e) => log::warn!("[render] frame skipped: {:?}", e),
        }
    }

    fn teardown(&mut self, _ctx: &SceneContext) {
        self.geometries.clear();
        self.color_maps.clear();
    }
}
