/// One acquired surface texture plus the encoder recording into it.
///
/// Hold it only for the duration of a frame: the next texture cannot be
/// acquired while this one is alive.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
