/// A single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next
/// one. The depth view is shared with [`Gpu`](super::Gpu) and stays valid
/// until the next resize.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
