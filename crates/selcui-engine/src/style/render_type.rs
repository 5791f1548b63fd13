use std::fmt;

/// Pass classifier attached to styles and line styles.
///
/// `Any` draws regardless of world depth; `Hidden` only where the overlay is
/// behind world geometry; `Visible` only where it is in front.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RenderType {
    #[default]
    Any,
    Hidden,
    Visible,
}

impl RenderType {
    /// Whether geometry classified as `self` is drawn when `requested` is
    /// being rendered. A request for `Any` accepts everything.
    #[inline]
    pub fn matches(self, requested: RenderType) -> bool {
        requested == RenderType::Any || requested == self
    }

    #[inline]
    pub fn depth_func(self) -> DepthFunc {
        match self {
            RenderType::Any => DepthFunc::Always,
            RenderType::Hidden => DepthFunc::Greater,
            RenderType::Visible => DepthFunc::LessEqual,
        }
    }
}

impl fmt::Display for RenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderType::Any => "any",
            RenderType::Hidden => "hidden",
            RenderType::Visible => "visible",
        })
    }
}

/// Depth comparison used while drawing a batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum DepthFunc {
    Always,
    Greater,
    #[default]
    LessEqual,
}

impl DepthFunc {
    pub fn to_wgpu(self) -> wgpu::CompareFunction {
        match self {
            DepthFunc::Always => wgpu::CompareFunction::Always,
            DepthFunc::Greater => wgpu::CompareFunction::Greater,
            DepthFunc::LessEqual => wgpu::CompareFunction::LessEqual,
        }
    }
}

impl fmt::Display for DepthFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DepthFunc::Always => "always",
            DepthFunc::Greater => "greater",
            DepthFunc::LessEqual => "lequal",
        })
    }
}
