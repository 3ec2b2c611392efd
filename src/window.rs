#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

pub trait HasSize {
    fn size(&self) -> Size;
}

impl HasSize for winit::window::Window {
    fn size(&self) -> Size {
        self.inner_size().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_survives_zero_height() {
        let size = Size {
            width: 1920,
            height: 0,
        };
        assert!(size.is_empty());
        assert_eq!(size.aspect_ratio(), 1920.);
    }

    #[test]
    fn converts_from_physical_size() {
        let size: Size = winit::dpi::PhysicalSize::new(1280u32, 720u32).into();
        assert_eq!(size.aspect_ratio(), 1280. / 720.);
        assert!(!size.is_empty());
    }
}
