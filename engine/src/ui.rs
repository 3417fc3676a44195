//! Layout primitives for screen-space drawing.
//!
//! Everything is in whole pixels and saturates instead of going negative, so a layout computed
//! for a tiny window degrades to empty rects rather than wrapping around.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The inner area left after removing `insets`; saturates to zero size.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w: self
                .w
                .saturating_sub(insets.left.saturating_add(insets.right)),
            h: self
                .h
                .saturating_sub(insets.top.saturating_add(insets.bottom)),
        }
    }

    /// Positions a child of `size` inside this rect. Oversized children are clamped.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let size = size.clamp_max(self.size());
        let free_w = self.w - size.w;
        let free_h = self.h - size.h;

        let (fx, fy) = match anchor {
            Anchor::TopLeft => (0, 0),
            Anchor::TopCenter => (free_w / 2, 0),
            Anchor::Center => (free_w / 2, free_h / 2),
            Anchor::BottomCenter => (free_w / 2, free_h),
        };

        Self {
            x: self.x + fx,
            y: self.y + fy,
            w: size.w,
            h: size.h,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn clamp_max(self, max: Size) -> Self {
        Self {
            w: self.w.min(max.w),
            h: self.h.min(max.h),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    pub fn top(v: u32) -> Self {
        Self {
            top: v,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    Center,
    BottomCenter,
}
