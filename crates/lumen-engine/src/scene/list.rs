use super::{ClipRegion, DrawCmd};

/// A single draw item: command plus the clip region active when it was pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// `None` = no clipping (draw everywhere).
    pub clip: Option<ClipRegion>,
}

/// Recorded draw stream for a frame.
///
/// Items keep insertion order, which is also paint order (back-to-front).
///
/// # Clipping
///
/// [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) scope commands
/// to a rounded-rect region, intersected with the enclosing region.
///
/// ```ignore
/// list.push_clip(ClipRegion::new(field_rect, 8.0));
/// // ... push the field's text ...
/// list.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    /// Top is always the current effective region.
    clip_stack: Vec<ClipRegion>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.clip_stack.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command. It inherits the current clip region.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem { cmd, clip: self.current_clip() });
    }

    #[inline]
    pub fn current_clip(&self) -> Option<ClipRegion> {
        self.clip_stack.last().copied()
    }

    #[inline]
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Begins a clip region. Calls must be balanced with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, region: ClipRegion) {
        let effective = match self.clip_stack.last() {
            None => region,
            Some(parent) => parent.intersect(region),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent clip region.
    ///
    /// An unmatched pop is ignored in release builds.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Runs `f` with `region` pushed, popping it afterwards.
    pub fn with_clip<R>(&mut self, region: ClipRegion, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_clip(region);
        let out = f(self);
        self.pop_clip();
        out
    }
}
