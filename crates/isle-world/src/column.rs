#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TopType {
    Grass,
    Water,
}

impl TopType {
    #[inline]
    pub fn is_water(self) -> bool {
        matches!(self, TopType::Water)
    }
}

/// Cached top-surface metadata of one (x, z) stack. Built once per world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub ix: i32,
    pub iz: i32,
    /// Raw sampled height before shoreline/rim rules.
    pub height: i32,
    pub surface_y: i32,
    pub top_type: TopType,
    /// Highest solid block: `surface_y` for grass, `height - 1` under water.
    pub top_solid_y: i32,
}

impl Column {
    #[inline]
    pub fn is_water(&self) -> bool {
        self.top_type.is_water()
    }

    /// World-space XZ center of the column.
    #[inline]
    pub fn center_xz(&self) -> (f32, f32) {
        (self.ix as f32 + 0.5, self.iz as f32 + 0.5)
    }
}
