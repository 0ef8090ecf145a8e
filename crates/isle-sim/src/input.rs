use isle_geom::Vec3;

/// Debounced intents for one tick, plus the camera facing the movement is
/// relative to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    pub camera_forward: Vec3,
}

impl Default for InputIntent {
    fn default() -> Self {
        Self {
            forward: false,
            back: false,
            left: false,
            right: false,
            jump: false,
            attack: false,
            camera_forward: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

impl InputIntent {
    #[inline]
    pub fn any_move(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// World-space unit move direction on XZ, or `None` when intents cancel
    /// out or the camera looks straight up/down.
    pub fn world_move(&self) -> Option<Vec3> {
        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        let local = Vec3::new(axis(self.right, self.left), 0.0, axis(self.back, self.forward));
        if local.length_sq() <= 1e-4 {
            return None;
        }
        let local = local.normalized();
        let fwd = self.camera_forward.horizontal();
        if fwd.length_sq() <= isle_geom::EPS_SQ {
            return None;
        }
        let fwd = fwd.normalized();
        let right = fwd.cross(Vec3::UP).normalized();
        let world = fwd * -local.z + right * local.x;
        (world.length_sq() > isle_geom::EPS_SQ).then(|| world.normalized())
    }
}
