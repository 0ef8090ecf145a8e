use log::info;

/// Process-wide score/lives/ammo. Reset only by `Simulation::restart`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunState {
    pub score: u32,
    pub lives: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub game_over: bool,
}

impl RunState {
    pub fn new(lives: u32, max_ammo: u32) -> Self {
        Self {
            score: 0,
            lives,
            ammo: max_ammo,
            max_ammo,
            game_over: false,
        }
    }

    pub fn add_score(&mut self, delta: u32) -> u32 {
        self.score = self.score.saturating_add(delta);
        self.score
    }

    /// Removes one life, clamped at zero. Returns the remaining lives.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && !self.game_over {
            self.game_over = true;
            info!("game over score={}", self.score);
        }
        self.lives
    }

    /// Takes one unit of ammo; `false` when empty.
    pub fn spend_ammo(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    pub fn refill_ammo(&mut self) {
        self.ammo = self.max_ammo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_clamp_and_flag_game_over() {
        let mut s = RunState::new(1, 5);
        assert_eq!(s.lose_life(), 0);
        assert!(s.game_over);
        assert_eq!(s.lose_life(), 0);
    }

    #[test]
    fn ammo_never_underflows() {
        let mut s = RunState::new(5, 1);
        assert!(s.spend_ammo());
        assert!(!s.spend_ammo());
        assert_eq!(s.ammo, 0);
        s.refill_ammo();
        assert_eq!(s.ammo, 1);
    }
}
