//! Floating "GET!" text shown where a pack was hit

use glam::Vec2;

use crate::consts::{EFFECT_DRIFT, EFFECT_FONT_SIZE, EFFECT_LIFETIME};

pub const HIT_TEXT: &str = "GET!";

#[derive(Debug, Clone, PartialEq)]
pub struct HitEffect {
    /// Text center
    pub pos: Vec2,
    pub age: u32,
    pub lifetime: u32,
    pub scale: f32,
    pub active: bool,
}

impl HitEffect {
    pub fn new(pos: Vec2, scale: f32) -> Self {
        Self {
            pos,
            age: 0,
            lifetime: EFFECT_LIFETIME,
            scale,
            active: true,
        }
    }

    /// Age one tick and drift upward
    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.age += 1;
        self.pos.y -= EFFECT_DRIFT * self.scale;
        if self.age >= self.lifetime {
            self.active = false;
        }
    }

    /// Opacity in 0..=255, fading linearly over the lifetime
    pub fn alpha(&self) -> u8 {
        let fade = 255 * self.age / self.lifetime.max(1);
        255u32.saturating_sub(fade) as u8
    }

    pub fn font_size(&self) -> f32 {
        EFFECT_FONT_SIZE * self.scale
    }
}

/// Age every effect and drop the expired ones
pub fn update_effects(effects: &mut Vec<HitEffect>) {
    for effect in effects.iter_mut() {
        effect.update();
    }
    effects.retain(|e| e.active);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_drifts_up_and_fades() {
        let mut e = HitEffect::new(Vec2::new(100.0, 100.0), 0.5);
        assert_eq!(e.alpha(), 255);
        e.update();
        assert_eq!(e.pos.y, 99.0);
        for _ in 0..29 {
            e.update();
        }
        assert_eq!(e.alpha(), 128);
    }

    #[test]
    fn test_expires_at_lifetime() {
        let mut e = HitEffect::new(Vec2::ZERO, 1.0);
        for _ in 0..EFFECT_LIFETIME - 1 {
            e.update();
        }
        assert!(e.active);
        e.update();
        assert!(!e.active);
        assert_eq!(e.age, e.lifetime);
        assert_eq!(e.alpha(), 0);
    }

    #[test]
    fn test_update_effects_collects_expired() {
        let mut effects = vec![HitEffect::new(Vec2::ZERO, 1.0), HitEffect::new(Vec2::ZERO, 1.0)];
        effects[0].age = EFFECT_LIFETIME - 1;
        update_effects(&mut effects);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].age, 1);
    }

    proptest! {
        #[test]
        fn prop_age_monotonic_and_single_deactivation(ticks in 0u32..200) {
            let mut e = HitEffect::new(Vec2::ZERO, 1.0);
            let mut deactivations = 0;
            for _ in 0..ticks {
                let (age, was_active) = (e.age, e.active);
                e.update();
                prop_assert!(e.age >= age);
                if was_active && !e.active {
                    deactivations += 1;
                    prop_assert_eq!(e.age, e.lifetime);
                }
                prop_assert_eq!(e.active, e.age < e.lifetime);
            }
            prop_assert!(deactivations <= 1);
        }
    }
}
