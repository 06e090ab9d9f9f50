//! Orb spawning and difficulty progression
//!
//! Cadence and fall speed both scale with the same difficulty scalar.

use glam::Vec2;
use rand::Rng;

use super::state::{Mode, Orb, Palette};
use crate::consts::*;

/// Difficulty after `frame_counter` ticks of play: +DIFFICULTY_STEP per DIFFICULTY_INTERVAL
pub fn difficulty_at(frame_counter: u64) -> f64 {
    1.0 + DIFFICULTY_STEP * (frame_counter / DIFFICULTY_INTERVAL) as f64
}

/// Ticks between spawns: floor(60 / difficulty), never below one
pub fn spawn_interval(difficulty: f64) -> u64 {
    // Tiny bias keeps 60 / 1.2 at 50 despite binary rounding
    let interval = (BASE_SPAWN_INTERVAL / difficulty + 1e-9).floor();
    (interval as u64).max(1)
}

/// Whether an orb spawns on this tick
pub fn should_spawn(frame_counter: u64, difficulty: f64) -> bool {
    frame_counter % spawn_interval(difficulty) == 0
}

/// Build a new orb just above the top edge
pub fn spawn_orb<R: Rng + ?Sized>(
    rng: &mut R,
    field_width: f32,
    difficulty: f64,
    palette: &Palette,
) -> Orb {
    let mode = if rng.random_bool(0.5) {
        Mode::Cyan
    } else {
        Mode::Magenta
    };
    let span = (field_width - 2.0 * SPAWN_MARGIN).max(0.0);
    let x = rng.random::<f32>() * span + SPAWN_MARGIN;
    let speed = (ORB_BASE_SPEED + rng.random::<f32>() * ORB_SPEED_JITTER) * difficulty as f32;
    let wobble = rng.random::<f32>() * std::f32::consts::TAU;

    Orb {
        pos: Vec2::new(x, SPAWN_Y),
        mode,
        color: palette.color_for(mode),
        radius: ORB_RADIUS,
        speed,
        wobble,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_interval() {
        assert_eq!(spawn_interval(1.0), 60);
        assert_eq!(spawn_interval(1.2), 50);
        assert_eq!(spawn_interval(difficulty_at(1200)), 50);
        assert_eq!(spawn_interval(1.1), 54);
        assert_eq!(spawn_interval(100.0), 1);
    }

    #[test]
    fn test_difficulty_steps() {
        assert_eq!(difficulty_at(0), 1.0);
        assert_eq!(difficulty_at(599), 1.0);
        assert!((difficulty_at(600) - 1.1).abs() < 1e-12);
        assert!((difficulty_at(1800) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_should_spawn_cadence() {
        let spawns = (1..=180).filter(|&f| should_spawn(f, 1.0)).count();
        assert_eq!(spawns, 3);
        assert!(should_spawn(50, 1.2));
        assert!(!should_spawn(60, 1.2));
    }

    #[test]
    fn test_spawned_orb_ranges() {
        let palette = Palette::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut seen = [false; 2];

        for _ in 0..200 {
            let orb = spawn_orb(&mut rng, 800.0, 1.5, &palette);
            assert!(orb.pos.x >= SPAWN_MARGIN && orb.pos.x <= 800.0 - SPAWN_MARGIN);
            assert_eq!(orb.pos.y, SPAWN_Y);
            assert!(orb.speed >= 3.0 * 1.5 && orb.speed <= 5.0 * 1.5);
            assert!((0.0..std::f32::consts::TAU).contains(&orb.wobble));
            assert_eq!(orb.color, palette.color_for(orb.mode));
            seen[orb.mode as usize] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_spawn_is_reproducible() {
        let palette = Palette::default();
        let mut a = Pcg32::seed_from_u64(1234);
        let mut b = Pcg32::seed_from_u64(1234);
        for _ in 0..10 {
            assert_eq!(
                spawn_orb(&mut a, 640.0, 1.0, &palette),
                spawn_orb(&mut b, 640.0, 1.0, &palette)
            );
        }
    }
}
