//! Decorative particle bursts
//!
//! Particles never influence gameplay. They are spawned in bursts by catches,
//! crashes, and mode switches, then drift, fade, and get culled.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, Rgb};

/// Push up to `count` particles at `origin`, staying within `cap` live particles
pub fn emit_burst<R: Rng + ?Sized>(
    rng: &mut R,
    particles: &mut Vec<Particle>,
    origin: Vec2,
    color: Rgb,
    count: usize,
    cap: usize,
) {
    let room = cap.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let size = rng.random::<f32>() * 3.0 + 1.0;
        let vel = Vec2::new(
            rng.random::<f32>() * 6.0 - 3.0,
            rng.random::<f32>() * 6.0 - 3.0,
        );
        let decay = rng.random::<f32>() * 0.02 + 0.02;
        particles.push(Particle {
            pos: origin,
            vel,
            color,
            size,
            life: 1.0,
            decay,
        });
    }
}

/// Move every particle one tick, age it, and drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= particle.decay;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut particles = Vec::new();
        emit_burst(&mut rng, &mut particles, Vec2::new(5.0, 6.0), Rgb::WHITE, 50, usize::MAX);

        assert_eq!(particles.len(), 50);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(5.0, 6.0));
            assert_eq!(p.life, 1.0);
            assert!((1.0..4.0).contains(&p.size));
            assert!((-3.0..3.0).contains(&p.vel.x));
            assert!((-3.0..3.0).contains(&p.vel.y));
            assert!((0.02..0.04).contains(&p.decay));
        }
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut particles = Vec::new();
        emit_burst(&mut rng, &mut particles, Vec2::ZERO, Rgb::WHITE, 8, 12);
        emit_burst(&mut rng, &mut particles, Vec2::ZERO, Rgb::WHITE, 8, 12);
        assert_eq!(particles.len(), 12);
    }

    #[test]
    fn test_particle_culled_after_two_ticks() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            color: Rgb::WHITE,
            size: 2.0,
            life: 1.0,
            decay: 0.5,
        }];

        update_particles(&mut particles);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].life, 0.5);
        assert_eq!(particles[0].pos, Vec2::new(1.0, -2.0));

        update_particles(&mut particles);
        assert!(particles.is_empty());
    }
}
