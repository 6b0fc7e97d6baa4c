use std::f32::consts::TAU;

use axolotl_core::RandomSource;
use glam::Vec2;

/// RGBA colour with byte channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel at full particle life.
    pub alpha: u8,
}

impl Color {
    /// Creates a colour from its four channels.
    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Drawing style of a particle, chosen from its motion and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleShape {
    /// Fast-moving droplet with a short tail.
    Droplet,
    /// Large scattered splash.
    Splash,
    /// Small round bubble.
    Bubble,
}

/// Single short-lived water particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Current centre of the particle.
    pub position: Vec2,
    /// Displacement applied every tick.
    pub velocity: Vec2,
    /// Remaining life; the particle is removed once it reaches zero.
    pub life: f32,
    /// Life the particle was created with.
    pub max_life: f32,
    /// Nominal size in pixels.
    pub size: f32,
    /// Base colour.
    pub color: Color,
}

impl Particle {
    /// Alpha after fading proportionally to the remaining life.
    #[must_use]
    pub fn alpha(&self) -> u8 {
        if self.max_life <= 0.0 {
            return 0;
        }
        let remaining = (self.life / self.max_life).clamp(0.0, 1.0);
        (f32::from(self.color.alpha) * remaining).round() as u8
    }

    /// Classifies the particle for drawing.
    #[must_use]
    pub fn shape(&self) -> ParticleShape {
        if self.velocity.length() > 3.0 {
            ParticleShape::Droplet
        } else if self.size > 6.0 {
            ParticleShape::Splash
        } else {
            ParticleShape::Bubble
        }
    }
}

/// Unbounded collection of live particles plus the emitters that feed it.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    fade: f32,
}

impl ParticleField {
    /// Creates an empty field whose particles lose `fade` life per tick.
    #[must_use]
    pub fn new(fade: f32) -> Self {
        Self {
            particles: Vec::new(),
            fade,
        }
    }

    /// Live particles in emission order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Reports whether the field holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Adds a single particle.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Integrates every particle by one tick and drops the expired ones.
    ///
    /// Survivors keep their relative order.
    pub fn update(&mut self) {
        let fade = self.fade;
        self.particles.retain_mut(|particle| {
            particle.position += particle.velocity;
            particle.life -= fade;
            particle.life > 0.0
        });
    }

    /// Emits one rising bubble scattered around a charging body.
    pub fn charge_bubble(&mut self, center: Vec2, rng: &mut impl RandomSource) {
        let distance = rng.int_inclusive(15, 35) as f32;
        let offset_x = rng.int_inclusive(-1, 1) as f32;
        let offset_y = rng.int_inclusive(-1, 1) as f32;
        let velocity = Vec2::new(
            rng.int_inclusive(-15, 15) as f32 / 20.0,
            rng.int_inclusive(-25, -5) as f32 / 15.0,
        );
        let size = rng.int_inclusive(3, 8) as f32;
        let green = channel(150 + rng.int_inclusive(0, 105));

        self.push(Particle {
            position: center + Vec2::new(offset_x, offset_y) * distance,
            velocity,
            life: 1.2,
            max_life: 1.2,
            size,
            color: Color::rgba(100, green, 255, 255),
        });
    }

    /// Emits a fifteen-ray splash ring for a released charge.
    pub fn charge_explosion(&mut self, center: Vec2, rng: &mut impl RandomSource) {
        const RAYS: u32 = 15;
        for ray in 0..RAYS {
            let angle = ray as f32 * TAU / RAYS as f32;
            let speed = rng.int_inclusive(30, 80) as f32 / 10.0;
            let size = rng.int_inclusive(4, 10) as f32;
            let red = channel(50 + rng.int_inclusive(0, 100));
            let green = channel(200 + rng.int_inclusive(0, 55));

            self.push(Particle {
                position: center,
                velocity: Vec2::from_angle(angle) * speed,
                life: 1.5,
                max_life: 1.5,
                size,
                color: Color::rgba(red, green, 255, 255),
            });
        }
    }

    /// Emits three expanding wave rings of sixteen particles as a dash starts.
    pub fn dash_wave(&mut self, center: Vec2) {
        const RINGS: u8 = 3;
        const PER_RING: u32 = 16;
        for ring in 0..RINGS {
            let ring_speed = f32::from(2 + ring) * 1.8;
            let life = 2.2 - f32::from(ring) * 0.4;
            for index in 0..PER_RING {
                let angle = index as f32 * TAU / PER_RING as f32;
                let ripple = (angle * 4.0).sin() * 0.3;

                self.push(Particle {
                    position: center,
                    velocity: Vec2::from_angle(angle) * ring_speed * (1.0 + ripple),
                    life,
                    max_life: life,
                    size: f32::from(3 + ring * 3),
                    color: Color::rgba(80, 180 + ring * 20, 255, 180 - ring * 40),
                });
            }
        }
    }

    /// Emits three trail particles streaming opposite to the dash direction.
    pub fn dash_trail(&mut self, center: Vec2, direction: Vec2, rng: &mut impl RandomSource) {
        for _ in 0..3 {
            let scatter = Vec2::new(
                rng.int_inclusive(-8, 8) as f32,
                rng.int_inclusive(-8, 8) as f32,
            );
            let drift = Vec2::new(
                rng.int_inclusive(-10, 10) as f32 / 20.0,
                rng.int_inclusive(-10, 10) as f32 / 20.0,
            );
            let size = rng.int_inclusive(3, 7) as f32;

            self.push(Particle {
                position: center + scatter,
                velocity: -direction * 2.0 + drift,
                life: 0.8,
                max_life: 0.8,
                size,
                color: Color::rgba(120, 200, 255, 180),
            });
        }
    }

    /// Emits a twelve-ray splash with an upward bias as a dash ends.
    pub fn dash_impact(&mut self, center: Vec2, rng: &mut impl RandomSource) {
        const RAYS: u32 = 12;
        for ray in 0..RAYS {
            let angle = ray as f32 * TAU / RAYS as f32;
            let speed = rng.int_inclusive(20, 60) as f32 / 10.0;
            let size = rng.int_inclusive(5, 12) as f32;

            self.push(Particle {
                position: center,
                velocity: Vec2::from_angle(angle) * speed - Vec2::new(0.0, 1.0),
                life: 1.2,
                max_life: 1.2,
                size,
                color: Color::rgba(60, 220, 255, 255),
            });
        }
    }
}

fn channel(value: i32) -> u8 {
    u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)
}
