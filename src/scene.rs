//! Scene description for the battery cell.
//!
//! Everything here is a pure function of the charge level; `render` turns the
//! description into polygons for the canvas.

use std::f64::consts::FRAC_PI_2;

use crate::battery::{
    charge_to_color, glow_opacity, segment_fills, ChargeLevel, Rgb, SegmentFill, SEGMENT_COUNT,
};

pub type Vec3 = [f64; 3];

pub const BACKGROUND: Rgb = Rgb::from_hex(0x05070a);

const BODY_COLOR: Rgb = Rgb::from_hex(0x10161d);
const POSITIVE_RING_COLOR: Rgb = Rgb::from_hex(0x1a8cff);
const NEGATIVE_RING_COLOR: Rgb = Rgb::from_hex(0xff5349);
const EMPTY_SEGMENT_COLOR: Rgb = Rgb::from_hex(0x1f2933);
const EMPTY_SEGMENT_EMISSIVE: Rgb = Rgb::from_hex(0x0b0f14);
const TERMINAL_CAP_COLOR: Rgb = Rgb::from_hex(0xf7f7f7);
const TERMINAL_TIP_COLOR: Rgb = Rgb::from_hex(0xd0d5dd);
const BLACK: Rgb = Rgb::new(0, 0, 0);

// Segment stack: group offset plus per-segment step along Z.
const SEGMENT_GROUP_Z: f64 = 0.42;
const SEGMENT_FIRST_Z: f64 = 0.2;
const SEGMENT_STEP_Z: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Cuboid { width: f64, height: f64, depth: f64 },
    /// Ring lying in the local XY plane.
    Torus { radius: f64, tube: f64 },
    /// Axis along local Y.
    Cylinder { radius: f64, height: f64 },
    /// Unit plane in the local XY plane, sized by the primitive scale.
    Plane { width: f64, height: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f64,
    pub roughness: f64,
    pub metalness: f64,
    pub opacity: f64,
}

impl Material {
    fn solid(color: Rgb, metalness: f64, roughness: f64) -> Self {
        Self {
            color,
            emissive: BLACK,
            emissive_intensity: 0.0,
            roughness,
            metalness,
            opacity: 1.0,
        }
    }

    fn glowing(mut self, emissive: Rgb, intensity: f64) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrimitiveKind {
    Body,
    PositiveRing,
    NegativeRing,
    Segment(usize),
    SegmentOverlay(usize),
    TerminalCap,
    TerminalTip,
    Glow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub shape: Shape,
    pub material: Material,
    pub position: Vec3,
    /// Euler angles in radians, XYZ order (the Z rotation reaches the vertex first).
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Primitive {
    fn new(kind: PrimitiveKind, shape: Shape, material: Material) -> Self {
        Self {
            kind,
            shape,
            material,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }

    fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Hemisphere { sky: Rgb, ground: Rgb, intensity: f64 },
    /// Cone aimed at the origin; `angle` is the half-angle in radians.
    Spot {
        position: Vec3,
        intensity: f64,
        angle: f64,
        penumbra: f64,
    },
    Point { position: Vec3, intensity: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSetup {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            position: [2.6, 1.7, 3.2],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Floating label anchored in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    pub anchor: Vec3,
    pub title: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub background: Rgb,
    pub lights: Vec<Light>,
    pub camera: CameraSetup,
    pub primitives: Vec<Primitive>,
    pub tag: Tag,
}

pub fn lights() -> Vec<Light> {
    vec![
        Light::Hemisphere {
            sky: Rgb::from_hex(0x8ab4f8),
            ground: Rgb::from_hex(0x0b0d11),
            intensity: 0.4,
        },
        Light::Spot {
            position: [4.0, 6.0, 3.0],
            intensity: 1.2,
            angle: 0.6,
            penumbra: 0.5,
        },
        Light::Point {
            position: [-3.0, 2.0, -3.0],
            intensity: 0.7,
        },
    ]
}

fn segment_z(index: usize) -> f64 {
    SEGMENT_GROUP_Z + SEGMENT_FIRST_Z - index as f64 * SEGMENT_STEP_Z
}

fn segment_primitives(index: usize, fill: SegmentFill, charge: f64, out: &mut Vec<Primitive>) {
    let charged = charge_to_color(charge);
    let z = segment_z(index);

    let base = if fill.is_full() {
        Material::solid(charged, 0.6, 0.25).glowing(charged, 0.4)
    } else {
        Material::solid(EMPTY_SEGMENT_COLOR, 0.6, 0.25).glowing(EMPTY_SEGMENT_EMISSIVE, 0.05)
    };
    out.push(
        Primitive::new(
            PrimitiveKind::Segment(index),
            Shape::Cuboid {
                width: 1.6,
                height: 0.7,
                depth: 0.12,
            },
            base,
        )
        .at([0.0, 0.0, z]),
    );

    let amount = fill.partial();
    if amount > 0.0 {
        let overlay = Material {
            opacity: 0.95,
            ..Material::solid(charged, 0.5, 0.2).glowing(charged, 0.6)
        };
        out.push(
            Primitive::new(
                PrimitiveKind::SegmentOverlay(index),
                Shape::Cuboid {
                    width: 1.6,
                    height: 0.7,
                    depth: 0.121,
                },
                overlay,
            )
            .at([0.0, 0.0, z])
            .scaled([amount, 1.0, 1.0]),
        );
    }
}

/// Builds the full battery scene for a charge level.
pub fn compose_scene(charge: ChargeLevel) -> Scene {
    let c = charge.value();
    let mut primitives = Vec::with_capacity(8 + SEGMENT_COUNT * 2);

    primitives.push(Primitive::new(
        PrimitiveKind::Body,
        Shape::Cuboid {
            width: 1.8,
            height: 0.9,
            depth: 0.85,
        },
        Material::solid(BODY_COLOR, 0.7, 0.2),
    ));

    let ring = Shape::Torus {
        radius: 0.26,
        tube: 0.08,
    };
    primitives.push(
        Primitive::new(
            PrimitiveKind::PositiveRing,
            ring,
            Material::solid(POSITIVE_RING_COLOR, 0.8, 0.3),
        )
        .at([0.0, 0.52, 0.0])
        .rotated([FRAC_PI_2, 0.0, 0.0]),
    );
    primitives.push(
        Primitive::new(
            PrimitiveKind::NegativeRing,
            ring,
            Material::solid(NEGATIVE_RING_COLOR, 0.8, 0.3),
        )
        .at([0.0, -0.52, 0.0])
        .rotated([FRAC_PI_2, 0.0, 0.0]),
    );

    for (index, fill) in segment_fills(charge).into_iter().enumerate() {
        segment_primitives(index, fill, c, &mut primitives);
    }

    primitives.push(
        Primitive::new(
            PrimitiveKind::TerminalCap,
            Shape::Cylinder {
                radius: 0.18,
                height: 0.4,
            },
            Material::solid(TERMINAL_CAP_COLOR, 0.9, 0.2),
        )
        .at([0.95, 0.0, 0.0])
        .rotated([0.0, 0.0, FRAC_PI_2]),
    );
    primitives.push(
        Primitive::new(
            PrimitiveKind::TerminalTip,
            Shape::Cylinder {
                radius: 0.15,
                height: 0.18,
            },
            Material::solid(TERMINAL_TIP_COLOR, 0.6, 0.3),
        )
        .at([1.06, 0.0, 0.0])
        .rotated([0.0, 0.0, FRAC_PI_2]),
    );

    let glow_color = charge_to_color(c);
    primitives.push(
        Primitive::new(
            PrimitiveKind::Glow,
            Shape::Plane {
                width: 1.0,
                height: 1.0,
            },
            Material {
                color: glow_color,
                emissive: BLACK,
                emissive_intensity: 0.0,
                roughness: 1.0,
                metalness: 0.0,
                opacity: glow_opacity(c),
            },
        )
        .rotated([FRAC_PI_2, 0.0, 0.0])
        .scaled([3.2, 1.7, 1.0]),
    );

    Scene {
        background: BACKGROUND,
        lights: lights(),
        camera: CameraSetup::default(),
        primitives,
        tag: Tag {
            anchor: [-1.0, 0.85, 0.0],
            title: "Charge",
            value: charge.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(scene: &Scene, kind: PrimitiveKind) -> Option<&Primitive> {
        scene.primitives.iter().find(|p| p.kind == kind)
    }

    #[test]
    fn test_scene_contains_fixed_parts() {
        let scene = compose_scene(ChargeLevel::default());
        for kind in [
            PrimitiveKind::Body,
            PrimitiveKind::PositiveRing,
            PrimitiveKind::NegativeRing,
            PrimitiveKind::TerminalCap,
            PrimitiveKind::TerminalTip,
            PrimitiveKind::Glow,
        ] {
            assert!(find(&scene, kind).is_some(), "missing {kind:?}");
        }
        let segments = scene
            .primitives
            .iter()
            .filter(|p| matches!(p.kind, PrimitiveKind::Segment(_)))
            .count();
        assert_eq!(segments, SEGMENT_COUNT);
        assert_eq!(scene.lights.len(), 3);
        assert_eq!(scene.background, Rgb::from_hex(0x05070a));
    }

    #[test]
    fn test_default_charge_has_single_overlay() {
        let scene = compose_scene(ChargeLevel::default());
        let overlays: Vec<_> = scene
            .primitives
            .iter()
            .filter(|p| matches!(p.kind, PrimitiveKind::SegmentOverlay(_)))
            .collect();
        assert_eq!(overlays.len(), 1);
        let overlay = overlays[0];
        assert_eq!(overlay.kind, PrimitiveKind::SegmentOverlay(3));
        assert!((overlay.scale[0] - 0.35).abs() < 1e-9);
        assert_eq!(overlay.material.opacity, 0.95);
    }

    #[test]
    fn test_segment_materials_follow_fill() {
        let scene = compose_scene(ChargeLevel::default());
        let charged = charge_to_color(0.67);

        let filled = find(&scene, PrimitiveKind::Segment(0)).unwrap();
        assert_eq!(filled.material.color, charged);
        assert_eq!(filled.material.emissive_intensity, 0.4);

        let empty = find(&scene, PrimitiveKind::Segment(4)).unwrap();
        assert_eq!(empty.material.color, Rgb::from_hex(0x1f2933));
        assert_eq!(empty.material.emissive, Rgb::from_hex(0x0b0f14));
        assert_eq!(empty.material.emissive_intensity, 0.05);
    }

    #[test]
    fn test_segments_stack_along_z() {
        let scene = compose_scene(ChargeLevel::new(1.0));
        let z: Vec<f64> = (0..SEGMENT_COUNT)
            .map(|i| find(&scene, PrimitiveKind::Segment(i)).unwrap().position[2])
            .collect();
        assert!((z[0] - 0.62).abs() < 1e-9);
        for pair in z.windows(2) {
            assert!((pair[0] - pair[1] - 0.15).abs() < 1e-9);
        }
    }

    #[test]
    fn test_glow_opacity_tracks_charge() {
        let dim = compose_scene(ChargeLevel::new(0.0));
        let bright = compose_scene(ChargeLevel::new(1.0));
        let dim_glow = find(&dim, PrimitiveKind::Glow).unwrap();
        let bright_glow = find(&bright, PrimitiveKind::Glow).unwrap();
        assert!((dim_glow.material.opacity - 0.108).abs() < 1e-9);
        assert!((bright_glow.material.opacity - 0.36).abs() < 1e-9);
        assert_eq!(bright_glow.scale, [3.2, 1.7, 1.0]);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let charge = ChargeLevel::from_percent(33);
        assert_eq!(compose_scene(charge), compose_scene(charge));
    }

    #[test]
    fn test_tag_mirrors_percent() {
        assert_eq!(compose_scene(ChargeLevel::from_percent(5)).tag.value, "5%");
        assert_eq!(compose_scene(ChargeLevel::new(1.0)).tag.value, "100%");
    }
}
