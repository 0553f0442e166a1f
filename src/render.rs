//! Software projection of the battery scene.
//!
//! Primitives are tessellated into flat polygons in world space, shaded once per
//! polygon, projected through an orbiting perspective camera and ordered far to near
//! so the canvas can paint them back to front.

use std::f64::consts::PI;

use iced::{Color, Point, Size};

use crate::battery::Rgb;
use crate::scene::{CameraSetup, Light, Material, Primitive, PrimitiveKind, Scene, Shape, Vec3};

const MIN_DISTANCE: f64 = 2.0;
const MAX_DISTANCE: f64 = 12.0;
const PITCH_LIMIT: f64 = 1.4;
const ROTATE_SPEED: f64 = 0.008;
const ZOOM_STEP: f64 = 0.9;

// Stand-in for the image-based environment lighting.
const ENVIRONMENT_FILL: f64 = 0.22;

// Target edge length when splitting cuboid faces into grids.
const GRID_STEP: f64 = 0.2;
const MAX_GRID: usize = 10;
const TORUS_RING_STEPS: usize = 28;
const TORUS_TUBE_STEPS: usize = 10;
const CYLINDER_STEPS: usize = 24;
// Split so the glow sorts sensibly against the body it cuts through.
const PLANE_STEPS: usize = 6;

fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn mul(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn length(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

fn normalize(a: Vec3) -> Vec3 {
    mul(a, 1.0 / length(a).max(1e-9))
}

fn rotate(v: Vec3, rotation: Vec3) -> Vec3 {
    let (sx, cx) = rotation[0].sin_cos();
    let (sy, cy) = rotation[1].sin_cos();
    let (sz, cz) = rotation[2].sin_cos();

    // Z first
    let v = [v[0] * cz - v[1] * sz, v[0] * sz + v[1] * cz, v[2]];
    // then Y
    let v = [v[0] * cy + v[2] * sy, v[1], -v[0] * sy + v[2] * cy];
    // then X
    [v[0], v[1] * cx - v[2] * sx, v[1] * sx + v[2] * cx]
}

/// A flat polygon in world space.
#[derive(Clone, Debug)]
pub struct Face {
    pub vertices: Vec<Vec3>,
    pub material: Material,
    pub double_sided: bool,
}

impl Face {
    fn centroid(&self) -> Vec3 {
        let sum = self.vertices.iter().fold([0.0; 3], |acc, v| add(acc, *v));
        mul(sum, 1.0 / self.vertices.len() as f64)
    }

    /// Outward normal derived from counter-clockwise winding.
    pub fn normal(&self) -> Vec3 {
        let v0 = self.vertices[0];
        normalize(cross(sub(self.vertices[1], v0), sub(self.vertices[2], v0)))
    }
}

fn grid_steps(extent: f64) -> usize {
    ((extent / GRID_STEP).ceil() as usize).clamp(1, MAX_GRID)
}

fn cuboid_quads(width: f64, height: f64, depth: f64) -> Vec<Vec<Vec3>> {
    let half = [width / 2.0, height / 2.0, depth / 2.0];
    let extents = [width, height, depth];
    // (normal, u, v) with u x v = normal
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];

    let scale = |axis: Vec3| [axis[0] * half[0], axis[1] * half[1], axis[2] * half[2]];
    let span = |axis: Vec3| dot(axis.map(f64::abs), extents);

    let mut quads = Vec::new();
    for (normal, u, v) in faces {
        let center = scale(normal);
        let (hu, hv) = (scale(u), scale(v));
        let (nu, nv) = (grid_steps(span(u)), grid_steps(span(v)));
        let at = |i: usize, j: usize| {
            let s = -1.0 + 2.0 * i as f64 / nu as f64;
            let t = -1.0 + 2.0 * j as f64 / nv as f64;
            add(center, add(mul(hu, s), mul(hv, t)))
        };
        for i in 0..nu {
            for j in 0..nv {
                quads.push(vec![at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
            }
        }
    }
    quads
}

fn torus_quads(radius: f64, tube: f64) -> Vec<Vec<Vec3>> {
    let at = |i: usize, j: usize| {
        let theta = 2.0 * PI * i as f64 / TORUS_RING_STEPS as f64;
        let phi = 2.0 * PI * j as f64 / TORUS_TUBE_STEPS as f64;
        let ring = radius + tube * phi.cos();
        [ring * theta.cos(), ring * theta.sin(), tube * phi.sin()]
    };
    let mut quads = Vec::with_capacity(TORUS_RING_STEPS * TORUS_TUBE_STEPS);
    for i in 0..TORUS_RING_STEPS {
        for j in 0..TORUS_TUBE_STEPS {
            quads.push(vec![at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }
    quads
}

fn cylinder_quads(radius: f64, height: f64) -> Vec<Vec<Vec3>> {
    let half = height / 2.0;
    let rim = |i: usize, y: f64| {
        let theta = 2.0 * PI * i as f64 / CYLINDER_STEPS as f64;
        [radius * theta.sin(), y, radius * theta.cos()]
    };
    let mut polygons: Vec<Vec<Vec3>> = (0..CYLINDER_STEPS)
        .map(|i| vec![rim(i, -half), rim(i + 1, -half), rim(i + 1, half), rim(i, half)])
        .collect();
    polygons.push((0..CYLINDER_STEPS).map(|i| rim(i, half)).collect());
    polygons.push((0..CYLINDER_STEPS).rev().map(|i| rim(i, -half)).collect());
    polygons
}

fn plane_quads(width: f64, height: f64) -> Vec<Vec<Vec3>> {
    let at = |i: usize, j: usize| {
        [
            width * (i as f64 / PLANE_STEPS as f64 - 0.5),
            height * (j as f64 / PLANE_STEPS as f64 - 0.5),
            0.0,
        ]
    };
    let mut quads = Vec::with_capacity(PLANE_STEPS * PLANE_STEPS);
    for i in 0..PLANE_STEPS {
        for j in 0..PLANE_STEPS {
            quads.push(vec![at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }
    quads
}

/// Turns a primitive into world-space faces.
pub fn tessellate(primitive: &Primitive) -> Vec<Face> {
    let local = match primitive.shape {
        Shape::Cuboid {
            width,
            height,
            depth,
        } => cuboid_quads(width, height, depth),
        Shape::Torus { radius, tube } => torus_quads(radius, tube),
        Shape::Cylinder { radius, height } => cylinder_quads(radius, height),
        Shape::Plane { width, height } => plane_quads(width, height),
    };
    // The glow has to stay visible from above and below.
    let double_sided = primitive.kind == PrimitiveKind::Glow;

    local
        .into_iter()
        .map(|polygon| Face {
            vertices: polygon
                .into_iter()
                .map(|v| {
                    let scaled = [
                        v[0] * primitive.scale[0],
                        v[1] * primitive.scale[1],
                        v[2] * primitive.scale[2],
                    ];
                    add(rotate(scaled, primitive.rotation), primitive.position)
                })
                .collect(),
            material: primitive.material,
            double_sided,
        })
        .collect()
}

/// Camera orbiting a fixed target; panning is not supported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f64,
    pub pitch: f64,
    pub distance: f64,
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl OrbitCamera {
    pub fn from_setup(setup: &CameraSetup) -> Self {
        let offset = sub(setup.position, setup.target);
        let distance = length(offset).max(1e-6);
        Self {
            target: setup.target,
            yaw: offset[0].atan2(offset[2]),
            pitch: (offset[1] / distance).clamp(-1.0, 1.0).asin(),
            distance,
            fov: setup.fov_degrees.to_radians(),
            near: setup.near,
            far: setup.far,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        add(self.target, mul([cp * sy, sp, cp * cy], self.distance))
    }

    /// Applies a drag delta in screen pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= f64::from(dx) * ROTATE_SPEED;
        self.pitch = (self.pitch + f64::from(dy) * ROTATE_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive `lines` moves the camera closer.
    pub fn zoom(&mut self, lines: f32) {
        self.distance =
            (self.distance * ZOOM_STEP.powf(f64::from(lines))).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = normalize(sub(self.target, self.eye()));
        let right = normalize(cross(forward, [0.0, 1.0, 0.0]));
        let up = cross(right, forward);
        (right, up, forward)
    }

    /// World point to view space; `z` is the depth in front of the camera.
    fn to_view(&self, p: Vec3) -> Vec3 {
        let (right, up, forward) = self.basis();
        let rel = sub(p, self.eye());
        [dot(rel, right), dot(rel, up), dot(rel, forward)]
    }

    fn focal(&self, viewport: Size) -> f64 {
        0.5 * f64::from(viewport.height) / (self.fov * 0.5).tan()
    }

    fn view_to_screen(&self, v: Vec3, viewport: Size) -> Point {
        let f = self.focal(viewport);
        Point::new(
            (f64::from(viewport.width) * 0.5 + v[0] * f / v[2]) as f32,
            (f64::from(viewport.height) * 0.5 - v[1] * f / v[2]) as f32,
        )
    }

    /// Projects a world point, or `None` when it lies outside the depth range.
    pub fn project(&self, p: Vec3, viewport: Size) -> Option<Point> {
        let v = self.to_view(p);
        if v[2] < self.near || v[2] > self.far {
            return None;
        }
        Some(self.view_to_screen(v, viewport))
    }
}

/// Clips a view-space polygon against the near plane.
fn clip_near(polygon: &[Vec3], near: f64) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(polygon.len() + 2);
    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let current_in = current[2] >= near;
        let next_in = next[2] >= near;
        if current_in {
            out.push(current);
        }
        if current_in != next_in {
            let t = (near - current[2]) / (next[2] - current[2]);
            out.push(add(current, mul(sub(next, current), t)));
        }
    }
    out
}

fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn rgb(color: Rgb) -> Vec3 {
    [
        f64::from(color.r) / 255.0,
        f64::from(color.g) / 255.0,
        f64::from(color.b) / 255.0,
    ]
}

fn specular(material: &Material, normal: Vec3, to_light: Vec3, to_eye: Vec3) -> f64 {
    let half = normalize(add(to_light, to_eye));
    let shininess = 4.0 + (1.0 - material.roughness).powi(2) * 120.0;
    let strength = 0.04 + 0.9 * material.metalness * (1.0 - material.roughness);
    dot(normal, half).max(0.0).powf(shininess) * strength
}

/// Flat-shades a face as seen from `eye`.
pub fn shade(face: &Face, normal: Vec3, lights: &[Light], eye: Vec3) -> Color {
    let material = &face.material;
    let center = face.centroid();
    let to_eye = normalize(sub(eye, center));
    let base = rgb(material.color);

    let mut ambient = [ENVIRONMENT_FILL; 3];
    let mut diffuse = 0.0;
    let mut highlight = 0.0;

    for light in lights {
        match *light {
            Light::Hemisphere {
                sky,
                ground,
                intensity,
            } => {
                let w = 0.5 * (normal[1] + 1.0);
                let (sky, ground) = (rgb(sky), rgb(ground));
                for c in 0..3 {
                    ambient[c] += (ground[c] + (sky[c] - ground[c]) * w) * intensity;
                }
            }
            Light::Spot {
                position,
                intensity,
                angle,
                penumbra,
            } => {
                let to_light = normalize(sub(position, center));
                let axis = normalize(mul(position, -1.0));
                let cos_theta = dot(mul(to_light, -1.0), axis);
                let cone = smoothstep(angle.cos(), (angle * (1.0 - penumbra)).cos(), cos_theta);
                diffuse += dot(normal, to_light).max(0.0) * intensity * cone;
                highlight += specular(material, normal, to_light, to_eye) * intensity * cone;
            }
            Light::Point {
                position,
                intensity,
            } => {
                let to_light = normalize(sub(position, center));
                diffuse += dot(normal, to_light).max(0.0) * intensity;
                highlight += specular(material, normal, to_light, to_eye) * intensity;
            }
        }
    }

    let albedo = 1.0 - 0.5 * material.metalness;
    let emissive = rgb(material.emissive);
    let mut out = [0.0f32; 3];
    for c in 0..3 {
        // Metals tint their highlights with the base color.
        let spec_tint = 1.0 + (base[c] - 1.0) * material.metalness;
        let value = base[c] * albedo * (ambient[c] + diffuse)
            + highlight * spec_tint
            + emissive[c] * material.emissive_intensity;
        out[c] = value.clamp(0.0, 1.0) as f32;
    }
    Color::from_rgba(out[0], out[1], out[2], material.opacity.clamp(0.0, 1.0) as f32)
}

/// One polygon ready for the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenPolygon {
    pub points: Vec<Point>,
    pub color: Color,
    pub depth: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedScene {
    /// Back to front.
    pub polygons: Vec<ScreenPolygon>,
    pub tag_position: Option<Point>,
}

pub fn render(scene: &Scene, camera: &OrbitCamera, viewport: Size) -> RenderedScene {
    let eye = camera.eye();
    let mut polygons = Vec::new();

    for primitive in &scene.primitives {
        for face in tessellate(primitive) {
            let mut normal = face.normal();
            let facing = dot(normal, sub(eye, face.centroid()));
            if facing <= 0.0 {
                if face.double_sided || face.material.is_transparent() {
                    normal = mul(normal, -1.0);
                } else {
                    continue;
                }
            }

            let view: Vec<Vec3> = face.vertices.iter().map(|v| camera.to_view(*v)).collect();
            if view.iter().all(|v| v[2] > camera.far) {
                continue;
            }
            let clipped = clip_near(&view, camera.near);
            if clipped.len() < 3 {
                continue;
            }

            let depth = clipped.iter().map(|v| v[2]).sum::<f64>() / clipped.len() as f64;
            polygons.push(ScreenPolygon {
                points: clipped
                    .iter()
                    .map(|v| camera.view_to_screen(*v, viewport))
                    .collect(),
                color: shade(&face, normal, &scene.lights, eye),
                depth,
            });
        }
    }

    polygons.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    RenderedScene {
        polygons,
        tag_position: camera.project(scene.tag.anchor, viewport),
    }
}
