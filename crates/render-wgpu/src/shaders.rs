/// WGSL shader for every scene mesh: one instance per object, lit by the
/// scene's ambient, directional and point lights.
pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    ambient: vec4<f32>,
    sun_dir: vec4<f32>,
    sun_color: vec4<f32>,
    // xyz position, w range (0 = infinite)
    point_pos: vec4<f32>,
    point_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    // rgb base colour, a opacity
    @location(6) color: vec4<f32>,
    // rgb emissive already scaled by intensity
    @location(7) emissive: vec4<f32>,
    // x roughness, y metalness
    @location(8) surface: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) emissive: vec3<f32>,
    @location(4) surface: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    out.emissive = instance.emissive.rgb;
    out.surface = instance.surface.xy;
    return out;
}

fn shade(
    n: vec3<f32>,
    l: vec3<f32>,
    v: vec3<f32>,
    radiance: vec3<f32>,
    base: vec3<f32>,
    surface: vec2<f32>,
) -> vec3<f32> {
    let diffuse = max(dot(n, l), 0.0);
    let h = normalize(l + v);
    let shininess = mix(128.0, 4.0, surface.x);
    let spec = pow(max(dot(n, h), 0.0), shininess) * (1.0 - surface.x);
    let spec_color = mix(vec3<f32>(0.04), base, surface.y);
    let diffuse_color = base * (1.0 - surface.y * 0.7);
    return (diffuse_color * diffuse + spec_color * spec) * radiance;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    if (!front) {
        n = -n;
    }
    let v = normalize(uniforms.camera_pos.xyz - in.world_pos);
    let base = in.color.rgb;

    var rgb = base * uniforms.ambient.rgb;
    rgb += shade(n, normalize(uniforms.sun_dir.xyz), v, uniforms.sun_color.rgb, base, in.surface);

    let to_point = uniforms.point_pos.xyz - in.world_pos;
    let dist = length(to_point);
    var falloff = 1.0;
    if (uniforms.point_pos.w > 0.0) {
        falloff = clamp(1.0 - dist / uniforms.point_pos.w, 0.0, 1.0);
    }
    let point_radiance = uniforms.point_color.rgb * falloff;
    rgb += shade(n, to_point / max(dist, 1e-4), v, point_radiance, base, in.surface);

    rgb += in.emissive;
    return vec4<f32>(rgb, in.color.a);
}
"#;
