/// GLSL base types and their default uniform values
///
/// `GlslType` is the closed set of types a uniform or attribute can be
/// declared with directly. Anything else in type position must name a
/// struct (see `parse::structs`).

use std::fmt;

use glam::{BVec2, BVec3, BVec4, IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};

/// Supported GLSL base types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GlslType {
    Bool,
    Int,
    UInt,
    Float,
    BVec2,
    BVec3,
    BVec4,
    IVec2,
    IVec3,
    IVec4,
    UVec2,
    UVec3,
    UVec4,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
    /// 2 columns, 3 rows
    Mat2x3,
    Mat2x4,
    Mat3x2,
    Mat3x4,
    Mat4x2,
    Mat4x3,
    Sampler2D,
    SamplerCube,
}

// WebGL / GLES 3 active-variable type tags
pub const GL_INT: u32 = 0x1404;
pub const GL_UNSIGNED_INT: u32 = 0x1405;
pub const GL_FLOAT: u32 = 0x1406;
pub const GL_FLOAT_VEC2: u32 = 0x8B50;
pub const GL_FLOAT_VEC3: u32 = 0x8B51;
pub const GL_FLOAT_VEC4: u32 = 0x8B52;
pub const GL_INT_VEC2: u32 = 0x8B53;
pub const GL_INT_VEC3: u32 = 0x8B54;
pub const GL_INT_VEC4: u32 = 0x8B55;
pub const GL_BOOL: u32 = 0x8B56;
pub const GL_BOOL_VEC2: u32 = 0x8B57;
pub const GL_BOOL_VEC3: u32 = 0x8B58;
pub const GL_BOOL_VEC4: u32 = 0x8B59;
pub const GL_FLOAT_MAT2: u32 = 0x8B5A;
pub const GL_FLOAT_MAT3: u32 = 0x8B5B;
pub const GL_FLOAT_MAT4: u32 = 0x8B5C;
pub const GL_SAMPLER_2D: u32 = 0x8B5E;
pub const GL_SAMPLER_CUBE: u32 = 0x8B60;
pub const GL_FLOAT_MAT2X3: u32 = 0x8B65;
pub const GL_FLOAT_MAT2X4: u32 = 0x8B66;
pub const GL_FLOAT_MAT3X2: u32 = 0x8B67;
pub const GL_FLOAT_MAT3X4: u32 = 0x8B68;
pub const GL_FLOAT_MAT4X2: u32 = 0x8B69;
pub const GL_FLOAT_MAT4X3: u32 = 0x8B6A;
pub const GL_UNSIGNED_INT_VEC2: u32 = 0x8DC6;
pub const GL_UNSIGNED_INT_VEC3: u32 = 0x8DC7;
pub const GL_UNSIGNED_INT_VEC4: u32 = 0x8DC8;

impl GlslType {
    /// Every supported type, in declaration order
    pub const ALL: [GlslType; 27] = [
        GlslType::Bool,
        GlslType::Int,
        GlslType::UInt,
        GlslType::Float,
        GlslType::BVec2,
        GlslType::BVec3,
        GlslType::BVec4,
        GlslType::IVec2,
        GlslType::IVec3,
        GlslType::IVec4,
        GlslType::UVec2,
        GlslType::UVec3,
        GlslType::UVec4,
        GlslType::Vec2,
        GlslType::Vec3,
        GlslType::Vec4,
        GlslType::Mat2,
        GlslType::Mat3,
        GlslType::Mat4,
        GlslType::Mat2x3,
        GlslType::Mat2x4,
        GlslType::Mat3x2,
        GlslType::Mat3x4,
        GlslType::Mat4x2,
        GlslType::Mat4x3,
        GlslType::Sampler2D,
        GlslType::SamplerCube,
    ];

    /// Parse a GLSL type token (`vec3`, `mat2x4`, `samplerCube`...)
    ///
    /// Returns `None` for anything outside the supported set, which in
    /// type position means a struct type name.
    pub fn from_token(token: &str) -> Option<Self> {
        let ty = match token {
            "bool" => GlslType::Bool,
            "int" => GlslType::Int,
            "uint" => GlslType::UInt,
            "float" => GlslType::Float,
            "bvec2" => GlslType::BVec2,
            "bvec3" => GlslType::BVec3,
            "bvec4" => GlslType::BVec4,
            "ivec2" => GlslType::IVec2,
            "ivec3" => GlslType::IVec3,
            "ivec4" => GlslType::IVec4,
            "uvec2" => GlslType::UVec2,
            "uvec3" => GlslType::UVec3,
            "uvec4" => GlslType::UVec4,
            "vec2" => GlslType::Vec2,
            "vec3" => GlslType::Vec3,
            "vec4" => GlslType::Vec4,
            "mat2" | "mat2x2" => GlslType::Mat2,
            "mat3" | "mat3x3" => GlslType::Mat3,
            "mat4" | "mat4x4" => GlslType::Mat4,
            "mat2x3" => GlslType::Mat2x3,
            "mat2x4" => GlslType::Mat2x4,
            "mat3x2" => GlslType::Mat3x2,
            "mat3x4" => GlslType::Mat3x4,
            "mat4x2" => GlslType::Mat4x2,
            "mat4x3" => GlslType::Mat4x3,
            "sampler2D" => GlslType::Sampler2D,
            "samplerCube" => GlslType::SamplerCube,
            _ => return None,
        };
        Some(ty)
    }

    /// Canonical GLSL spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            GlslType::Bool => "bool",
            GlslType::Int => "int",
            GlslType::UInt => "uint",
            GlslType::Float => "float",
            GlslType::BVec2 => "bvec2",
            GlslType::BVec3 => "bvec3",
            GlslType::BVec4 => "bvec4",
            GlslType::IVec2 => "ivec2",
            GlslType::IVec3 => "ivec3",
            GlslType::IVec4 => "ivec4",
            GlslType::UVec2 => "uvec2",
            GlslType::UVec3 => "uvec3",
            GlslType::UVec4 => "uvec4",
            GlslType::Vec2 => "vec2",
            GlslType::Vec3 => "vec3",
            GlslType::Vec4 => "vec4",
            GlslType::Mat2 => "mat2",
            GlslType::Mat3 => "mat3",
            GlslType::Mat4 => "mat4",
            GlslType::Mat2x3 => "mat2x3",
            GlslType::Mat2x4 => "mat2x4",
            GlslType::Mat3x2 => "mat3x2",
            GlslType::Mat3x4 => "mat3x4",
            GlslType::Mat4x2 => "mat4x2",
            GlslType::Mat4x3 => "mat4x3",
            GlslType::Sampler2D => "sampler2D",
            GlslType::SamplerCube => "samplerCube",
        }
    }

    /// Map a driver-reported active-variable type tag to a base type
    pub fn from_gl_type_tag(tag: u32) -> Option<Self> {
        let ty = match tag {
            GL_BOOL => GlslType::Bool,
            GL_INT => GlslType::Int,
            GL_UNSIGNED_INT => GlslType::UInt,
            GL_FLOAT => GlslType::Float,
            GL_BOOL_VEC2 => GlslType::BVec2,
            GL_BOOL_VEC3 => GlslType::BVec3,
            GL_BOOL_VEC4 => GlslType::BVec4,
            GL_INT_VEC2 => GlslType::IVec2,
            GL_INT_VEC3 => GlslType::IVec3,
            GL_INT_VEC4 => GlslType::IVec4,
            GL_UNSIGNED_INT_VEC2 => GlslType::UVec2,
            GL_UNSIGNED_INT_VEC3 => GlslType::UVec3,
            GL_UNSIGNED_INT_VEC4 => GlslType::UVec4,
            GL_FLOAT_VEC2 => GlslType::Vec2,
            GL_FLOAT_VEC3 => GlslType::Vec3,
            GL_FLOAT_VEC4 => GlslType::Vec4,
            GL_FLOAT_MAT2 => GlslType::Mat2,
            GL_FLOAT_MAT3 => GlslType::Mat3,
            GL_FLOAT_MAT4 => GlslType::Mat4,
            GL_FLOAT_MAT2X3 => GlslType::Mat2x3,
            GL_FLOAT_MAT2X4 => GlslType::Mat2x4,
            GL_FLOAT_MAT3X2 => GlslType::Mat3x2,
            GL_FLOAT_MAT3X4 => GlslType::Mat3x4,
            GL_FLOAT_MAT4X2 => GlslType::Mat4x2,
            GL_FLOAT_MAT4X3 => GlslType::Mat4x3,
            GL_SAMPLER_2D => GlslType::Sampler2D,
            GL_SAMPLER_CUBE => GlslType::SamplerCube,
            _ => return None,
        };
        Some(ty)
    }

    /// The driver type tag for this type
    pub fn gl_type_tag(&self) -> u32 {
        match self {
            GlslType::Bool => GL_BOOL,
            GlslType::Int => GL_INT,
            GlslType::UInt => GL_UNSIGNED_INT,
            GlslType::Float => GL_FLOAT,
            GlslType::BVec2 => GL_BOOL_VEC2,
            GlslType::BVec3 => GL_BOOL_VEC3,
            GlslType::BVec4 => GL_BOOL_VEC4,
            GlslType::IVec2 => GL_INT_VEC2,
            GlslType::IVec3 => GL_INT_VEC3,
            GlslType::IVec4 => GL_INT_VEC4,
            GlslType::UVec2 => GL_UNSIGNED_INT_VEC2,
            GlslType::UVec3 => GL_UNSIGNED_INT_VEC3,
            GlslType::UVec4 => GL_UNSIGNED_INT_VEC4,
            GlslType::Vec2 => GL_FLOAT_VEC2,
            GlslType::Vec3 => GL_FLOAT_VEC3,
            GlslType::Vec4 => GL_FLOAT_VEC4,
            GlslType::Mat2 => GL_FLOAT_MAT2,
            GlslType::Mat3 => GL_FLOAT_MAT3,
            GlslType::Mat4 => GL_FLOAT_MAT4,
            GlslType::Mat2x3 => GL_FLOAT_MAT2X3,
            GlslType::Mat2x4 => GL_FLOAT_MAT2X4,
            GlslType::Mat3x2 => GL_FLOAT_MAT3X2,
            GlslType::Mat3x4 => GL_FLOAT_MAT3X4,
            GlslType::Mat4x2 => GL_FLOAT_MAT4X2,
            GlslType::Mat4x3 => GL_FLOAT_MAT4X3,
            GlslType::Sampler2D => GL_SAMPLER_2D,
            GlslType::SamplerCube => GL_SAMPLER_CUBE,
        }
    }

    /// Symbolic driver enum name (`FLOAT_VEC3`, `SAMPLER_2D`...)
    pub fn gl_type_name(&self) -> &'static str {
        match self {
            GlslType::Bool => "BOOL",
            GlslType::Int => "INT",
            GlslType::UInt => "UNSIGNED_INT",
            GlslType::Float => "FLOAT",
            GlslType::BVec2 => "BOOL_VEC2",
            GlslType::BVec3 => "BOOL_VEC3",
            GlslType::BVec4 => "BOOL_VEC4",
            GlslType::IVec2 => "INT_VEC2",
            GlslType::IVec3 => "INT_VEC3",
            GlslType::IVec4 => "INT_VEC4",
            GlslType::UVec2 => "UNSIGNED_INT_VEC2",
            GlslType::UVec3 => "UNSIGNED_INT_VEC3",
            GlslType::UVec4 => "UNSIGNED_INT_VEC4",
            GlslType::Vec2 => "FLOAT_VEC2",
            GlslType::Vec3 => "FLOAT_VEC3",
            GlslType::Vec4 => "FLOAT_VEC4",
            GlslType::Mat2 => "FLOAT_MAT2",
            GlslType::Mat3 => "FLOAT_MAT3",
            GlslType::Mat4 => "FLOAT_MAT4",
            GlslType::Mat2x3 => "FLOAT_MAT2x3",
            GlslType::Mat2x4 => "FLOAT_MAT2x4",
            GlslType::Mat3x2 => "FLOAT_MAT3x2",
            GlslType::Mat3x4 => "FLOAT_MAT3x4",
            GlslType::Mat4x2 => "FLOAT_MAT4x2",
            GlslType::Mat4x3 => "FLOAT_MAT4x3",
            GlslType::Sampler2D => "SAMPLER_2D",
            GlslType::SamplerCube => "SAMPLER_CUBE",
        }
    }

    /// Matrix shape as (columns, rows), `None` for non-matrix types
    pub fn matrix_shape(&self) -> Option<(u8, u8)> {
        match self {
            GlslType::Mat2 => Some((2, 2)),
            GlslType::Mat3 => Some((3, 3)),
            GlslType::Mat4 => Some((4, 4)),
            GlslType::Mat2x3 => Some((2, 3)),
            GlslType::Mat2x4 => Some((2, 4)),
            GlslType::Mat3x2 => Some((3, 2)),
            GlslType::Mat3x4 => Some((3, 4)),
            GlslType::Mat4x2 => Some((4, 2)),
            GlslType::Mat4x3 => Some((4, 3)),
            _ => None,
        }
    }

    /// Number of scalar components
    pub fn component_count(&self) -> u32 {
        if let Some((columns, rows)) = self.matrix_shape() {
            return columns as u32 * rows as u32;
        }
        match self {
            GlslType::BVec2 | GlslType::IVec2 | GlslType::UVec2 | GlslType::Vec2 => 2,
            GlslType::BVec3 | GlslType::IVec3 | GlslType::UVec3 | GlslType::Vec3 => 3,
            GlslType::BVec4 | GlslType::IVec4 | GlslType::UVec4 | GlslType::Vec4 => 4,
            _ => 1,
        }
    }

    pub fn is_sampler(&self) -> bool {
        matches!(self, GlslType::Sampler2D | GlslType::SamplerCube)
    }

    /// Initial value used when registering a uniform of this type
    ///
    /// Scalars and vectors are zero, matrices are identity, samplers
    /// point at texture unit 0.
    pub fn default_value(&self) -> UniformValue {
        match self {
            GlslType::Bool => UniformValue::Bool(false),
            GlslType::Int => UniformValue::Int(0),
            GlslType::UInt => UniformValue::UInt(0),
            GlslType::Float => UniformValue::Float(0.0),
            GlslType::BVec2 => UniformValue::BVec2(BVec2::FALSE),
            GlslType::BVec3 => UniformValue::BVec3(BVec3::FALSE),
            GlslType::BVec4 => UniformValue::BVec4(BVec4::FALSE),
            GlslType::IVec2 => UniformValue::IVec2(IVec2::ZERO),
            GlslType::IVec3 => UniformValue::IVec3(IVec3::ZERO),
            GlslType::IVec4 => UniformValue::IVec4(IVec4::ZERO),
            GlslType::UVec2 => UniformValue::UVec2(UVec2::ZERO),
            GlslType::UVec3 => UniformValue::UVec3(UVec3::ZERO),
            GlslType::UVec4 => UniformValue::UVec4(UVec4::ZERO),
            GlslType::Vec2 => UniformValue::Vec2(Vec2::ZERO),
            GlslType::Vec3 => UniformValue::Vec3(Vec3::ZERO),
            GlslType::Vec4 => UniformValue::Vec4(Vec4::ZERO),
            GlslType::Mat2 => UniformValue::Mat2(Mat2::IDENTITY),
            GlslType::Mat3 => UniformValue::Mat3(Mat3::IDENTITY),
            GlslType::Mat4 => UniformValue::Mat4(Mat4::IDENTITY),
            GlslType::Mat2x3
            | GlslType::Mat2x4
            | GlslType::Mat3x2
            | GlslType::Mat3x4
            | GlslType::Mat4x2
            | GlslType::Mat4x3 => {
                let (columns, rows) = self.matrix_shape().unwrap_or((1, 1));
                UniformValue::Matrix {
                    columns,
                    rows,
                    data: identity_columns(columns, rows),
                }
            }
            GlslType::Sampler2D | GlslType::SamplerCube => UniformValue::Sampler(0),
        }
    }
}

impl fmt::Display for GlslType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column-major identity for a non-square matrix
fn identity_columns(columns: u8, rows: u8) -> Vec<f32> {
    let mut data = Vec::with_capacity(columns as usize * rows as usize);
    for column in 0..columns {
        for row in 0..rows {
            data.push(if column == row { 1.0 } else { 0.0 });
        }
    }
    data
}

/// A typed uniform value
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
    BVec2(BVec2),
    BVec3(BVec3),
    BVec4(BVec4),
    IVec2(IVec2),
    IVec3(IVec3),
    IVec4(IVec4),
    UVec2(UVec2),
    UVec3(UVec3),
    UVec4(UVec4),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
    /// Non-square matrix, column-major
    Matrix {
        columns: u8,
        rows: u8,
        data: Vec<f32>,
    },
    /// Texture unit
    Sampler(i32),
}

#[cfg(test)]
#[path = "glsl_type_tests.rs"]
mod tests;
