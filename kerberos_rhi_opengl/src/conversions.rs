//! RHI enums to GL enums

use kerberos_rhi::kerberos::render::{
    CullMode, DepthFunc, DepthTest, ShaderDataType, Topology, WindingOrder,
};
use crate::gl::consts;

/// Base component type of a vertex attribute
pub fn shader_data_type_to_gl(data_type: ShaderDataType) -> u32 {
    match data_type {
        ShaderDataType::Float
        | ShaderDataType::Float2
        | ShaderDataType::Float3
        | ShaderDataType::Float4
        | ShaderDataType::Mat3
        | ShaderDataType::Mat4 => consts::FLOAT,
        ShaderDataType::Int
        | ShaderDataType::Int2
        | ShaderDataType::Int3
        | ShaderDataType::Int4 => consts::INT,
        ShaderDataType::Bool => consts::UNSIGNED_BYTE,
        ShaderDataType::None => 0,
    }
}

pub fn depth_func_to_gl(func: DepthFunc) -> u32 {
    match func {
        DepthFunc::Always => consts::ALWAYS,
        DepthFunc::Never => consts::NEVER,
        DepthFunc::Less => consts::LESS,
        DepthFunc::LessEqual => consts::LEQUAL,
        DepthFunc::Greater => consts::GREATER,
        DepthFunc::GreaterEqual => consts::GEQUAL,
        DepthFunc::Equal => consts::EQUAL,
        DepthFunc::NotEqual => consts::NOTEQUAL,
    }
}

/// Compare function of a pipeline depth test (`None` disables the test)
pub fn depth_test_to_gl(test: DepthTest) -> Option<u32> {
    match test {
        DepthTest::None => None,
        DepthTest::Less => Some(consts::LESS),
        DepthTest::LessEqual => Some(consts::LEQUAL),
        DepthTest::Equal => Some(consts::EQUAL),
        DepthTest::Greater => Some(consts::GREATER),
        DepthTest::GreaterEqual => Some(consts::GEQUAL),
        DepthTest::NotEqual => Some(consts::NOTEQUAL),
        DepthTest::Always => Some(consts::ALWAYS),
        DepthTest::Never => Some(consts::NEVER),
    }
}

/// `glCullFace` mode (`None` disables culling)
pub fn cull_mode_to_gl(mode: CullMode) -> Option<u32> {
    match mode {
        CullMode::None => None,
        CullMode::Front => Some(consts::FRONT),
        CullMode::Back => Some(consts::BACK),
        CullMode::FrontAndBack => Some(consts::FRONT_AND_BACK),
    }
}

pub fn winding_order_to_gl(order: WindingOrder) -> u32 {
    match order {
        WindingOrder::Clockwise => consts::CW,
        WindingOrder::CounterClockwise => consts::CCW,
    }
}

pub fn topology_to_gl(topology: Topology) -> u32 {
    match topology {
        Topology::Triangles => consts::TRIANGLES,
        Topology::Lines => consts::LINES,
        Topology::LineStrip => consts::LINE_STRIP,
    }
}

#[cfg(test)]
#[path = "conversions_tests.rs"]
mod tests;
