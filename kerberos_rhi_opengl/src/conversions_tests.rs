//! Unit tests for conversions.rs

use kerberos_rhi::kerberos::render::{
    CullMode, DepthFunc, DepthTest, ShaderDataType, Topology, WindingOrder,
};
use crate::conversions::*;
use crate::gl::consts;

#[test]
fn test_shader_data_type_base_types() {
    assert_eq!(shader_data_type_to_gl(ShaderDataType::Float3), consts::FLOAT);
    assert_eq!(shader_data_type_to_gl(ShaderDataType::Mat4), consts::FLOAT);
    assert_eq!(shader_data_type_to_gl(ShaderDataType::Int2), consts::INT);
    assert_eq!(shader_data_type_to_gl(ShaderDataType::Bool), consts::UNSIGNED_BYTE);
}

#[test]
fn test_depth_func_mapping() {
    assert_eq!(depth_func_to_gl(DepthFunc::Less), consts::LESS);
    assert_eq!(depth_func_to_gl(DepthFunc::LessEqual), consts::LEQUAL);
    assert_eq!(depth_func_to_gl(DepthFunc::GreaterEqual), consts::GEQUAL);
    assert_eq!(depth_func_to_gl(DepthFunc::NotEqual), consts::NOTEQUAL);
    assert_eq!(depth_func_to_gl(DepthFunc::Always), consts::ALWAYS);
}

#[test]
fn test_depth_test_none_disables() {
    assert_eq!(depth_test_to_gl(DepthTest::None), None);
    assert_eq!(depth_test_to_gl(DepthTest::Greater), Some(consts::GREATER));
    assert_eq!(depth_test_to_gl(DepthTest::Never), Some(consts::NEVER));
}

#[test]
fn test_cull_mode_mapping() {
    assert_eq!(cull_mode_to_gl(CullMode::None), None);
    assert_eq!(cull_mode_to_gl(CullMode::Back), Some(consts::BACK));
    assert_eq!(cull_mode_to_gl(CullMode::FrontAndBack), Some(consts::FRONT_AND_BACK));
}

#[test]
fn test_winding_and_topology_mapping() {
    assert_eq!(winding_order_to_gl(WindingOrder::CounterClockwise), consts::CCW);
    assert_eq!(winding_order_to_gl(WindingOrder::Clockwise), consts::CW);
    assert_eq!(topology_to_gl(Topology::Triangles), consts::TRIANGLES);
    assert_eq!(topology_to_gl(Topology::LineStrip), consts::LINE_STRIP);
}
