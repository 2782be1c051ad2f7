//! Headless GL context that records every call
//!
//! [`RecordingGlContext`] hands out object names, keeps a small model of
//! buffer storage and bindings, and appends each call to a log. Tests and
//! capture tools inspect the native command stream through it.

use std::sync::Mutex;
use rustc_hash::FxHashMap;
use crate::gl::{consts, GlContext, GlDebugCallback};

/// One recorded GL call
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer { target: u32, buffer: u32 },
    BufferData { target: u32, size: usize, data: Option<Vec<u8>>, usage: u32 },
    BufferSubData { target: u32, offset: usize, data: Vec<u8> },
    BindBufferBase { target: u32, index: u32, buffer: u32 },
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    BindVertexArray(u32),
    EnableVertexAttribArray(u32),
    VertexAttribPointer { index: u32, size: i32, data_type: u32, normalized: bool, stride: i32, offset: usize },
    VertexAttribIPointer { index: u32, size: i32, data_type: u32, stride: i32, offset: usize },
    ObjectLabel { identifier: u32, name: u32, label: String },
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    ClearColor([f32; 4]),
    Clear(u32),
    Enable(u32),
    Disable(u32),
    DepthFunc(u32),
    CullFace(u32),
    FrontFace(u32),
    DrawElements { mode: u32, count: i32, element_type: u32, offset: i32 },
    DrawArrays { mode: u32, first: i32, count: i32 },
    CheckFramebufferStatus(u32),
    DebugMessageCallback,
    DebugMessageControl { source: u32, message_type: u32, severity: u32, enabled: bool },
}

impl GlCall {
    pub fn is_draw(&self) -> bool {
        matches!(self, GlCall::DrawElements { .. } | GlCall::DrawArrays { .. })
    }
}

struct RecordingState {
    calls: Vec<GlCall>,
    next_name: u32,
    pending_error: u32,
    framebuffer_status: u32,
    debug_callback: Option<GlDebugCallback>,
    /// Storage of every live buffer object
    buffers: FxHashMap<u32, Vec<u8>>,
    /// Buffer bound to each target
    bindings: FxHashMap<u32, u32>,
    bound_vertex_array: u32,
}

impl RecordingState {
    fn next_name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }
}

/// Recording [`GlContext`] without a GPU
pub struct RecordingGlContext {
    state: Mutex<RecordingState>,
}

impl RecordingGlContext {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RecordingState {
                calls: Vec::new(),
                next_name: 1,
                pending_error: consts::NO_ERROR,
                framebuffer_status: consts::FRAMEBUFFER_COMPLETE,
                debug_callback: None,
                buffers: FxHashMap::default(),
                bindings: FxHashMap::default(),
                bound_vertex_array: 0,
            }),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut RecordingState) -> R) -> R {
        // A poisoned lock only means a test panicked mid-call; the log is still usable
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }

    fn record(&self, call: GlCall) {
        self.with_state(|state| state.calls.push(call));
    }

    /// Every call recorded so far
    pub fn calls(&self) -> Vec<GlCall> {
        self.with_state(|state| state.calls.clone())
    }

    /// Recorded calls matching `predicate`
    pub fn calls_matching(&self, predicate: impl Fn(&GlCall) -> bool) -> Vec<GlCall> {
        self.with_state(|state| state.calls.iter().filter(|call| predicate(call)).cloned().collect())
    }

    pub fn draw_calls(&self) -> Vec<GlCall> {
        self.calls_matching(GlCall::is_draw)
    }

    pub fn clear_calls(&self) {
        self.with_state(|state| state.calls.clear());
    }

    /// Make the next `get_error` return `code`
    pub fn set_pending_error(&self, code: u32) {
        self.with_state(|state| state.pending_error = code);
    }

    /// Status returned by `check_framebuffer_status`
    pub fn set_framebuffer_status(&self, status: u32) {
        self.with_state(|state| state.framebuffer_status = status);
    }

    /// Current storage of buffer `name` (`None` once deleted)
    pub fn buffer_contents(&self, name: u32) -> Option<Vec<u8>> {
        self.with_state(|state| state.buffers.get(&name).cloned())
    }

    /// Buffer bound to `target` (0 when none)
    pub fn bound_buffer(&self, target: u32) -> u32 {
        self.with_state(|state| state.bindings.get(&target).copied().unwrap_or(0))
    }

    pub fn bound_vertex_array(&self) -> u32 {
        self.with_state(|state| state.bound_vertex_array)
    }

    pub fn live_buffer_count(&self) -> usize {
        self.with_state(|state| state.buffers.len())
    }

    /// Deliver a debug message to the installed callback
    ///
    /// Returns `false` when no callback is installed.
    pub fn emit_debug_message(&self, severity: u32, message: &str) -> bool {
        let callback = self.with_state(|state| state.debug_callback);
        match callback {
            Some(callback) => {
                callback(consts::DONT_CARE, consts::DONT_CARE, 0, severity, message);
                true
            }
            None => false,
        }
    }
}

impl Default for RecordingGlContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GlContext for RecordingGlContext {
    fn get_error(&self) -> u32 {
        self.with_state(|state| std::mem::replace(&mut state.pending_error, consts::NO_ERROR))
    }

    fn create_buffer(&self) -> u32 {
        self.with_state(|state| {
            let name = state.next_name();
            state.buffers.insert(name, Vec::new());
            state.calls.push(GlCall::CreateBuffer(name));
            name
        })
    }

    fn delete_buffer(&self, buffer: u32) {
        self.with_state(|state| {
            state.buffers.remove(&buffer);
            state.bindings.retain(|_, bound| *bound != buffer);
            state.calls.push(GlCall::DeleteBuffer(buffer));
        });
    }

    fn bind_buffer(&self, target: u32, buffer: u32) {
        self.with_state(|state| {
            state.bindings.insert(target, buffer);
            state.calls.push(GlCall::BindBuffer { target, buffer });
        });
    }

    fn buffer_data(&self, target: u32, size: usize, data: Option<&[u8]>, usage: u32) {
        self.with_state(|state| {
            let bound = state.bindings.get(&target).copied().unwrap_or(0);
            if let Some(storage) = state.buffers.get_mut(&bound) {
                *storage = match data {
                    Some(bytes) => bytes.to_vec(),
                    None => vec![0; size],
                };
            }
            state.calls.push(GlCall::BufferData { target, size, data: data.map(<[u8]>::to_vec), usage });
        });
    }

    fn buffer_sub_data(&self, target: u32, offset: usize, data: &[u8]) {
        self.with_state(|state| {
            let bound = state.bindings.get(&target).copied().unwrap_or(0);
            if let Some(storage) = state.buffers.get_mut(&bound) {
                let end = offset + data.len();
                if end <= storage.len() {
                    storage[offset..end].copy_from_slice(data);
                } else {
                    state.pending_error = consts::INVALID_VALUE;
                }
            }
            state.calls.push(GlCall::BufferSubData { target, offset, data: data.to_vec() });
        });
    }

    fn bind_buffer_base(&self, target: u32, index: u32, buffer: u32) {
        self.with_state(|state| {
            state.bindings.insert(target, buffer);
            state.calls.push(GlCall::BindBufferBase { target, index, buffer });
        });
    }

    fn create_vertex_array(&self) -> u32 {
        self.with_state(|state| {
            let name = state.next_name();
            state.calls.push(GlCall::CreateVertexArray(name));
            name
        })
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.with_state(|state| {
            if state.bound_vertex_array == vertex_array {
                state.bound_vertex_array = 0;
            }
            state.calls.push(GlCall::DeleteVertexArray(vertex_array));
        });
    }

    fn bind_vertex_array(&self, vertex_array: u32) {
        self.with_state(|state| {
            state.bound_vertex_array = vertex_array;
            state.calls.push(GlCall::BindVertexArray(vertex_array));
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(&self, index: u32, size: i32, data_type: u32, normalized: bool, stride: i32, offset: usize) {
        self.record(GlCall::VertexAttribPointer { index, size, data_type, normalized, stride, offset });
    }

    fn vertex_attrib_i_pointer(&self, index: u32, size: i32, data_type: u32, stride: i32, offset: usize) {
        self.record(GlCall::VertexAttribIPointer { index, size, data_type, stride, offset });
    }

    fn object_label(&self, identifier: u32, name: u32, label: &str) {
        self.record(GlCall::ObjectLabel { identifier, name, label: label.to_string() });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport { x, y, width, height });
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(GlCall::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, mask: u32) {
        self.record(GlCall::Clear(mask));
    }

    fn enable(&self, capability: u32) {
        self.record(GlCall::Enable(capability));
    }

    fn disable(&self, capability: u32) {
        self.record(GlCall::Disable(capability));
    }

    fn depth_func(&self, func: u32) {
        self.record(GlCall::DepthFunc(func));
    }

    fn cull_face(&self, mode: u32) {
        self.record(GlCall::CullFace(mode));
    }

    fn front_face(&self, mode: u32) {
        self.record(GlCall::FrontFace(mode));
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(GlCall::DrawElements { mode, count, element_type, offset });
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }

    fn check_framebuffer_status(&self, target: u32) -> u32 {
        self.with_state(|state| {
            state.calls.push(GlCall::CheckFramebufferStatus(target));
            state.framebuffer_status
        })
    }

    fn debug_message_callback(&self, callback: GlDebugCallback) {
        self.with_state(|state| {
            state.debug_callback = Some(callback);
            state.calls.push(GlCall::DebugMessageCallback);
        });
    }

    fn debug_message_control(&self, source: u32, message_type: u32, severity: u32, enabled: bool) {
        self.record(GlCall::DebugMessageControl { source, message_type, severity, enabled });
    }
}

#[cfg(test)]
#[path = "recording_context_tests.rs"]
mod tests;
