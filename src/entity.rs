//! Entity table: the kernel ABI and per-node bindings.
//!
//! A kernel is an opaque leaf function reached through a fixed-arity
//! `extern "C"` signature -- the per-operator adapter shims that unpack
//! the fixed call into an operator's real positional arguments are
//! generated code the core never sees. Kernels read their `inputs` and
//! write their `outputs`; two scratch buffers are shared, unsynchronized,
//! across every kernel in the run.

use std::fmt;

use crate::id::NodeId;

/// Up to this many input buffers per node.
pub const MAX_INPUTS: usize = 8;
/// Up to this many output buffers per node.
pub const MAX_OUTPUTS: usize = 2;

/// The kernel entry point signature every node's bound function must
/// satisfy. Matches the generated C ABI this core plugs into: positional
/// input/output buffer pointers plus two scratch workspaces, returning a
/// status code (0 = success).
pub type KernelFn = extern "C" fn(
    inputs: &[*const u8],
    outputs: &[*mut u8],
    scratch_const: &[u8],
    scratch_work: &mut [u8],
) -> i32;

/// Device kind a node's kernel targets. Reserved for a future
/// multi-device scheduler; the current FIFO scheduler ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Cpu,
    Gpu,
}

/// Dispatch priority. Reserved; the current scheduler is FIFO-only
/// within the ready set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Normal,
    Low,
}

/// Reserved per-node configuration. Not consulted by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityConfig {
    pub device: DeviceKind,
    pub priority: Priority,
}

impl Default for EntityConfig {
    fn default() -> Self {
        EntityConfig {
            device: DeviceKind::Cpu,
            priority: Priority::Normal,
        }
    }
}

/// One schedulable node: its kernel and buffer bindings.
///
/// Inputs/outputs are raw buffer pointers bound by the upstream memory
/// planner; the core neither dereferences nor validates them beyond
/// passing them through to the bound kernel.
pub struct Entity {
    pub id: NodeId,
    pub kernel: KernelFn,
    inputs: [*const u8; MAX_INPUTS],
    input_count: usize,
    outputs: [*mut u8; MAX_OUTPUTS],
    output_count: usize,
    pub config: EntityConfig,
}

// Safety: `inputs`/`outputs` are buffer pointers owned by the process for
// the run's lifetime. The upstream generator guarantees nodes that may
// run concurrently (simultaneously in the ready set) never conflict on
// these buffers; the core itself performs no synchronization on them.
unsafe impl Send for Entity {}
unsafe impl Sync for Entity {}

impl Entity {
    /// Build an entity. `inputs`/`outputs` must not exceed
    /// [`MAX_INPUTS`]/[`MAX_OUTPUTS`]; panics otherwise since this is a
    /// construction-time programmer error in the generator, not a
    /// runtime condition.
    pub fn new(
        id: NodeId,
        kernel: KernelFn,
        inputs: &[*const u8],
        outputs: &[*mut u8],
        config: EntityConfig,
    ) -> Self {
        assert!(inputs.len() <= MAX_INPUTS, "too many inputs for node {id}");
        assert!(
            outputs.len() <= MAX_OUTPUTS,
            "too many outputs for node {id}"
        );

        let mut input_buf = [std::ptr::null(); MAX_INPUTS];
        input_buf[..inputs.len()].copy_from_slice(inputs);

        let mut output_buf = [std::ptr::null_mut(); MAX_OUTPUTS];
        output_buf[..outputs.len()].copy_from_slice(outputs);

        Entity {
            id,
            kernel,
            inputs: input_buf,
            input_count: inputs.len(),
            outputs: output_buf,
            output_count: outputs.len(),
            config,
        }
    }

    pub fn inputs(&self) -> &[*const u8] {
        &self.inputs[..self.input_count]
    }

    pub fn outputs(&self) -> &[*mut u8] {
        &self.outputs[..self.output_count]
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("input_count", &self.input_count)
            .field("output_count", &self.output_count)
            .field("config", &self.config)
            .finish()
    }
}

/// Immutable-after-construction table of every node's kernel binding.
pub struct EntityTable {
    entities: Vec<Entity>,
}

impl EntityTable {
    pub fn new(entities: Vec<Entity>) -> Self {
        EntityTable { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &Entity {
        &self.entities[id as usize]
    }
}

/// A shared, unsynchronized scratch byte buffer.
///
/// Two process-lifetime buffers are handed to every kernel invocation.
/// The upstream memory planner partitions them so that kernels which may
/// run concurrently never write-overlap; the core performs no locking.
#[derive(Clone, Copy)]
pub struct ScratchBuffer {
    ptr: *mut u8,
    len: usize,
}

// Safety: see the module-level doc comment -- the generator's memory
// plan, not the core, is responsible for absence of data races across
// concurrently-ready kernels.
unsafe impl Send for ScratchBuffer {}
unsafe impl Sync for ScratchBuffer {}

impl ScratchBuffer {
    /// Wrap a caller-owned byte buffer. The buffer must outlive every use
    /// of this handle.
    pub fn new(slice: &mut [u8]) -> Self {
        ScratchBuffer {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
        }
    }

    /// Read-only view (used when binding `scratch_const`).
    ///
    /// # Safety
    /// Valid only while the buffer this handle was built from is alive
    /// and not mutated elsewhere in a way that races with this read.
    pub unsafe fn as_slice(&self) -> &[u8] {
        std::slice::from_raw_parts(self.ptr, self.len)
    }

    /// Mutable view (used when binding `scratch_work`).
    ///
    /// # Safety
    /// The caller must uphold the non-overlap contract: no two
    /// concurrently-running kernels may be handed overlapping regions of
    /// the same underlying buffer.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn as_mut_slice(&self) -> &mut [u8] {
        std::slice::from_raw_parts_mut(self.ptr, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern "C" fn noop_kernel(
        _inputs: &[*const u8],
        _outputs: &[*mut u8],
        _scratch_const: &[u8],
        _scratch_work: &mut [u8],
    ) -> i32 {
        0
    }

    #[test]
    fn entity_stores_arity() {
        let a = 1u8;
        let mut b = 2u8;
        let inputs = [&a as *const u8];
        let outputs = [&mut b as *mut u8];
        let e = Entity::new(0, noop_kernel, &inputs, &outputs, EntityConfig::default());
        assert_eq!(e.inputs().len(), 1);
        assert_eq!(e.outputs().len(), 1);
    }

    #[test]
    fn scratch_buffer_round_trips() {
        let mut buf = vec![0u8; 16];
        let handle = ScratchBuffer::new(&mut buf);
        unsafe {
            handle.as_mut_slice()[0] = 42;
            assert_eq!(handle.as_slice()[0], 42);
        }
    }
}
