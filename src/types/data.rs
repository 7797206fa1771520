//! Data struct definition and island output accessors.
//!
//! [`Data`] is the per-step state island discovery works against: the
//! active constraint rows with their Jacobian, the contacts those rows
//! reference, the arena the outputs are allocated on, and the island
//! indexing tables themselves. It is the mutable counterpart to
//! [`Model`](crate::Model), created per simulation context via
//! `model.make_data()`.

use nalgebra::DMatrix;

use super::contact_types::Contact;
use super::enums::ConstraintType;
use super::warning::{WarningStat, NUM_WARNINGS};
use crate::arena::{Arena, ArenaBlock};

/// Handles to the island output arrays on the arena.
///
/// Allocated as a unit by `mj_island`; `None` in [`Data::island`] is the
/// "outputs unset" state. `mark` records the arena front watermark before
/// the blocks, so the next call (or a rollback) can reclaim them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IslandBlocks {
    pub(crate) mark: usize,
    pub(crate) dof_island: ArenaBlock,
    pub(crate) dof_islandnext: ArenaBlock,
    pub(crate) efc_island: ArenaBlock,
    pub(crate) efc_islandnext: ArenaBlock,
    pub(crate) island_dofadr: ArenaBlock,
    pub(crate) island_efcadr: ArenaBlock,
}

/// Per-step simulation state (like mjData, reduced to the island pass).
///
/// The `efc_*` arrays are written by the constraint assembler upstream and
/// are read-only here; the island tables at the bottom are exclusively
/// written by `mj_island` and must not be read concurrently with it.
#[derive(Debug)]
#[allow(non_snake_case)] // efc_J matches MuJoCo naming convention
pub struct Data {
    // ==================== Constraint Rows (assembler input) ====================
    /// Number of active constraint rows.
    pub nefc: usize,
    /// Number of equality rows; these occupy `efc_*[0..ne)`.
    pub ne: usize,
    /// Number of friction loss rows (DOF + tendon), following the equality
    /// block.
    pub nf: usize,
    /// Per-row constraint family (length `nefc`).
    pub efc_type: Vec<ConstraintType>,
    /// Per-row index into the family's table (length `nefc`). Consecutive
    /// rows sharing `(efc_type, efc_id)` form one logical constraint.
    pub efc_id: Vec<usize>,
    /// Dense constraint Jacobian (`nefc` x `nv`). Empty when the model
    /// selects sparse storage.
    pub efc_J: DMatrix<f64>,
    /// Sparse Jacobian row nonzero counts (length `nefc`).
    pub efc_J_rownnz: Vec<usize>,
    /// Sparse Jacobian row start offsets into `efc_J_colind` (length `nefc`).
    pub efc_J_rowadr: Vec<usize>,
    /// Sparse Jacobian column indices. Not necessarily sorted or unique
    /// within a row.
    pub efc_J_colind: Vec<usize>,

    // ==================== Contacts ====================
    /// Active contacts referenced by `efc_id` of contact rows.
    pub contacts: Vec<Contact>,
    /// Number of active contacts (`contacts.len()` but tracked explicitly).
    pub ncon: usize,

    // ==================== Island Discovery ====================
    /// Number of constraint islands discovered this step.
    pub nisland: usize,
    /// Output block table; `None` until discovery runs (or after rollback).
    pub(crate) island: Option<IslandBlocks>,

    // ==================== Workspace / Diagnostics ====================
    /// Per-step bump arena holding scratch and the island outputs.
    pub arena: Arena,
    /// Per-kind warning statistics.
    pub warnings: [WarningStat; NUM_WARNINGS],
    /// Simulation time in seconds (for warning messages).
    pub time: f64,
}

impl Data {
    /// Island ID per DOF, `-1` for DOFs in no constraint (length `nv`).
    #[must_use]
    pub fn dof_island(&self) -> Option<&[i32]> {
        self.island.as_ref().map(|b| self.arena.view(b.dof_island))
    }

    /// Next DOF of the same island in ascending order, `-1` at the tail and
    /// for unconstrained DOFs (length `nv`).
    #[must_use]
    pub fn dof_islandnext(&self) -> Option<&[i32]> {
        self.island
            .as_ref()
            .map(|b| self.arena.view(b.dof_islandnext))
    }

    /// Island ID per constraint row; never `-1` (length `nefc`).
    #[must_use]
    pub fn efc_island(&self) -> Option<&[i32]> {
        self.island.as_ref().map(|b| self.arena.view(b.efc_island))
    }

    /// Next constraint row of the same island in ascending order, `-1` at
    /// the tail (length `nefc`).
    #[must_use]
    pub fn efc_islandnext(&self) -> Option<&[i32]> {
        self.island
            .as_ref()
            .map(|b| self.arena.view(b.efc_islandnext))
    }

    /// First DOF of each island's intrusive list (length `nisland`).
    #[must_use]
    pub fn island_dofadr(&self) -> Option<&[i32]> {
        self.island
            .as_ref()
            .map(|b| self.arena.view(b.island_dofadr))
    }

    /// First constraint row of each island's intrusive list (length
    /// `nisland`).
    #[must_use]
    pub fn island_efcadr(&self) -> Option<&[i32]> {
        self.island
            .as_ref()
            .map(|b| self.arena.view(b.island_efcadr))
    }

    /// Unset the island outputs and reclaim their arena region.
    pub(crate) fn clear_island(&mut self) {
        if let Some(blocks) = self.island.take() {
            self.arena.rewind(blocks.mark);
        }
        self.nisland = 0;
    }

    /// Reset per-step state: constraint rows, contacts, island outputs,
    /// warnings, time. The arena is fully rewound.
    pub fn reset(&mut self) {
        self.nefc = 0;
        self.ne = 0;
        self.nf = 0;
        self.efc_type.clear();
        self.efc_id.clear();
        self.efc_J = DMatrix::zeros(0, 0);
        self.efc_J_rownnz.clear();
        self.efc_J_rowadr.clear();
        self.efc_J_colind.clear();
        self.contacts.clear();
        self.ncon = 0;
        self.nisland = 0;
        self.island = None;
        self.arena.reset();
        self.warnings = Default::default();
        self.time = 0.0;
    }
}
