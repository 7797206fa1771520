//! Model struct definition and field accessors.
//!
//! [`Model`] is the static, immutable description of the simulated system
//! as island discovery sees it: dimensions, kinematic-tree maps, and the
//! constraint tables that let the edge collector resolve each row family to
//! the trees it couples. It is populated by the model compiler and shared
//! (read-only) across all pipeline stages.

use super::data::Data;
use super::enums::{EqualityType, JacobianType};
use crate::arena::Arena;

/// Static model definition (like mjModel, reduced to the island inputs).
///
/// # Memory Layout
///
/// Arrays are indexed by their respective IDs:
/// - `body_*` arrays indexed by `body_id` (0 = world)
/// - `jnt_*` arrays indexed by `joint_id`
/// - `dof_*` arrays indexed by `dof_id` (velocity dimension index)
/// - `geom_*` arrays indexed by `geom_id`
/// - `eq_*` arrays indexed by `eq_id`
/// - `tendon_*` arrays indexed by `tendon_id`
///
/// Tree IDs are `i32` with `-1` for the static tree (the worldbody). The
/// static tree has no DOFs, so `dof_treeid` is never `-1`; `body_treeid[0]`
/// always is.
#[derive(Debug, Clone)]
pub struct Model {
    // ==================== Dimensions ====================
    /// Number of generalized velocity coordinates (DOFs).
    pub nv: usize,
    /// Number of bodies (including world body 0).
    pub nbody: usize,
    /// Number of joints.
    pub njnt: usize,
    /// Number of collision geometries.
    pub ngeom: usize,
    /// Number of kinematic trees (excluding the world).
    pub ntree: usize,
    /// Number of equality constraints.
    pub neq: usize,
    /// Number of tendons.
    pub ntendon: usize,
    /// Arena capacity in `i32` words for the per-step island workspace.
    pub narena: usize,

    // ==================== Kinematic Trees ====================
    /// Tree index for each body; `-1` for the world body (length `nbody`).
    pub body_treeid: Vec<i32>,
    /// Tree index for each DOF (length `nv`).
    pub dof_treeid: Vec<i32>,

    // ==================== Joints ====================
    /// First DOF index for each joint (length `njnt`).
    pub jnt_dof_adr: Vec<usize>,

    // ==================== Geoms ====================
    /// Owning body for each geom (length `ngeom`).
    pub geom_body: Vec<usize>,

    // ==================== Equality Constraints ====================
    /// Constraint subtype (length `neq`).
    pub eq_type: Vec<EqualityType>,
    /// First object: body ID for connect/weld, joint/tendon/geom ID for the
    /// other subtypes (length `neq`).
    pub eq_obj1id: Vec<usize>,
    /// Second object, same convention as `eq_obj1id` (length `neq`).
    pub eq_obj2id: Vec<usize>,

    // ==================== Tendons ====================
    /// Number of DOFs on each tendon's path (length `ntendon`).
    pub tendon_num: Vec<usize>,
    /// Whether each tendon has a length limit (length `ntendon`).
    pub tendon_limited: Vec<bool>,
    /// Friction loss coefficient per tendon; 0 disables (length `ntendon`).
    pub tendon_frictionloss: Vec<f64>,

    // ==================== Options ====================
    /// Constraint Jacobian storage selection.
    pub jacobian: JacobianType,
    /// Disable-flag bits (`DISABLE_*`).
    pub disableflags: u32,
}

impl Model {
    /// Whether the constraint Jacobian is stored sparse this step.
    /// Matches MuJoCo's `mj_isSparse()`: `Auto` resolves by system size.
    #[must_use]
    pub fn is_sparse(&self) -> bool {
        match self.jacobian {
            JacobianType::Dense => false,
            JacobianType::Sparse => true,
            JacobianType::Auto => self.nv >= 60,
        }
    }

    /// Create the per-step simulation data for this model.
    #[must_use]
    pub fn make_data(&self) -> Data {
        Data {
            nefc: 0,
            ne: 0,
            nf: 0,
            efc_type: Vec::new(),
            efc_id: Vec::new(),
            efc_J: nalgebra::DMatrix::zeros(0, 0),
            efc_J_rownnz: Vec::new(),
            efc_J_rowadr: Vec::new(),
            efc_J_colind: Vec::new(),
            contacts: Vec::new(),
            ncon: 0,
            nisland: 0,
            island: None,
            arena: Arena::new(self.narena),
            warnings: Default::default(),
            time: 0.0,
        }
    }
}
