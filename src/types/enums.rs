//! Enums, flags, and error types for island discovery.
//!
//! The type-level vocabulary shared with the constraint assembler: row
//! families, equality subtypes, Jacobian representation selection, and the
//! unrecoverable-error enum for invariant violations.

/// Constraint family annotation per row in the unified constraint system
/// (matches MuJoCo's `mjtConstraint`).
///
/// Consecutive rows sharing both `efc_type` and `efc_id` belong to one
/// logical constraint; the edge collector deduplicates them into a single
/// emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintType {
    /// Equality constraint (connect, weld, joint, tendon, distance).
    Equality,
    /// DOF friction loss. `efc_id` is the DOF index.
    FrictionDof,
    /// Tendon friction loss. `efc_id` is the tendon index.
    FrictionTendon,
    /// Joint limit constraint. `efc_id` is the joint index.
    LimitJoint,
    /// Tendon limit constraint. `efc_id` is the tendon index.
    LimitTendon,
    /// Frictionless contact (condim = 1).
    ContactFrictionless,
    /// Pyramidal friction cone facet.
    ContactPyramidal,
    /// Contact with elliptic friction cone.
    ContactElliptic,
}

/// Equality constraint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EqualityType {
    /// Connect: constrains two body points to coincide.
    #[default]
    Connect,
    /// Weld: constrains two body frames to be identical.
    Weld,
    /// Joint: polynomial constraint between two joints.
    Joint,
    /// Tendon: polynomial constraint between two tendons.
    Tendon,
    /// Distance: constrains distance between two geom centers.
    /// `eq_obj1id`/`eq_obj2id` store geom IDs (not body IDs).
    Distance,
}

/// Constraint Jacobian storage selection (matches MuJoCo's `mjtJacobian`).
///
/// Resolved once per call via [`Model::is_sparse`]; the tree scanner has a
/// dense and a sparse path behind a single operation.
///
/// [`Model::is_sparse`]: crate::Model::is_sparse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JacobianType {
    /// Dense `nefc x nv` storage.
    Dense,
    /// Compressed sparse row storage (rownnz/rowadr/colind).
    Sparse,
    /// Sparse for large systems (`nv >= 60`), dense otherwise.
    #[default]
    Auto,
}

/// Skip island discovery; solvers see a single global problem.
/// Bit position matches MuJoCo's `mjDSBL_island`.
pub const DISABLE_ISLAND: u32 = 1 << 18;

/// Invariant violations inside island discovery.
///
/// None of these can occur on well-formed inputs; each indicates a
/// programmer error upstream (bad constraint tables, an all-zero Jacobian
/// row, or an undercounted edge budget). The step must be aborted, not
/// continued with a silently wrong partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IslandError {
    /// An edge with both endpoints on the static tree. The static tree has
    /// no DOFs, so no constraint row can produce this.
    StaticSelfEdge,
    /// Edge record buffer overflow: the collector produced more records
    /// than the budget estimator allowed for.
    EdgeOverflow {
        /// The estimated record capacity that was exceeded.
        nedge_max: usize,
    },
    /// An active constraint row whose Jacobian touches no tree.
    ConstraintNotInIsland {
        /// The offending constraint row.
        row: usize,
    },
    /// The number of islands that received at least one element disagrees
    /// with the flood-fill island count.
    IslandCountMismatch {
        /// Island count reported by flood fill.
        expected: usize,
        /// Islands that received a first element during threading.
        found: usize,
    },
}

impl std::fmt::Display for IslandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaticSelfEdge => write!(f, "self-edge of the static tree"),
            Self::EdgeOverflow { nedge_max } => {
                write!(f, "edge array too small (nedge_max={nedge_max})")
            }
            Self::ConstraintNotInIsland { row } => {
                write!(f, "constraint {row} not in any island")
            }
            Self::IslandCountMismatch { expected, found } => {
                write!(
                    f,
                    "not all islands assigned ({found} of {expected} received elements)"
                )
            }
        }
    }
}

impl std::error::Error for IslandError {}
