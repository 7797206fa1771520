//! Constraint-island discovery for a MuJoCo-aligned physics pipeline.
//!
//! At each simulation step the constraint assembler produces a stack of
//! scalar constraint rows with a Jacobian over the system's degrees of
//! freedom. Many of those rows are mutually independent: the active set
//! partitions into disjoint "islands" that downstream solvers can process
//! as separate sub-problems. This crate discovers that partition and
//! publishes the per-DOF and per-constraint indexing tables the solvers
//! consume. Corresponds to MuJoCo's `engine_island.c`.
//!
//! The partition is taken over kinematic trees, not DOFs: a tree is the
//! finest unit that is always structurally coupled, so all DOFs of a tree
//! land in the same island and the graph shrinks by orders of magnitude.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ Model (static)        Data (per-step)                     │
//! │  tree maps, tables     efc rows + Jacobian, contacts      │
//! └───────────┬───────────────────┬───────────────────────────┘
//!             ▼                   ▼
//!   find_edges: constraint rows → tree-tree edge records
//!             ▼
//!   CSR adjacency → mj_flood_fill → island id per tree
//!             ▼
//!   broadcast: dof_island / efc_island + intrusive next-lists,
//!   allocated on the per-step arena
//! ```
//!
//! All outputs live on the per-step [`Arena`]. If the arena cannot hold
//! them, the call rolls back to its entry watermark, yields an empty island
//! set, and records a [`Warning::ConstraintFull`] warning; the step
//! continues with an uninstrumented (global) solve.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn, // Accessors returning slices can't be const
    clippy::too_many_lines,       // Discovery phases naturally run long
    clippy::doc_markdown,         // Not all technical terms need backticks
)]

pub mod arena;
pub mod island;
pub mod types;

pub use arena::{Arena, ArenaBlock};
pub use island::mj_island;
pub use types::{
    Contact, ConstraintType, Data, EqualityType, IslandError, JacobianType, Model, Warning,
    WarningStat, mj_warning, DISABLE_ISLAND, NUM_WARNINGS,
};
