//! Constraint-island discovery: connected components of the tree-adjacency
//! graph induced by the active constraint set.
//!
//! Corresponds to MuJoCo's `engine_island.c`. Constraint rows couple
//! kinematic trees; each logical constraint is reduced to tree-tree edges
//! (per-family fast paths, with a generic Jacobian-scan fallback for
//! anything else), the edges become a symmetric CSR adjacency built in one
//! pass, flood fill labels the trees, and the labels are broadcast to
//! per-DOF and per-constraint tables threaded as ascending intrusive
//! lists. All scratch and all outputs live on the per-step arena; output
//! allocation failure rolls the call back and leaves an empty island set.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use crate::arena::{carve, Arena};
use crate::types::{
    mj_warning, ConstraintType, Data, EqualityType, IslandBlocks, IslandError, Model, Warning,
    DISABLE_ISLAND,
};

/// Partition a graph with symmetric sparse adjacency into connected
/// components.
///
/// Writes `island[v]` in `[0, k)` for vertices with at least one edge and
/// `-1` for isolated vertices (`rownnz[v] == 0`), and returns `k`. `stack`
/// must hold at least the total nonzero count. Column indices need not be
/// sorted or unique; duplicates and self-loops are pushed and discarded on
/// pop without affecting the result.
pub(crate) fn mj_flood_fill(
    island: &mut [i32],
    rownnz: &[i32],
    rowadr: &[i32],
    colind: &[i32],
    stack: &mut [i32],
) -> usize {
    let n = island.len();
    island.fill(-1);
    let mut nisland = 0;

    for seed in 0..n {
        // Vertex already in an island or singleton with no edges: skip.
        if island[seed] != -1 || rownnz[seed] == 0 {
            continue;
        }

        let mut nstack = 1;
        stack[0] = seed as i32;

        // DFS traversal of the island.
        while nstack > 0 {
            nstack -= 1;
            let v = stack[nstack] as usize;

            // Duplicate push: already assigned, discard.
            if island[v] != -1 {
                continue;
            }
            island[v] = nisland as i32;

            // Push all neighbors with a bulk copy of the row.
            let adr = rowadr[v] as usize;
            let nnz = rownnz[v] as usize;
            stack[nstack..nstack + nnz].copy_from_slice(&colind[adr..adr + nnz]);
            nstack += nnz;
        }

        nisland += 1;
    }

    nisland as usize
}

/// Return the next tree in Jacobian row `row` that differs from `tree`, or
/// `-1` if the row has no further nonzero outside `tree`.
///
/// `tree == -1` matches the first tree incident on the row. When `cursor`
/// is given, scanning starts there and it is left just past the discovered
/// nonzero, so repeated calls walk a row left to right. The dense and
/// sparse Jacobian layouts sit behind this one operation, selected by the
/// model's storage flag.
fn tree_next(
    model: &Model,
    data: &Data,
    tree: i32,
    row: usize,
    mut cursor: Option<&mut usize>,
) -> i32 {
    let mut j = cursor.as_deref().copied().unwrap_or(0);
    let mut next = -1;

    if model.is_sparse() {
        let adr = data.efc_J_rowadr[row];
        let end = data.efc_J_rownnz[row];
        while j < end {
            let t = model.dof_treeid[data.efc_J_colind[adr + j]];
            j += 1;
            if t != tree {
                next = t;
                break;
            }
        }
    } else {
        let nv = model.nv;
        while j < nv {
            let col = j;
            j += 1;
            if data.efc_J[(row, col)] != 0.0 {
                let t = model.dof_treeid[col];
                if t != tree {
                    next = t;
                    break;
                }
            }
        }
    }

    if let Some(c) = cursor.take() {
        *c = j;
    }
    next
}

/// Add 0 records, 1 self-record, or 2 flipped records to the edge array,
/// bumping `treenedge` once per record. Returns the new record count.
///
/// An endpoint of `-1` is the static tree and folds onto the other
/// endpoint; both `-1` cannot happen on well-formed inputs. A record equal
/// to the immediately preceding one (in either orientation) is suppressed,
/// which absorbs the run of rows a multi-row constraint produces.
fn add_edge(
    treenedge: &mut [i32],
    edge: &mut [i32],
    nedge: usize,
    tree1: i32,
    tree2: i32,
    nedge_max: usize,
) -> Result<usize, IslandError> {
    // Handle the static tree.
    if tree1 == -1 && tree2 == -1 {
        return Err(IslandError::StaticSelfEdge);
    }
    let mut t1 = tree1;
    let mut t2 = tree2;
    if t1 == -1 {
        t1 = t2;
    }
    if t2 == -1 {
        t2 = t1;
    }

    // Previous record.
    let (p1, p2) = if nedge > 0 {
        (edge[2 * nedge - 2], edge[2 * nedge - 1])
    } else {
        (-1, -1)
    };

    // Self edge: a single (t, t) record.
    if t1 == t2 {
        if nedge > 0 && t1 == p1 && t1 == p2 {
            return Ok(nedge);
        }
        if nedge >= nedge_max {
            return Err(IslandError::EdgeOverflow { nedge_max });
        }
        edge[2 * nedge] = t1;
        edge[2 * nedge + 1] = t1;
        treenedge[t1 as usize] += 1;
        return Ok(nedge + 1);
    }

    // Non-self edge: both orientations, so the CSR comes out symmetric in
    // one pass.
    if nedge > 0 && ((t1 == p1 && t2 == p2) || (t1 == p2 && t2 == p1)) {
        return Ok(nedge);
    }
    if nedge + 2 > nedge_max {
        return Err(IslandError::EdgeOverflow { nedge_max });
    }
    edge[2 * nedge] = t1;
    edge[2 * nedge + 1] = t2;
    edge[2 * nedge + 2] = t2;
    edge[2 * nedge + 3] = t1;
    treenedge[t1 as usize] += 1;
    treenedge[t2 as usize] += 1;
    Ok(nedge + 2)
}

/// Walk the constraint rows and emit tree-tree edge records, incrementing
/// the per-tree counts. Returns the total record count.
///
/// Rows with the same `(efc_type, efc_id)` as the preceding row belong to
/// the same logical constraint and are skipped. Families whose endpoints
/// are known from the model tables take a fast path; everything else scans
/// the Jacobian row and chains the incident trees, which is enough for
/// connectivity.
fn find_edges(
    model: &Model,
    data: &Data,
    treenedge: &mut [i32],
    edge: &mut [i32],
    nedge_max: usize,
) -> Result<usize, IslandError> {
    treenedge.fill(0);

    let mut prev: Option<(ConstraintType, usize)> = None;
    let mut nedge = 0;

    for i in 0..data.nefc {
        // Row i is still in the same constraint: skip.
        if prev == Some((data.efc_type[i], data.efc_id[i])) {
            continue;
        }
        prev = Some((data.efc_type[i], data.efc_id[i]));
        let id = data.efc_id[i];

        // Fast handling of special cases.
        match data.efc_type[i] {
            ConstraintType::FrictionDof => {
                let t = model.dof_treeid[id];
                nedge = add_edge(treenedge, edge, nedge, t, t, nedge_max)?;
                continue;
            }
            ConstraintType::LimitJoint => {
                let t = model.dof_treeid[model.jnt_dof_adr[id]];
                nedge = add_edge(treenedge, edge, nedge, t, t, nedge_max)?;
                continue;
            }
            ConstraintType::ContactFrictionless
            | ConstraintType::ContactPyramidal
            | ConstraintType::ContactElliptic => {
                let contact = &data.contacts[id];
                let t1 = model.body_treeid[model.geom_body[contact.geom1]];
                let t2 = model.body_treeid[model.geom_body[contact.geom2]];
                nedge = add_edge(treenedge, edge, nedge, t1, t2, nedge_max)?;
                continue;
            }
            ConstraintType::Equality => {
                if matches!(
                    model.eq_type[id],
                    EqualityType::Connect | EqualityType::Weld
                ) {
                    let t1 = model.body_treeid[model.eq_obj1id[id]];
                    let t2 = model.body_treeid[model.eq_obj2id[id]];
                    nedge = add_edge(treenedge, edge, nedge, t1, t2, nedge_max)?;
                    continue;
                }
            }
            _ => {}
        }

        // Generic case: scan the Jacobian row and chain the incident trees.
        let mut cursor = 0;
        let t1 = tree_next(model, data, -1, i, Some(&mut cursor));
        let mut t2 = tree_next(model, data, t1, i, Some(&mut cursor));

        if t2 == -1 {
            // One tree found: self-edge.
            nedge = add_edge(treenedge, edge, nedge, t1, t1, nedge_max)?;
        } else {
            // Two or more trees: chain them into a spanning path.
            nedge = add_edge(treenedge, edge, nedge, t1, t2, nedge_max)?;
            let mut t3 = tree_next(model, data, t2, i, Some(&mut cursor));
            while t3 > -1 && t3 != t2 {
                let t1 = t2;
                t2 = t3;
                nedge = add_edge(treenedge, edge, nedge, t1, t2, nedge_max)?;
                t3 = tree_next(model, data, t2, i, Some(&mut cursor));
            }
        }
    }

    Ok(nedge)
}

/// Upper bound on the number of emitted edge records, used to size the
/// record buffer.
///
/// Contacts and equalities contribute at most two records each (pair plus
/// flipped), joint friction a single self-record, and tendon limits and
/// tendon friction at most one record per DOF on the tendon's path.
fn count_max_edge(model: &Model, data: &Data) -> usize {
    let mut nedge_max = 2 * data.ncon + 2 * data.ne + data.nf;

    for t in 0..model.ntendon {
        if model.tendon_frictionloss[t] != 0.0 {
            nedge_max += model.tendon_num[t];
        }
        if model.tendon_limited[t] {
            nedge_max += model.tendon_num[t];
        }
    }

    nedge_max
}

/// Allocation-and-discovery core of [`mj_island`].
///
/// Returns the output block table and island count on success, `None` when
/// the arena ran out (the caller rolls back), or an error on invariant
/// violation. Scratch allocated here is released by the caller.
fn discover(
    model: &Model,
    data: &Data,
    arena: &mut Arena,
    parena: usize,
) -> Result<Option<(IslandBlocks, usize)>, IslandError> {
    let nv = model.nv;
    let ntree = model.ntree;
    let nefc = data.nefc;

    // Edge record buffer and per-tree counts.
    let nedge_max = count_max_edge(model, data);
    let Some(_edge) = arena.stack_alloc(2 * nedge_max) else {
        return Ok(None);
    };
    let Some(_treenedge) = arena.stack_alloc(ntree) else {
        return Ok(None);
    };

    // Collect tree-tree edges from the constraint rows.
    let nedge = {
        let (_, mut back) = arena.regions_mut();
        let treenedge = carve(&mut back, ntree);
        let edge = carve(&mut back, 2 * nedge_max);
        find_edges(model, data, treenedge, edge, nedge_max)?
    };

    // CSR adjacency and flood-fill scratch, sized by the observed count.
    let Some(_rowadr) = arena.stack_alloc(ntree) else {
        return Ok(None);
    };
    let Some(_colind) = arena.stack_alloc(nedge) else {
        return Ok(None);
    };
    let Some(_stack) = arena.stack_alloc(nedge) else {
        return Ok(None);
    };
    let Some(_tree_island) = arena.stack_alloc(ntree) else {
        return Ok(None);
    };

    // Build the CSR and discover islands over trees.
    let nisland = {
        let (_, mut back) = arena.regions_mut();
        let tree_island = carve(&mut back, ntree);
        let stack = carve(&mut back, nedge);
        let colind = carve(&mut back, nedge);
        let rowadr = carve(&mut back, ntree);
        let rownnz = carve(&mut back, ntree); // treenedge, reused as row lengths
        let edge = carve(&mut back, 2 * nedge_max);

        // Row addresses by prefix sum, zeroing the counts so the scatter
        // pass below rebuilds them as it places each record.
        let mut adr = 0;
        for t in 0..ntree {
            rowadr[t] = adr;
            adr += rownnz[t];
            rownnz[t] = 0;
        }

        // Scatter records into the column index array.
        for e in 0..nedge {
            let row = edge[2 * e] as usize;
            colind[(rowadr[row] + rownnz[row]) as usize] = edge[2 * e + 1];
            rownnz[row] += 1;
        }

        mj_flood_fill(tree_island, rownnz, rowadr, colind, stack)
    };

    // Output arrays. Failure on any of these rolls the whole call back.
    let Some(dof_island) = arena.alloc(nv) else {
        return Ok(None);
    };
    let Some(dof_islandnext) = arena.alloc(nv) else {
        return Ok(None);
    };
    let Some(efc_island) = arena.alloc(nefc) else {
        return Ok(None);
    };
    let Some(efc_islandnext) = arena.alloc(nefc) else {
        return Ok(None);
    };
    let Some(island_dofadr) = arena.alloc(nisland) else {
        return Ok(None);
    };
    let Some(island_efcadr) = arena.alloc(nisland) else {
        return Ok(None);
    };
    let Some(_island_last) = arena.stack_alloc(nisland) else {
        return Ok(None);
    };

    let blocks = IslandBlocks {
        mark: parena,
        dof_island,
        dof_islandnext,
        efc_island,
        efc_islandnext,
        island_dofadr,
        island_efcadr,
    };

    let (front, mut back) = arena.regions_mut();
    let mut front = &mut front[parena..];
    let dof_island = carve(&mut front, nv);
    let dof_islandnext = carve(&mut front, nv);
    let efc_island = carve(&mut front, nefc);
    let efc_islandnext = carve(&mut front, nefc);
    let island_dofadr = carve(&mut front, nisland);
    let island_efcadr = carve(&mut front, nisland);
    let island_last = carve(&mut back, nisland);
    let tree_island = carve(&mut back, ntree);

    // DOF pass: broadcast tree islands to DOFs, threading each island's
    // DOFs in ascending order.
    island_last.fill(-1);
    let mut nisland_found = 0;
    for i in 0..nv {
        let island = tree_island[model.dof_treeid[i] as usize];
        dof_island[i] = island;

        if island < 0 {
            // DOF is not in any island (unconstrained).
            dof_islandnext[i] = -1;
            continue;
        }
        let k = island as usize;
        let last = island_last[k];
        if last < 0 {
            // First DOF of the island.
            island_dofadr[k] = i as i32;
            nisland_found += 1;
        } else {
            dof_islandnext[last as usize] = i as i32;
        }
        island_last[k] = i as i32;
    }
    if nisland_found != nisland {
        return Err(IslandError::IslandCountMismatch {
            expected: nisland,
            found: nisland_found,
        });
    }
    // Mark the last DOF of each island.
    for k in 0..nisland {
        dof_islandnext[island_last[k] as usize] = -1;
    }

    // Constraint-row pass, same threading against the efc tables. The
    // island comes from the first tree the row's Jacobian touches.
    island_last.fill(-1);
    nisland_found = 0;
    for i in 0..nefc {
        let tree = tree_next(model, data, -1, i, None);
        if tree < 0 {
            return Err(IslandError::ConstraintNotInIsland { row: i });
        }
        let island = tree_island[tree as usize];
        if island < 0 {
            return Err(IslandError::ConstraintNotInIsland { row: i });
        }
        efc_island[i] = island;

        let k = island as usize;
        let last = island_last[k];
        if last < 0 {
            island_efcadr[k] = i as i32;
            nisland_found += 1;
        } else {
            efc_islandnext[last as usize] = i as i32;
        }
        island_last[k] = i as i32;
    }
    if nisland_found != nisland {
        return Err(IslandError::IslandCountMismatch {
            expected: nisland,
            found: nisland_found,
        });
    }
    for k in 0..nisland {
        efc_islandnext[island_last[k] as usize] = -1;
    }

    Ok(Some((blocks, nisland)))
}

/// Discover constraint islands from the active constraint set.
///
/// Populates `nisland`, `dof_island`, `dof_islandnext`, `efc_island`,
/// `efc_islandnext`, `island_dofadr`, and `island_efcadr` on the arena in
/// `data`. The previous call's outputs are invalidated first. With no
/// active constraints (or island discovery disabled) the outputs stay
/// unset and `nisland` is zero, with no allocation.
///
/// If the arena cannot hold the outputs the call rolls back: outputs
/// unset, `nefc` and `nisland` zeroed, arena watermark restored, and a
/// [`Warning::ConstraintFull`] warning recorded. Scratch is always
/// released before returning.
///
/// # Errors
///
/// Returns an [`IslandError`] on invariant violations that cannot happen
/// on well-formed inputs (see the enum docs); the caller must abort the
/// step rather than keep a partial partition.
pub fn mj_island(model: &Model, data: &mut Data) -> Result<(), IslandError> {
    // Invalidate the previous step's outputs.
    data.clear_island();

    if model.disableflags & DISABLE_ISLAND != 0 {
        return Ok(());
    }

    // No constraints: quick return.
    if data.nefc == 0 {
        return Ok(());
    }

    let mut arena = std::mem::take(&mut data.arena);
    let stack_mark = arena.mark_stack();
    let parena = arena.mark();

    let outcome = discover(model, data, &mut arena, parena);
    arena.free_stack(stack_mark);

    match outcome {
        Ok(Some((blocks, nisland))) => {
            data.arena = arena;
            data.island = Some(blocks);
            data.nisland = nisland;
            Ok(())
        }
        Ok(None) => {
            // Arena exhausted: roll back and continue with an empty island
            // set; downstream solvers fall back to a global solve.
            arena.rewind(parena);
            let bytes = arena.size_bytes() as i32;
            data.arena = arena;
            data.nefc = 0;
            data.nisland = 0;
            mj_warning(data, Warning::ConstraintFull, bytes);
            Ok(())
        }
        Err(e) => {
            // Fatal: nothing is published, so reclaim the partial outputs
            // before surfacing the invariant violation.
            arena.rewind(parena);
            data.arena = arena;
            Err(e)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::JacobianType;
    use nalgebra::DMatrix;

    // ------------------------------------------------------------------
    // Flood fill
    // ------------------------------------------------------------------

    #[test]
    fn test_flood_fill_two_components() {
        // 0-1 coupled, 2 self-loop, 3 and 4 isolated.
        let rownnz = [2, 1, 2, 0, 0];
        let rowadr = [0, 2, 3, 5, 5];
        let colind = [1, 1, 0, 2, 2]; // duplicate neighbor and self-loops
        let mut island = [0i32; 5];
        let mut stack = [0i32; 5];

        let k = mj_flood_fill(&mut island, &rownnz, &rowadr, &colind, &mut stack);
        assert_eq!(k, 2);
        assert_eq!(island, [0, 0, 1, -1, -1]);
    }

    #[test]
    fn test_flood_fill_chain() {
        // Path 0-1-2 plus isolated 3: one island.
        let rownnz = [1, 2, 1, 0];
        let rowadr = [0, 1, 3, 4];
        let colind = [1, 0, 2, 1];
        let mut island = [0i32; 4];
        let mut stack = [0i32; 4];

        let k = mj_flood_fill(&mut island, &rownnz, &rowadr, &colind, &mut stack);
        assert_eq!(k, 1);
        assert_eq!(island, [0, 0, 0, -1]);
    }

    #[test]
    fn test_flood_fill_empty() {
        let mut island = [0i32; 3];
        let k = mj_flood_fill(&mut island, &[0, 0, 0], &[0, 0, 0], &[], &mut []);
        assert_eq!(k, 0);
        assert_eq!(island, [-1, -1, -1]);
    }

    // ------------------------------------------------------------------
    // Edge emission
    // ------------------------------------------------------------------

    #[test]
    fn test_add_edge_self_and_pair() {
        let mut treenedge = [0i32; 3];
        let mut edge = [0i32; 12];

        let n = add_edge(&mut treenedge, &mut edge, 0, 1, 1, 6).unwrap();
        assert_eq!(n, 1);
        assert_eq!(&edge[..2], &[1, 1]);

        // Pair emits both orientations.
        let n = add_edge(&mut treenedge, &mut edge, n, 0, 2, 6).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&edge[2..6], &[0, 2, 2, 0]);

        // One count per record.
        assert_eq!(treenedge, [1, 1, 1]);
    }

    #[test]
    fn test_add_edge_suppresses_repeats() {
        let mut treenedge = [0i32; 3];
        let mut edge = [0i32; 12];

        let n = add_edge(&mut treenedge, &mut edge, 0, 0, 1, 6).unwrap();
        // Same pair again, then flipped: both suppressed.
        let n = add_edge(&mut treenedge, &mut edge, n, 0, 1, 6).unwrap();
        let n = add_edge(&mut treenedge, &mut edge, n, 1, 0, 6).unwrap();
        assert_eq!(n, 2);

        let n = add_edge(&mut treenedge, &mut edge, n, 2, 2, 6).unwrap();
        let n = add_edge(&mut treenedge, &mut edge, n, 2, 2, 6).unwrap();
        assert_eq!(n, 3);
        assert_eq!(treenedge, [1, 1, 1]);
    }

    #[test]
    fn test_add_edge_folds_static_tree() {
        let mut treenedge = [0i32; 2];
        let mut edge = [0i32; 4];

        let n = add_edge(&mut treenedge, &mut edge, 0, -1, 1, 2).unwrap();
        assert_eq!(n, 1);
        assert_eq!(&edge[..2], &[1, 1]);

        let err = add_edge(&mut treenedge, &mut edge, n, -1, -1, 2);
        assert_eq!(err, Err(IslandError::StaticSelfEdge));
    }

    #[test]
    fn test_add_edge_overflow() {
        let mut treenedge = [0i32; 4];
        let mut edge = [0i32; 2];

        let n = add_edge(&mut treenedge, &mut edge, 0, 0, 0, 1).unwrap();
        let err = add_edge(&mut treenedge, &mut edge, n, 1, 2, 1);
        assert_eq!(err, Err(IslandError::EdgeOverflow { nedge_max: 1 }));
    }

    // ------------------------------------------------------------------
    // Tree scanner
    // ------------------------------------------------------------------

    /// One dense Jacobian row over tree_forest(&[1, 2]) touching DOFs 0
    /// and 2.
    fn dense_row_fixture() -> (Model, Data) {
        let mut model = Model::tree_forest(&[1, 2]);
        model.jacobian = JacobianType::Dense;
        let mut data = model.make_data();
        data.nefc = 1;
        data.efc_type = vec![ConstraintType::LimitTendon];
        data.efc_id = vec![0];
        data.efc_J = DMatrix::from_row_slice(1, 3, &[0.5, 0.0, -0.5]);
        (model, data)
    }

    #[test]
    fn test_tree_next_dense() {
        let (model, data) = dense_row_fixture();

        let mut cursor = 0;
        let t1 = tree_next(&model, &data, -1, 0, Some(&mut cursor));
        assert_eq!(t1, 0);
        assert_eq!(cursor, 1);

        let t2 = tree_next(&model, &data, t1, 0, Some(&mut cursor));
        assert_eq!(t2, 1);
        assert_eq!(cursor, 3);

        let t3 = tree_next(&model, &data, t2, 0, Some(&mut cursor));
        assert_eq!(t3, -1);

        // Without a cursor the scan starts at the row head.
        assert_eq!(tree_next(&model, &data, -1, 0, None), 0);
        assert_eq!(tree_next(&model, &data, 0, 0, None), 1);
    }

    #[test]
    fn test_tree_next_sparse() {
        let mut model = Model::tree_forest(&[1, 2]);
        model.jacobian = JacobianType::Sparse;
        let mut data = model.make_data();
        data.nefc = 1;
        data.efc_type = vec![ConstraintType::LimitTendon];
        data.efc_id = vec![0];
        data.efc_J_rownnz = vec![2];
        data.efc_J_rowadr = vec![0];
        data.efc_J_colind = vec![0, 2];

        let mut cursor = 0;
        assert_eq!(tree_next(&model, &data, -1, 0, Some(&mut cursor)), 0);
        assert_eq!(cursor, 1);
        assert_eq!(tree_next(&model, &data, 0, 0, Some(&mut cursor)), 1);
        assert_eq!(cursor, 2);
        assert_eq!(tree_next(&model, &data, 1, 0, Some(&mut cursor)), -1);
    }

    // ------------------------------------------------------------------
    // Edge collection over efc rows
    // ------------------------------------------------------------------

    #[test]
    fn test_find_edges_fast_paths_and_dedup() {
        let mut model = Model::tree_forest(&[2, 1]);
        model.jacobian = JacobianType::Dense;
        let mut data = model.make_data();

        // A condim-3 pyramidal contact between the two trees spans four
        // rows sharing (type, id): one emission.
        data.contacts.push(crate::types::Contact::new(1, 3));
        data.ncon = 1;
        data.nefc = 5;
        data.efc_type = vec![ConstraintType::ContactPyramidal; 4];
        data.efc_id = vec![0; 4];
        // A DOF friction row on tree 0.
        data.efc_type.push(ConstraintType::FrictionDof);
        data.efc_id.push(0);
        data.nf = 1;
        data.efc_J = DMatrix::zeros(5, 3);

        let mut treenedge = [0i32; 2];
        let mut edge = [0i32; 2 * 3];
        let nedge = find_edges(&model, &data, &mut treenedge, &mut edge, 3).unwrap();

        // Contact pair (both orientations) plus the friction self-edge.
        assert_eq!(nedge, 3);
        assert_eq!(&edge[..6], &[0, 1, 1, 0, 0, 0]);
        assert_eq!(treenedge, [2, 1]);
    }

    #[test]
    fn test_find_edges_generic_chain() {
        // A tendon limit row spanning both trees takes the generic path.
        let mut model = Model::tree_forest(&[1, 1]);
        model.jacobian = JacobianType::Dense;
        model.add_tendon(2, true, 0.0);
        let mut data = model.make_data();
        data.nefc = 1;
        data.efc_type = vec![ConstraintType::LimitTendon];
        data.efc_id = vec![0];
        data.efc_J = DMatrix::from_row_slice(1, 2, &[1.0, -1.0]);

        let mut treenedge = [0i32; 2];
        let mut edge = [0i32; 2 * 2];
        let nedge = find_edges(&model, &data, &mut treenedge, &mut edge, 2).unwrap();
        assert_eq!(nedge, 2);
        assert_eq!(&edge[..4], &[0, 1, 1, 0]);
    }

    // ------------------------------------------------------------------
    // Edge budget
    // ------------------------------------------------------------------

    #[test]
    fn test_count_max_edge() {
        let mut model = Model::tree_forest(&[1, 1]);
        model.add_tendon(2, true, 0.1); // limited and frictional: both terms
        model.add_tendon(3, false, 0.0); // neither
        let mut data = model.make_data();
        data.ncon = 2;
        data.ne = 1;
        data.nf = 3;

        // 2*2 + 2*1 + 3 + 2 + 2
        assert_eq!(count_max_edge(&model, &data), 13);
    }
}
