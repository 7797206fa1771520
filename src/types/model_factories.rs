//! Factory methods for canonical test systems.
//!
//! These constructors produce pre-configured [`Model`] instances for the
//! multi-tree systems the island tests exercise. Real models come from the
//! model compiler; the factories only fill the tables island discovery
//! reads.

use super::enums::{EqualityType, JacobianType};
use super::model::Model;

impl Model {
    /// Create an empty model (no bodies, no trees, no constraints).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            nv: 0,
            nbody: 1,
            njnt: 0,
            ngeom: 0,
            ntree: 0,
            neq: 0,
            ntendon: 0,
            narena: 0,
            body_treeid: vec![-1],
            dof_treeid: Vec::new(),
            jnt_dof_adr: Vec::new(),
            geom_body: Vec::new(),
            eq_type: Vec::new(),
            eq_obj1id: Vec::new(),
            eq_obj2id: Vec::new(),
            tendon_num: Vec::new(),
            tendon_limited: Vec::new(),
            tendon_frictionloss: Vec::new(),
            jacobian: JacobianType::default(),
            disableflags: 0,
        }
    }

    /// Create a forest of independent kinematic trees.
    ///
    /// Tree `t` gets one body (`body_id = t + 1`) carrying `tree_ndof[t]`
    /// DOFs behind a single joint, plus two geoms. Geom 0 belongs to the
    /// world body, so contacts against the static tree can be formed.
    ///
    /// Layout, for `tree_forest(&[2, 3])`:
    /// - bodies: world, tree 0, tree 1
    /// - DOFs 0..2 on tree 0, DOFs 2..5 on tree 1
    /// - geoms: 0 on world, 1 and 2 on tree 0, 3 and 4 on tree 1
    ///
    /// No equalities or tendons; tests push those onto the returned model.
    ///
    /// # Panics
    /// Panics if any tree has zero DOFs.
    #[must_use]
    pub fn tree_forest(tree_ndof: &[usize]) -> Self {
        let ntree = tree_ndof.len();
        let mut model = Self::empty();

        model.ntree = ntree;
        model.nbody = 1 + ntree;
        model.njnt = ntree;
        model.ngeom = 1 + 2 * ntree;
        model.geom_body.push(0); // geom 0 on the world body

        for (t, &ndof) in tree_ndof.iter().enumerate() {
            assert!(ndof >= 1, "tree_forest requires at least 1 DOF per tree");
            let tree = t as i32;

            model.body_treeid.push(tree);
            model.jnt_dof_adr.push(model.nv);
            for _ in 0..ndof {
                model.dof_treeid.push(tree);
            }
            model.nv += ndof;

            // Two geoms per tree body.
            model.geom_body.push(t + 1);
            model.geom_body.push(t + 1);
        }

        // Ample workspace for the island pass over systems of this size.
        model.narena = 256 + 32 * (model.nv + ntree);

        model
    }

    /// Append a connect or weld equality between two bodies.
    /// For the other subtypes `obj1`/`obj2` follow the `eq_obj1id`
    /// conventions (joint, tendon, or geom IDs).
    pub fn add_equality(&mut self, eq_type: EqualityType, obj1: usize, obj2: usize) {
        self.eq_type.push(eq_type);
        self.eq_obj1id.push(obj1);
        self.eq_obj2id.push(obj2);
        self.neq += 1;
    }

    /// Append a tendon with `num` path DOFs.
    pub fn add_tendon(&mut self, num: usize, limited: bool, frictionloss: f64) {
        self.tendon_num.push(num);
        self.tendon_limited.push(limited);
        self.tendon_frictionloss.push(frictionloss);
        self.ntendon += 1;
    }
}
