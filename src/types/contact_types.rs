//! Contact record consumed by island discovery.

/// Active contact between two geoms (like mjContact, reduced to the fields
/// the island pass reads).
///
/// The contact's constraint rows are tagged `ContactFrictionless`,
/// `ContactPyramidal`, or `ContactElliptic` in `efc_type`, with `efc_id`
/// giving the index into `Data::contacts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// First geom index.
    pub geom1: usize,
    /// Second geom index.
    pub geom2: usize,
}

impl Contact {
    /// Contact between two geoms.
    #[must_use]
    pub const fn new(geom1: usize, geom2: usize) -> Self {
        Self { geom1, geom2 }
    }
}
