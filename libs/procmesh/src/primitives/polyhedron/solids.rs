//! Vertex and face tables for the named solids.
//!
//! Every table is centered on its vertex centroid and scaled to unit
//! circumradius. Faces are counter-clockwise vertex loops seen from
//! outside, each starting at its lowest vertex index.
//!
//! ## Face order
//!
//! Faces are listed from top to bottom by the `y` of their outward normal.
//! Faces at the same height follow the normal's azimuth counter-clockwise
//! seen from `+Y`, starting at `+X`. `face_uv` and `face_colors` entries
//! index this order.

use super::PolyhedronKind;
use glam::Vec3;

/// Vertex and face table of one solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidTable {
    /// Unit-circumradius vertices
    pub vertices: &'static [Vec3],
    /// Faces as counter-clockwise vertex loops
    pub faces: &'static [&'static [usize]],
}

/// Returns the table of a named solid.
pub fn table(kind: PolyhedronKind) -> &'static SolidTable {
    match kind {
        PolyhedronKind::Tetrahedron => &TETRAHEDRON,
        PolyhedronKind::Octahedron => &OCTAHEDRON,
        PolyhedronKind::Dodecahedron => &DODECAHEDRON,
        PolyhedronKind::Icosahedron => &ICOSAHEDRON,
        PolyhedronKind::Rhombicuboctahedron => &RHOMBICUBOCTAHEDRON,
        PolyhedronKind::TriangularPrism => &TRIANGULAR_PRISM,
        PolyhedronKind::PentagonalPrism => &PENTAGONAL_PRISM,
        PolyhedronKind::HexagonalPrism => &HEXAGONAL_PRISM,
        PolyhedronKind::SquarePyramid => &SQUARE_PYRAMID,
        PolyhedronKind::PentagonalPyramid => &PENTAGONAL_PYRAMID,
        PolyhedronKind::TriangularDipyramid => &TRIANGULAR_DIPYRAMID,
        PolyhedronKind::PentagonalDipyramid => &PENTAGONAL_DIPYRAMID,
        PolyhedronKind::ElongatedSquareDipyramid => &ELONGATED_SQUARE_DIPYRAMID,
        PolyhedronKind::ElongatedPentagonalDipyramid => &ELONGATED_PENTAGONAL_DIPYRAMID,
        PolyhedronKind::ElongatedPentagonalCupola => &ELONGATED_PENTAGONAL_CUPOLA,
    }
}

static TETRAHEDRON: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.5773503, 0.5773503, 0.5773503),
        Vec3::new(0.5773503, -0.5773503, -0.5773503),
        Vec3::new(-0.5773503, 0.5773503, -0.5773503),
        Vec3::new(-0.5773503, -0.5773503, 0.5773503),
    ],
    faces: &[
        &[0, 1, 2],
        &[0, 2, 3],
        &[1, 3, 2],
        &[0, 3, 1],
    ],
};

static OCTAHEDRON: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(1.0000000, 0.0000000, 0.0000000),
        Vec3::new(-1.0000000, 0.0000000, 0.0000000),
        Vec3::new(0.0000000, 1.0000000, 0.0000000),
        Vec3::new(0.0000000, -1.0000000, 0.0000000),
        Vec3::new(0.0000000, 0.0000000, 1.0000000),
        Vec3::new(0.0000000, 0.0000000, -1.0000000),
    ],
    faces: &[
        &[0, 5, 2],
        &[1, 2, 5],
        &[1, 4, 2],
        &[0, 2, 4],
        &[0, 3, 5],
        &[1, 5, 3],
        &[1, 3, 4],
        &[0, 4, 3],
    ],
};

static DODECAHEDRON: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(-0.5773503, -0.5773503, -0.5773503),
        Vec3::new(-0.5773503, -0.5773503, 0.5773503),
        Vec3::new(-0.5773503, 0.5773503, -0.5773503),
        Vec3::new(-0.5773503, 0.5773503, 0.5773503),
        Vec3::new(0.5773503, -0.5773503, -0.5773503),
        Vec3::new(0.5773503, -0.5773503, 0.5773503),
        Vec3::new(0.5773503, 0.5773503, -0.5773503),
        Vec3::new(0.5773503, 0.5773503, 0.5773503),
        Vec3::new(0.0000000, -0.3568221, -0.9341724),
        Vec3::new(-0.3568221, -0.9341724, 0.0000000),
        Vec3::new(-0.9341724, 0.0000000, -0.3568221),
        Vec3::new(0.0000000, -0.3568221, 0.9341724),
        Vec3::new(-0.3568221, 0.9341724, 0.0000000),
        Vec3::new(-0.9341724, 0.0000000, 0.3568221),
        Vec3::new(0.0000000, 0.3568221, -0.9341724),
        Vec3::new(0.3568221, -0.9341724, 0.0000000),
        Vec3::new(0.9341724, 0.0000000, -0.3568221),
        Vec3::new(0.0000000, 0.3568221, 0.9341724),
        Vec3::new(0.3568221, 0.9341724, 0.0000000),
        Vec3::new(0.9341724, 0.0000000, 0.3568221),
    ],
    faces: &[
        &[2, 12, 18, 6, 14],
        &[3, 17, 7, 18, 12],
        &[6, 18, 7, 19, 16],
        &[2, 10, 13, 3, 12],
        &[4, 8, 14, 6, 16],
        &[0, 10, 2, 14, 8],
        &[1, 11, 17, 3, 13],
        &[5, 19, 7, 17, 11],
        &[4, 16, 19, 5, 15],
        &[0, 9, 1, 13, 10],
        &[0, 8, 4, 15, 9],
        &[1, 9, 15, 5, 11],
    ],
};

static ICOSAHEDRON: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.0000000, -0.5257311, -0.8506508),
        Vec3::new(-0.5257311, -0.8506508, 0.0000000),
        Vec3::new(-0.8506508, 0.0000000, -0.5257311),
        Vec3::new(0.0000000, -0.5257311, 0.8506508),
        Vec3::new(-0.5257311, 0.8506508, 0.0000000),
        Vec3::new(0.8506508, 0.0000000, -0.5257311),
        Vec3::new(0.0000000, 0.5257311, -0.8506508),
        Vec3::new(0.5257311, -0.8506508, 0.0000000),
        Vec3::new(-0.8506508, 0.0000000, 0.5257311),
        Vec3::new(0.0000000, 0.5257311, 0.8506508),
        Vec3::new(0.5257311, 0.8506508, 0.0000000),
        Vec3::new(0.8506508, 0.0000000, 0.5257311),
    ],
    faces: &[
        &[4, 10, 6],
        &[4, 9, 10],
        &[5, 6, 10],
        &[2, 4, 6],
        &[4, 8, 9],
        &[9, 11, 10],
        &[5, 10, 11],
        &[2, 8, 4],
        &[0, 6, 5],
        &[0, 2, 6],
        &[3, 9, 8],
        &[3, 11, 9],
        &[5, 11, 7],
        &[1, 8, 2],
        &[0, 5, 7],
        &[0, 1, 2],
        &[1, 3, 8],
        &[3, 7, 11],
        &[0, 7, 1],
        &[1, 7, 3],
    ],
};

static RHOMBICUBOCTAHEDRON: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(-0.3574067, -0.3574067, -0.8628562),
        Vec3::new(-0.3574067, -0.8628562, -0.3574067),
        Vec3::new(-0.8628562, -0.3574067, -0.3574067),
        Vec3::new(-0.3574067, -0.3574067, 0.8628562),
        Vec3::new(-0.3574067, 0.8628562, -0.3574067),
        Vec3::new(0.8628562, -0.3574067, -0.3574067),
        Vec3::new(-0.3574067, 0.3574067, -0.8628562),
        Vec3::new(-0.3574067, -0.8628562, 0.3574067),
        Vec3::new(-0.8628562, -0.3574067, 0.3574067),
        Vec3::new(-0.3574067, 0.3574067, 0.8628562),
        Vec3::new(-0.3574067, 0.8628562, 0.3574067),
        Vec3::new(0.8628562, -0.3574067, 0.3574067),
        Vec3::new(0.3574067, -0.3574067, -0.8628562),
        Vec3::new(0.3574067, -0.8628562, -0.3574067),
        Vec3::new(-0.8628562, 0.3574067, -0.3574067),
        Vec3::new(0.3574067, -0.3574067, 0.8628562),
        Vec3::new(0.3574067, 0.8628562, -0.3574067),
        Vec3::new(0.8628562, 0.3574067, -0.3574067),
        Vec3::new(0.3574067, 0.3574067, -0.8628562),
        Vec3::new(0.3574067, -0.8628562, 0.3574067),
        Vec3::new(-0.8628562, 0.3574067, 0.3574067),
        Vec3::new(0.3574067, 0.3574067, 0.8628562),
        Vec3::new(0.3574067, 0.8628562, 0.3574067),
        Vec3::new(0.8628562, 0.3574067, 0.3574067),
    ],
    faces: &[
        &[4, 10, 22, 16],
        &[16, 22, 23, 17],
        &[4, 16, 18, 6],
        &[4, 14, 20, 10],
        &[9, 21, 22, 10],
        &[16, 17, 18],
        &[4, 6, 14],
        &[9, 10, 20],
        &[21, 23, 22],
        &[5, 17, 23, 11],
        &[5, 12, 18, 17],
        &[0, 6, 18, 12],
        &[0, 2, 14, 6],
        &[2, 8, 20, 14],
        &[3, 9, 20, 8],
        &[3, 15, 21, 9],
        &[11, 23, 21, 15],
        &[5, 13, 12],
        &[0, 1, 2],
        &[3, 8, 7],
        &[11, 15, 19],
        &[5, 11, 19, 13],
        &[0, 12, 13, 1],
        &[1, 7, 8, 2],
        &[3, 7, 19, 15],
        &[1, 13, 19, 7],
    ],
};

static TRIANGULAR_PRISM: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.7559289, 0.6546537, 0.0000000),
        Vec3::new(-0.3779645, 0.6546537, -0.6546537),
        Vec3::new(-0.3779645, 0.6546537, 0.6546537),
        Vec3::new(0.7559289, -0.6546537, 0.0000000),
        Vec3::new(-0.3779645, -0.6546537, -0.6546537),
        Vec3::new(-0.3779645, -0.6546537, 0.6546537),
    ],
    faces: &[
        &[0, 1, 2],
        &[0, 3, 4, 1],
        &[1, 4, 5, 2],
        &[0, 2, 5, 3],
        &[3, 5, 4],
    ],
};

static PENTAGONAL_PRISM: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.8621037, 0.5067319, 0.0000000),
        Vec3::new(0.2664047, 0.5067319, -0.8199094),
        Vec3::new(-0.6974566, 0.5067319, -0.5067319),
        Vec3::new(-0.6974566, 0.5067319, 0.5067319),
        Vec3::new(0.2664047, 0.5067319, 0.8199094),
        Vec3::new(0.8621037, -0.5067319, 0.0000000),
        Vec3::new(0.2664047, -0.5067319, -0.8199094),
        Vec3::new(-0.6974566, -0.5067319, -0.5067319),
        Vec3::new(-0.6974566, -0.5067319, 0.5067319),
        Vec3::new(0.2664047, -0.5067319, 0.8199094),
    ],
    faces: &[
        &[0, 1, 2, 3, 4],
        &[0, 5, 6, 1],
        &[1, 6, 7, 2],
        &[2, 7, 8, 3],
        &[3, 8, 9, 4],
        &[0, 4, 9, 5],
        &[5, 9, 8, 7, 6],
    ],
};

static HEXAGONAL_PRISM: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.8944272, 0.4472136, 0.0000000),
        Vec3::new(0.4472136, 0.4472136, -0.7745967),
        Vec3::new(-0.4472136, 0.4472136, -0.7745967),
        Vec3::new(-0.8944272, 0.4472136, 0.0000000),
        Vec3::new(-0.4472136, 0.4472136, 0.7745967),
        Vec3::new(0.4472136, 0.4472136, 0.7745967),
        Vec3::new(0.8944272, -0.4472136, 0.0000000),
        Vec3::new(0.4472136, -0.4472136, -0.7745967),
        Vec3::new(-0.4472136, -0.4472136, -0.7745967),
        Vec3::new(-0.8944272, -0.4472136, 0.0000000),
        Vec3::new(-0.4472136, -0.4472136, 0.7745967),
        Vec3::new(0.4472136, -0.4472136, 0.7745967),
    ],
    faces: &[
        &[0, 1, 2, 3, 4, 5],
        &[0, 6, 7, 1],
        &[1, 7, 8, 2],
        &[2, 8, 9, 3],
        &[3, 9, 10, 4],
        &[4, 10, 11, 5],
        &[0, 5, 11, 6],
        &[6, 11, 10, 9, 8, 7],
    ],
};

static SQUARE_PYRAMID: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.6933752, -0.1961161, -0.6933752),
        Vec3::new(-0.6933752, -0.1961161, -0.6933752),
        Vec3::new(-0.6933752, -0.1961161, 0.6933752),
        Vec3::new(0.6933752, -0.1961161, 0.6933752),
        Vec3::new(0.0000000, 0.7844645, 0.0000000),
    ],
    faces: &[
        &[0, 4, 3],
        &[0, 1, 4],
        &[1, 2, 4],
        &[2, 3, 4],
        &[0, 3, 2, 1],
    ],
};

static PENTAGONAL_PYRAMID: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.9947368, -0.1024635, 0.0000000),
        Vec3::new(0.3073906, -0.1024635, -0.9460509),
        Vec3::new(-0.8047589, -0.1024635, -0.5846916),
        Vec3::new(-0.8047589, -0.1024635, 0.5846916),
        Vec3::new(0.3073906, -0.1024635, 0.9460509),
        Vec3::new(0.0000000, 0.5123176, 0.0000000),
    ],
    faces: &[
        &[0, 1, 5],
        &[1, 2, 5],
        &[2, 3, 5],
        &[3, 4, 5],
        &[0, 5, 4],
        &[0, 4, 3, 2, 1],
    ],
};

static TRIANGULAR_DIPYRAMID: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.7071068, 0.0000000, 0.0000000),
        Vec3::new(-0.3535534, 0.0000000, -0.6123724),
        Vec3::new(-0.3535534, 0.0000000, 0.6123724),
        Vec3::new(0.0000000, 1.0000000, 0.0000000),
        Vec3::new(0.0000000, -1.0000000, 0.0000000),
    ],
    faces: &[
        &[0, 1, 3],
        &[1, 2, 3],
        &[0, 3, 2],
        &[0, 4, 1],
        &[1, 4, 2],
        &[0, 2, 4],
    ],
};

static PENTAGONAL_DIPYRAMID: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(1.0000000, 0.0000000, 0.0000000),
        Vec3::new(0.3090170, 0.0000000, -0.9510565),
        Vec3::new(-0.8090170, 0.0000000, -0.5877853),
        Vec3::new(-0.8090170, 0.0000000, 0.5877853),
        Vec3::new(0.3090170, 0.0000000, 0.9510565),
        Vec3::new(0.0000000, 0.6180340, 0.0000000),
        Vec3::new(0.0000000, -0.6180340, 0.0000000),
    ],
    faces: &[
        &[0, 1, 5],
        &[1, 2, 5],
        &[2, 3, 5],
        &[3, 4, 5],
        &[0, 5, 4],
        &[0, 6, 1],
        &[1, 6, 2],
        &[2, 6, 3],
        &[3, 6, 4],
        &[0, 4, 6],
    ],
};

static ELONGATED_SQUARE_DIPYRAMID: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.4142136, 0.4142136, -0.4142136),
        Vec3::new(-0.4142136, 0.4142136, -0.4142136),
        Vec3::new(-0.4142136, 0.4142136, 0.4142136),
        Vec3::new(0.4142136, 0.4142136, 0.4142136),
        Vec3::new(0.4142136, -0.4142136, -0.4142136),
        Vec3::new(-0.4142136, -0.4142136, -0.4142136),
        Vec3::new(-0.4142136, -0.4142136, 0.4142136),
        Vec3::new(0.4142136, -0.4142136, 0.4142136),
        Vec3::new(0.0000000, 1.0000000, 0.0000000),
        Vec3::new(0.0000000, -1.0000000, 0.0000000),
    ],
    faces: &[
        &[0, 8, 3],
        &[0, 1, 8],
        &[1, 2, 8],
        &[2, 3, 8],
        &[0, 3, 7, 4],
        &[0, 4, 5, 1],
        &[1, 5, 6, 2],
        &[2, 6, 7, 3],
        &[4, 7, 9],
        &[4, 9, 5],
        &[5, 9, 6],
        &[6, 9, 7],
    ],
};

static ELONGATED_PENTAGONAL_DIPYRAMID: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.8293117, 0.4874572, 0.0000000),
        Vec3::new(0.2562714, 0.4874572, -0.7887223),
        Vec3::new(-0.6709273, 0.4874572, -0.4874572),
        Vec3::new(-0.6709273, 0.4874572, 0.4874572),
        Vec3::new(0.2562714, 0.4874572, 0.7887223),
        Vec3::new(0.8293117, -0.4874572, 0.0000000),
        Vec3::new(0.2562714, -0.4874572, -0.7887223),
        Vec3::new(-0.6709273, -0.4874572, -0.4874572),
        Vec3::new(-0.6709273, -0.4874572, 0.4874572),
        Vec3::new(0.2562714, -0.4874572, 0.7887223),
        Vec3::new(0.0000000, 1.0000000, 0.0000000),
        Vec3::new(0.0000000, -1.0000000, 0.0000000),
    ],
    faces: &[
        &[0, 1, 10],
        &[1, 2, 10],
        &[2, 3, 10],
        &[3, 4, 10],
        &[0, 10, 4],
        &[0, 5, 6, 1],
        &[1, 6, 7, 2],
        &[2, 7, 8, 3],
        &[3, 8, 9, 4],
        &[0, 4, 9, 5],
        &[5, 11, 6],
        &[6, 11, 7],
        &[7, 11, 8],
        &[8, 11, 9],
        &[5, 9, 11],
    ],
};

static ELONGATED_PENTAGONAL_CUPOLA: SolidTable = SolidTable {
    vertices: &[
        Vec3::new(0.9167272, 0.1670549, 0.0000000),
        Vec3::new(0.7416479, 0.1670549, -0.5388387),
        Vec3::new(0.2832843, 0.1670549, -0.8718594),
        Vec3::new(-0.2832843, 0.1670549, -0.8718594),
        Vec3::new(-0.7416479, 0.1670549, -0.5388387),
        Vec3::new(-0.9167272, 0.1670549, 0.0000000),
        Vec3::new(-0.7416479, 0.1670549, 0.5388387),
        Vec3::new(-0.2832843, 0.1670549, 0.8718594),
        Vec3::new(0.2832843, 0.1670549, 0.8718594),
        Vec3::new(0.7416479, 0.1670549, 0.5388387),
        Vec3::new(0.9167272, -0.3995137, 0.0000000),
        Vec3::new(0.7416479, -0.3995137, -0.5388387),
        Vec3::new(0.2832843, -0.3995137, -0.8718594),
        Vec3::new(-0.2832843, -0.3995137, -0.8718594),
        Vec3::new(-0.7416479, -0.3995137, -0.5388387),
        Vec3::new(-0.9167272, -0.3995137, 0.0000000),
        Vec3::new(-0.7416479, -0.3995137, 0.5388387),
        Vec3::new(-0.2832843, -0.3995137, 0.8718594),
        Vec3::new(0.2832843, -0.3995137, 0.8718594),
        Vec3::new(0.7416479, -0.3995137, 0.5388387),
        Vec3::new(0.4583636, 0.4649176, -0.1489314),
        Vec3::new(0.0000000, 0.4649176, -0.4819520),
        Vec3::new(-0.4583636, 0.4649176, -0.1489314),
        Vec3::new(-0.2832843, 0.4649176, 0.3899074),
        Vec3::new(0.2832843, 0.4649176, 0.3899074),
    ],
    faces: &[
        &[20, 21, 22, 23, 24],
        &[1, 2, 21, 20],
        &[3, 4, 22, 21],
        &[5, 6, 23, 22],
        &[7, 8, 24, 23],
        &[0, 20, 24, 9],
        &[0, 1, 20],
        &[2, 3, 21],
        &[4, 5, 22],
        &[6, 7, 23],
        &[8, 9, 24],
        &[0, 10, 11, 1],
        &[1, 11, 12, 2],
        &[2, 12, 13, 3],
        &[3, 13, 14, 4],
        &[4, 14, 15, 5],
        &[5, 15, 16, 6],
        &[6, 16, 17, 7],
        &[7, 17, 18, 8],
        &[8, 18, 19, 9],
        &[0, 9, 19, 10],
        &[10, 19, 18, 17, 16, 15, 14, 13, 12, 11],
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::TAU;

    fn euler(table: &SolidTable) -> i64 {
        let edges: usize = table.faces.iter().map(|f| f.len()).sum::<usize>() / 2;
        table.vertices.len() as i64 - edges as i64 + table.faces.len() as i64
    }

    fn face_normal(table: &SolidTable, face: &[usize]) -> Vec3 {
        let a = table.vertices[face[0]];
        let b = table.vertices[face[1]];
        let c = table.vertices[face[2]];
        (b - a).cross(c - a).normalize()
    }

    #[test]
    fn test_face_counts() {
        let expected = [
            (PolyhedronKind::Tetrahedron, 4, 4),
            (PolyhedronKind::Octahedron, 6, 8),
            (PolyhedronKind::Dodecahedron, 20, 12),
            (PolyhedronKind::Icosahedron, 12, 20),
            (PolyhedronKind::Rhombicuboctahedron, 24, 26),
            (PolyhedronKind::TriangularPrism, 6, 5),
            (PolyhedronKind::PentagonalPrism, 10, 7),
            (PolyhedronKind::HexagonalPrism, 12, 8),
            (PolyhedronKind::SquarePyramid, 5, 5),
            (PolyhedronKind::PentagonalPyramid, 6, 6),
            (PolyhedronKind::TriangularDipyramid, 5, 6),
            (PolyhedronKind::PentagonalDipyramid, 7, 10),
            (PolyhedronKind::ElongatedSquareDipyramid, 10, 12),
            (PolyhedronKind::ElongatedPentagonalDipyramid, 12, 15),
            (PolyhedronKind::ElongatedPentagonalCupola, 25, 22),
        ];
        for (kind, vertices, faces) in expected {
            let table = table(kind);
            assert_eq!(table.vertices.len(), vertices, "{:?}", kind);
            assert_eq!(table.faces.len(), faces, "{:?}", kind);
            assert_eq!(euler(table), 2, "{:?}", kind);
        }
    }

    #[test]
    fn test_unit_circumradius() {
        for &kind in PolyhedronKind::ALL.iter() {
            let max = table(kind)
                .vertices
                .iter()
                .map(|v| v.length())
                .fold(0.0_f32, f32::max);
            assert_relative_eq!(max, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_faces_are_planar_and_supporting() {
        for &kind in PolyhedronKind::ALL.iter() {
            let table = table(kind);
            for face in table.faces {
                let normal = face_normal(table, face);
                let offset = normal.dot(table.vertices[face[0]]);
                assert!(offset > 0.0, "{:?} face winds inward", kind);
                for &i in face.iter() {
                    assert_relative_eq!(normal.dot(table.vertices[i]), offset, epsilon = 1e-4);
                }
                assert!(
                    table.vertices.iter().all(|v| normal.dot(*v) <= offset + 1e-4),
                    "{:?} face is not on the hull",
                    kind
                );
            }
        }
    }

    #[test]
    fn test_face_order_top_to_bottom_then_around() {
        for &kind in PolyhedronKind::ALL.iter() {
            let table = table(kind);
            let keys: Vec<(f32, f32)> = table
                .faces
                .iter()
                .map(|face| {
                    let n = face_normal(table, face);
                    let horizontal = n.x.abs() > 1e-4 || n.z.abs() > 1e-4;
                    let mut azimuth = if horizontal { (-n.z).atan2(n.x) } else { 0.0 };
                    if azimuth < -1e-4 {
                        azimuth += TAU;
                    }
                    (n.y, azimuth)
                })
                .collect();
            for pair in keys.windows(2) {
                let ((y0, a0), (y1, a1)) = (pair[0], pair[1]);
                assert!(y0 >= y1 - 1e-4, "{:?} faces out of height order", kind);
                if (y0 - y1).abs() < 1e-4 {
                    assert!(a0 < a1, "{:?} faces out of azimuth order", kind);
                }
            }
        }
    }

    #[test]
    fn test_cupola_face_order() {
        let table = table(PolyhedronKind::ElongatedPentagonalCupola);
        assert_eq!(table.faces[0].len(), 5);
        assert_relative_eq!(face_normal(table, table.faces[0]).y, 1.0, epsilon = 1e-5);
        let last = table.faces[table.faces.len() - 1];
        assert_eq!(last.len(), 10);
        assert_relative_eq!(face_normal(table, last).y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cupola_has_unit_edges() {
        // Every face edge of the unit-edge cupola has the same length.
        let table = table(PolyhedronKind::ElongatedPentagonalCupola);
        let mut lengths = Vec::new();
        for face in table.faces {
            for k in 0..face.len() {
                let a = table.vertices[face[k]];
                let b = table.vertices[face[(k + 1) % face.len()]];
                lengths.push(a.distance(b));
            }
        }
        let first = lengths[0];
        for length in lengths {
            assert_relative_eq!(length, first, epsilon = 1e-3);
        }
    }
}
