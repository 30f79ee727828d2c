// Gaussian quadrature coefficients for the inversion contour.
//
// For a degree n rule, the nodes are the positive eigenvalues (as 1/s) of the
// n x n Legendre-basis matrix of the periodic integration operator at
// v = pi, shifted left by pi; the weights are the squared first eigenvector
// components scaled by lambda^2 / 4. Only the nonnegative half of the
// symmetric rule is stored, since the inversion sums real parts.
//
// The literals are the published Den Iseger tables as printed, 15 significant
// digits, including the rounding residue on the first node.

use std::fmt;

use crate::InversionError;

/// One quadrature weight (`alpha`) and node (`lambda`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraturePair {
    pub alpha: f64,
    pub lambda: f64,
}

impl QuadraturePair {
    pub const fn new(alpha: f64, lambda: f64) -> Self {
        Self { alpha, lambda }
    }
}

/// Supported quadrature degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuadratureDegree {
    #[default]
    Sixteen,
    ThirtyTwo,
    FortyEight,
}

impl QuadratureDegree {
    pub const ALL: [QuadratureDegree; 3] = [
        QuadratureDegree::Sixteen,
        QuadratureDegree::ThirtyTwo,
        QuadratureDegree::FortyEight,
    ];

    /// Number of nodes in the full rule.
    pub fn nodes(self) -> usize {
        match self {
            QuadratureDegree::Sixteen => 16,
            QuadratureDegree::ThirtyTwo => 32,
            QuadratureDegree::FortyEight => 48,
        }
    }

    /// The `nodes() / 2` stored coefficient pairs, in ascending node order.
    pub fn pairs(self) -> &'static [QuadraturePair] {
        match self {
            QuadratureDegree::Sixteen => &DEGREE_16,
            QuadratureDegree::ThirtyTwo => &DEGREE_32,
            QuadratureDegree::FortyEight => &DEGREE_48,
        }
    }
}

impl TryFrom<usize> for QuadratureDegree {
    type Error = InversionError;

    fn try_from(nodes: usize) -> Result<Self, Self::Error> {
        QuadratureDegree::ALL
            .into_iter()
            .find(|degree| degree.nodes() == nodes)
            .ok_or(InversionError::UnsupportedDegree(nodes))
    }
}

impl fmt::Display for QuadratureDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nodes())
    }
}

static DEGREE_16: [QuadraturePair; 8] = [
    QuadraturePair::new(1.00000000000000, 4.44089209850063e-16),
    QuadraturePair::new(1.00000000000004, 6.28318530717958),
    QuadraturePair::new(1.00000015116847, 12.5663706962589),
    QuadraturePair::new(1.00081841700481, 18.8502914166954),
    QuadraturePair::new(1.09580332705189, 25.2872172156717),
    QuadraturePair::new(2.00687652338724, 34.2969716635260),
    QuadraturePair::new(5.94277512934943, 56.1725527716607),
    QuadraturePair::new(54.9537264520382, 170.533131190126),
];

static DEGREE_32: [QuadraturePair; 16] = [
    QuadraturePair::new(1.00000000000000, 4.44089209850063e-16),
    QuadraturePair::new(1.00000000000000, 6.28318530717958),
    QuadraturePair::new(1.00000000000000, 12.5663706143592),
    QuadraturePair::new(1.00000000000000, 18.8495559215388),
    QuadraturePair::new(1.00000000000000, 25.1327412287183),
    QuadraturePair::new(1.00000000000895, 31.4159265359036),
    QuadraturePair::new(1.00000004815464, 37.6991118820067),
    QuadraturePair::new(1.00003440685546, 43.9823334683971),
    QuadraturePair::new(1.00420404867307, 50.2716029125234),
    QuadraturePair::new(1.09319461846682, 56.7584358919043),
    QuadraturePair::new(1.51528642466057, 64.7269529917883),
    QuadraturePair::new(2.41320766467140, 76.7783110023797),
    QuadraturePair::new(4.16688127092229, 96.7780294888711),
    QuadraturePair::new(8.37770013129612, 133.997553190014),
    QuadraturePair::new(23.6054680083019, 222.527562038705),
    QuadraturePair::new(213.824023377989, 669.650134867714),
];

static DEGREE_48: [QuadraturePair; 24] = [
    QuadraturePair::new(1.00000000000000, 4.44089209850063e-16),
    QuadraturePair::new(1.00000000000000, 6.28318530717958),
    QuadraturePair::new(1.00000000000000, 12.5663706143592),
    QuadraturePair::new(1.00000000000000, 18.8495559215388),
    QuadraturePair::new(1.00000000000000, 25.1327412287183),
    QuadraturePair::new(1.00000000000000, 31.4159265358979),
    QuadraturePair::new(1.00000000000000, 37.6991118430775),
    QuadraturePair::new(1.00000000000000, 43.9822971502571),
    QuadraturePair::new(1.00000000000000, 50.2654824574367),
    QuadraturePair::new(1.00000000000234, 56.5486677646181),
    QuadraturePair::new(1.00000000319554, 62.8318530747627),
    QuadraturePair::new(1.00000128757817, 69.1150398188908),
    QuadraturePair::new(1.00016604436874, 75.3984537709689),
    QuadraturePair::new(1.00682731991923, 81.6938697567735),
    QuadraturePair::new(1.08409730759702, 88.1889420301505),
    QuadraturePair::new(1.36319173228678, 95.7546784637379),
    QuadraturePair::new(1.85773538601498, 105.767553649199),
    QuadraturePair::new(2.59022367414075, 119.587519367740),
    QuadraturePair::new(3.73141804564274, 139.158762677521),
    QuadraturePair::new(5.69232680539143, 168.156165377339),
    QuadraturePair::new(9.54600616545655, 214.521886792255),
    QuadraturePair::new(18.8912132110257, 298.972429369901),
    QuadraturePair::new(52.7884611477406, 497.542914576338),
    QuadraturePair::new(476.448331869639, 1494.71066227686),
];
