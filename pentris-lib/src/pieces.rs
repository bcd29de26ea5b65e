use crate::shape::Shape;

/// A named piece template in its spawn orientation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Template {
    pub name: &'static str,
    pub shape: Shape,
}

// Generated by build.rs from the ASCII tables there.
include!(concat!(env!("OUT_DIR"), "/pieces.rs"));

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum PieceSet {
    /// The twelve free pentominoes.
    #[default]
    Classic,
    /// Classic plus mirrored L, N, P, Y and F.
    Extended,
}

impl PieceSet {
    pub fn templates(self) -> &'static [Template] {
        match self {
            PieceSet::Classic => &TEMPLATES[..CLASSIC_LEN],
            PieceSet::Extended => &TEMPLATES[..EXTENDED_LEN],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceSet::Classic => "classic",
            PieceSet::Extended => "extended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_sizes() {
        assert_eq!(PieceSet::Classic.templates().len(), 12);
        assert_eq!(PieceSet::Extended.templates().len(), 17);
    }

    #[test]
    fn every_template_is_a_pentomino() {
        for t in PieceSet::Extended.templates() {
            assert_eq!(t.shape.cell_count(), 5, "{}", t.name);
        }
    }

    #[test]
    fn templates_are_distinct_shapes() {
        let all = PieceSet::Extended.templates();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                let mut turned = b.shape;
                for _ in 0..4 {
                    assert_ne!(a.shape, turned, "{} matches a turn of {}", a.name, b.name);
                    turned = turned.rotate();
                }
            }
        }
    }

    #[test]
    fn spawn_orientations() {
        let t = PieceSet::Classic.templates();
        assert_eq!(t[0].name, "I");
        assert_eq!(t[0].shape.str(), "#####\n");
        assert_eq!(t[11].name, "F");
        assert_eq!(t[11].shape.str(), ".##\n##.\n.#.\n");
        let p_mirror = PieceSet::Extended.templates()[14];
        assert_eq!(p_mirror.name, "P'");
        assert_eq!(p_mirror.shape.str(), "##\n##\n.#\n");
    }
}
