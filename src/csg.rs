// CSG (Constructive Solid Geometry) combinators
//
// Children are evaluated in order and merged with min/max, which keeps a set of
// 1-Lipschitz fields 1-Lipschitz:
// - union:        min over all children
// - difference:   first child minus the rest, max(d0, -d1, -d2, ...)
// - intersection: max over all children
//
// Every combinator holds at least one child; constructors reject empty lists.

use crate::{
    bounds::Aabb,
    error::{Result, SdfError},
    sdf::{Sdf, SignedDistance},
    types::{Point, Value},
};

fn non_empty(children: Vec<Sdf>) -> Result<Vec<Sdf>> {
    if children.is_empty() {
        return Err(SdfError::EmptyCombinator);
    }
    Ok(children)
}

/// Axis-wise union of every child's box.
fn merged_bounds(children: &[Sdf]) -> Aabb {
    children[1..]
        .iter()
        .fold(children[0].bounding_box(), |acc, child| {
            acc.extend(&child.bounding_box())
        })
}

/// Boolean union (logical OR) of all children.
#[derive(Debug, Clone)]
pub struct Union {
    pub(crate) children: Vec<Sdf>,
}

impl Union {
    pub fn new(children: Vec<Sdf>) -> Result<Self> {
        Ok(Self {
            children: non_empty(children)?,
        })
    }

    pub fn children(&self) -> &[Sdf] {
        &self.children
    }
}

impl SignedDistance for Union {
    fn evaluate(&self, p: &Point) -> Value {
        self.children
            .iter()
            .map(|child| child.evaluate(p))
            .fold(Value::INFINITY, Value::min)
    }

    fn bounding_box(&self) -> Aabb {
        merged_bounds(&self.children)
    }
}

/// The first child with every later child carved out of it.
#[derive(Debug, Clone)]
pub struct Difference {
    pub(crate) children: Vec<Sdf>,
}

impl Difference {
    pub fn new(children: Vec<Sdf>) -> Result<Self> {
        Ok(Self {
            children: non_empty(children)?,
        })
    }

    pub fn children(&self) -> &[Sdf] {
        &self.children
    }
}

impl SignedDistance for Difference {
    fn evaluate(&self, p: &Point) -> Value {
        self.children[1..]
            .iter()
            .fold(self.children[0].evaluate(p), |acc, child| {
                acc.max(-child.evaluate(p))
            })
    }

    /// The first child's box. Carving can only shrink the solid, so this is
    /// conservative but possibly loose.
    fn bounding_box(&self) -> Aabb {
        self.children[0].bounding_box()
    }
}

/// Boolean intersection (logical AND) of all children.
#[derive(Debug, Clone)]
pub struct Intersection {
    pub(crate) children: Vec<Sdf>,
}

impl Intersection {
    pub fn new(children: Vec<Sdf>) -> Result<Self> {
        Ok(Self {
            children: non_empty(children)?,
        })
    }

    pub fn children(&self) -> &[Sdf] {
        &self.children
    }
}

impl SignedDistance for Intersection {
    fn evaluate(&self, p: &Point) -> Value {
        self.children
            .iter()
            .map(|child| child.evaluate(p))
            .fold(Value::NEG_INFINITY, Value::max)
    }

    /// The union of the children's boxes: wider than the true overlap, never narrower.
    fn bounding_box(&self) -> Aabb {
        merged_bounds(&self.children)
    }
}
