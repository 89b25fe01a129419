//! Node arena for partially built expressions.
//!
//! Nodes are append-only while a top-level expression is under construction and
//! refer to their children by `NodeId`. Once the expression is attached to its
//! owner it is moved out as an owned `Expression` tree and the arena is reset.

use std::collections::BTreeMap;

use mdlfmt_core::{ArrayExpr, Call, Expression, TypeRef, Value};

use super::error::{BuildError, BuildResult};
use crate::check::Shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What produced a call node. Decides which end-event may close it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallOrigin {
    Function,
    Structure,
    Annotation,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Constants and references, complete on arrival.
    Leaf(Expression),
    /// `call.arguments` stays empty until the tree is taken.
    Call {
        call: Call,
        origin: CallOrigin,
        arguments: BTreeMap<usize, NodeId>,
    },
    Array {
        element: TypeRef,
        declared: usize,
        elements: Vec<NodeId>,
    },
    Vector {
        declared: usize,
        components: Vec<f32>,
    },
    Matrix {
        columns: usize,
        rows: usize,
        values: Vec<Vec<f32>>,
    },
    /// Moved into a finished tree.
    Taken,
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Leaf(Expression::Constant(value)) => value.kind_name(),
            Node::Leaf(Expression::Parameter(_)) => "parameter reference",
            Node::Leaf(Expression::Temporary(_)) => "temporary reference",
            Node::Leaf(_) => "expression",
            Node::Call {
                origin: CallOrigin::Annotation,
                ..
            } => "annotation",
            Node::Call {
                origin: CallOrigin::Structure,
                ..
            } => "structure",
            Node::Call { .. } => "call",
            Node::Array { .. } => "array",
            Node::Vector { .. } => "vector",
            Node::Matrix { .. } => "matrix",
            Node::Taken => "moved node",
        }
    }

    /// Display name of the construct, for slot errors.
    pub fn owner_name(&self) -> String {
        match self {
            Node::Call { call, .. } => call.source_name(),
            Node::Array { element, .. } => format!("{element}[]"),
            Node::Vector { declared, .. } => format!("float{declared}"),
            Node::Matrix { columns, rows, .. } => format!("float{columns}x{rows}"),
            other => other.kind_name().to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Structural projection of a node for the compatibility checker.
    pub fn shape(&self, id: NodeId) -> BuildResult<Shape<'_>> {
        Ok(match self.get(id) {
            Node::Leaf(expr) => Shape::of(expr),
            Node::Call { call, .. } => Shape::Call {
                result: &call.result.name,
            },
            Node::Array { element, .. } => Shape::Array {
                element: &element.name,
            },
            Node::Vector { components, .. } => Shape::Vector {
                len: components.len(),
            },
            Node::Matrix { values, .. } => Shape::matrix(values),
            Node::Taken => {
                return Err(BuildError::UnexpectedNode {
                    event: "attach",
                    expected: "a live node",
                    found: "moved node",
                });
            }
        })
    }

    /// Move the tree rooted at `id` out of the arena.
    pub fn take_tree(&mut self, id: NodeId) -> BuildResult<Expression> {
        let node = std::mem::replace(self.get_mut(id), Node::Taken);
        Ok(match node {
            Node::Leaf(expr) => expr,
            Node::Call {
                mut call,
                arguments,
                ..
            } => {
                for (index, child) in arguments {
                    let expr = self.take_tree(child)?;
                    call.arguments.insert(index, expr);
                }
                Expression::Call(call)
            }
            Node::Array {
                element, elements, ..
            } => Expression::Array(ArrayExpr {
                element,
                elements: elements
                    .into_iter()
                    .map(|child| self.take_tree(child))
                    .collect::<BuildResult<_>>()?,
            }),
            Node::Vector { components, .. } => Expression::Constant(Value::Vector(components)),
            Node::Matrix { values, .. } => Expression::Constant(Value::Matrix(values)),
            Node::Taken => {
                return Err(BuildError::UnexpectedNode {
                    event: "take",
                    expected: "a live node",
                    found: "moved node",
                });
            }
        })
    }

    /// Move a call tree out of the arena.
    pub fn take_call(&mut self, id: NodeId) -> BuildResult<Call> {
        match self.take_tree(id)? {
            Expression::Call(call) => Ok(call),
            other => Err(BuildError::UnexpectedNode {
                event: "take",
                expected: "a call",
                found: Node::Leaf(other).kind_name(),
            }),
        }
    }
}
