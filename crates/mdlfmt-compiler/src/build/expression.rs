//! Expression constructors, slots and leaf values.
//!
//! Constructors (`call_begin`, `array_begin`, ...) push an open frame. Slot
//! begin-events mark the pending slot on the top frame; the slot end-event pops
//! the single completed child above it, checks it against the slot and
//! attaches it. Constructor end-events seal the frame after checking that it
//! received every declared slot.

use std::collections::BTreeMap;

use mdlfmt_core::resolver::canonical_type_name;
use mdlfmt_core::{Call, EnumValue, Expression, GammaMode, TextureValue, Value};

use super::Builder;
use super::arena::{CallOrigin, Node, NodeId};
use super::error::{BuildError, BuildResult};
use crate::check::{self, matrix_size, vector_size};
use crate::events::ArgumentDecl;

/// Construct closed by an end-event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Construct {
    Call(CallOrigin),
    Array,
    Vector,
    Matrix,
}

impl Construct {
    fn expected(self) -> &'static str {
        match self {
            Construct::Call(CallOrigin::Function) => "an open call",
            Construct::Call(CallOrigin::Structure) => "an open structure",
            Construct::Call(CallOrigin::Annotation) => "an open annotation",
            Construct::Array => "an open array",
            Construct::Vector => "an open vector",
            Construct::Matrix => "an open matrix",
        }
    }
}

/// Numbered position inside a construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum SlotKind {
    /// Call or annotation argument.
    Argument,
    /// Structure member.
    Member,
    /// Array element.
    Element,
    /// Vector component.
    Component,
    /// Matrix column.
    Column,
}

impl SlotKind {
    fn expected(self) -> &'static str {
        match self {
            SlotKind::Argument => "a call or annotation",
            SlotKind::Member => "a structure",
            SlotKind::Element => "an array",
            SlotKind::Component => "a vector",
            SlotKind::Column => "a matrix",
        }
    }
}

fn check_call_slot(
    call: &Call,
    arguments: &BTreeMap<usize, NodeId>,
    index: usize,
) -> BuildResult<()> {
    if index >= call.slots.len() {
        return Err(BuildError::SlotOutOfRange {
            owner: call.source_name(),
            index,
            len: call.slots.len(),
        });
    }
    if arguments.contains_key(&index) {
        return Err(BuildError::SlotAlreadyFilled {
            owner: call.source_name(),
            index,
        });
    }
    Ok(())
}

fn check_sequential(node: &Node, index: usize, filled: usize, declared: usize) -> BuildResult<()> {
    if index >= declared {
        return Err(BuildError::SlotOutOfRange {
            owner: node.owner_name(),
            index,
            len: declared,
        });
    }
    if index != filled {
        return Err(BuildError::ElementOutOfOrder {
            owner: node.owner_name(),
            index,
            expected: filled,
        });
    }
    Ok(())
}

impl Builder {
    /// A new expression may start here: inside a pending slot, or as the
    /// top-level expression of an open parameter, field or temporary.
    fn expect_expression_position(&self, event: &'static str) -> BuildResult<()> {
        match self.frames.top() {
            Some(top) if top.sealed => Err(BuildError::ExtraExpression { event }),
            Some(top) if top.slot.is_none() => Err(BuildError::NoPendingSlot { event }),
            Some(_) => Ok(()),
            None if self.has_container() => Ok(()),
            None => Err(BuildError::Outside {
                event,
                scope: "an expression context",
            }),
        }
    }

    fn has_container(&self) -> bool {
        self.parameter.is_some() || self.field.is_some() || self.temporary.is_some()
    }

    fn push_leaf(&mut self, event: &'static str, expr: Expression) -> BuildResult<()> {
        self.expect_expression_position(event)?;
        let id = self.arena.alloc(Node::Leaf(expr));
        self.frames.push_sealed(id);
        Ok(())
    }

    fn push_open(&mut self, node: Node) -> BuildResult<bool> {
        let id = self.arena.alloc(node);
        self.frames.push_open(id);
        Ok(true)
    }

    /// Pop the top frame, which must hold a completed expression.
    pub(super) fn pop_sealed(&mut self, event: &'static str) -> BuildResult<NodeId> {
        let frame = self.frames.pop().ok_or(BuildError::StackUnderflow { event })?;
        if !frame.sealed {
            return Err(BuildError::Unbalanced {
                event,
                depth: self.frames.len() + 1,
            });
        }
        Ok(frame.node)
    }

    /// Seal the top frame after checking it is a complete `construct`.
    pub(super) fn seal(
        &mut self,
        event: &'static str,
        construct: Construct,
    ) -> BuildResult<NodeId> {
        let frame = *self.frames.top().ok_or(BuildError::StackUnderflow { event })?;
        if frame.sealed {
            return Err(BuildError::UnexpectedNode {
                event,
                expected: construct.expected(),
                found: "a completed expression",
            });
        }
        if let Some(index) = frame.slot {
            return Err(BuildError::SlotStillOpen { event, index });
        }

        let node = self.arena.get(frame.node);
        match (construct, node) {
            (Construct::Call(expected), Node::Call {
                call,
                origin,
                arguments,
            }) if expected == *origin => {
                if self.config.require_complete_calls && arguments.len() != call.slots.len() {
                    return Err(BuildError::IncompleteCall {
                        owner: call.source_name(),
                        filled: arguments.len(),
                        declared: call.slots.len(),
                    });
                }
            }
            (Construct::Array, Node::Array {
                declared, elements, ..
            }) => check_size(node, *declared, elements.len())?,
            (Construct::Vector, Node::Vector {
                declared,
                components,
            }) => check_size(node, *declared, components.len())?,
            (Construct::Matrix, Node::Matrix {
                columns, values, ..
            }) => check_size(node, *columns, values.len())?,
            (_, other) => {
                return Err(BuildError::UnexpectedNode {
                    event,
                    expected: construct.expected(),
                    found: other.kind_name(),
                });
            }
        }

        if let Some(top) = self.frames.top_mut() {
            top.sealed = true;
        }
        Ok(frame.node)
    }

    fn open_slot(
        &mut self,
        event: &'static str,
        kind: SlotKind,
        index: usize,
    ) -> BuildResult<bool> {
        let frame = *self.frames.top().ok_or(BuildError::StackUnderflow { event })?;
        if frame.sealed {
            return Err(BuildError::UnexpectedNode {
                event,
                expected: kind.expected(),
                found: "a completed expression",
            });
        }
        if let Some(open) = frame.slot {
            return Err(BuildError::SlotStillOpen { event, index: open });
        }

        let node = self.arena.get(frame.node);
        match (kind, node) {
            (SlotKind::Argument, Node::Call {
                call,
                origin,
                arguments,
            }) if *origin != CallOrigin::Structure => check_call_slot(call, arguments, index)?,
            (SlotKind::Member, Node::Call {
                call,
                origin: CallOrigin::Structure,
                arguments,
            }) => check_call_slot(call, arguments, index)?,
            (SlotKind::Element, Node::Array {
                declared, elements, ..
            }) => check_sequential(node, index, elements.len(), *declared)?,
            (SlotKind::Component, Node::Vector {
                declared,
                components,
            }) => check_sequential(node, index, components.len(), *declared)?,
            (SlotKind::Column, Node::Matrix {
                columns, values, ..
            }) => check_sequential(node, index, values.len(), *columns)?,
            (_, other) => {
                return Err(BuildError::UnexpectedNode {
                    event,
                    expected: kind.expected(),
                    found: other.kind_name(),
                });
            }
        }

        if let Some(top) = self.frames.top_mut() {
            top.slot = Some(index);
        }
        Ok(true)
    }

    fn close_slot(&mut self, event: &'static str, kind: SlotKind) -> BuildResult<()> {
        let child = self.pop_sealed(event)?;
        let parent = *self.frames.top().ok_or(BuildError::StackUnderflow { event })?;
        let Some(index) = parent.slot else {
            return Err(BuildError::NoPendingSlot { event });
        };

        match kind {
            SlotKind::Argument | SlotKind::Member | SlotKind::Element => {
                let (expected, context) = self.slot_declaration(event, kind, parent.node, index)?;
                let scope = self.current_material(event)?;
                check::verify_slot(&expected, self.arena.shape(child)?, scope)
                    .map_err(|source| BuildError::Check { context, source })?;
                match self.arena.get_mut(parent.node) {
                    Node::Call { arguments, .. } => {
                        arguments.insert(index, child);
                    }
                    Node::Array { elements, .. } => elements.push(child),
                    other => {
                        return Err(BuildError::UnexpectedNode {
                            event,
                            expected: kind.expected(),
                            found: other.kind_name(),
                        });
                    }
                }
            }
            SlotKind::Component => {
                let component = match self.arena.get(child) {
                    Node::Leaf(Expression::Constant(Value::Float(value))) => *value,
                    other => {
                        return Err(BuildError::NotAFloat {
                            found: other.kind_name(),
                        });
                    }
                };
                match self.arena.get_mut(parent.node) {
                    Node::Vector { components, .. } => components.push(component),
                    other => {
                        return Err(BuildError::UnexpectedNode {
                            event,
                            expected: kind.expected(),
                            found: other.kind_name(),
                        });
                    }
                }
            }
            SlotKind::Column => {
                let column = match self.arena.get(child) {
                    Node::Vector { components, .. } => components.clone(),
                    other => {
                        return Err(BuildError::UnexpectedNode {
                            event,
                            expected: "a vector",
                            found: other.kind_name(),
                        });
                    }
                };
                let parent_node = self.arena.get_mut(parent.node);
                let owner = parent_node.owner_name();
                match parent_node {
                    Node::Matrix { rows, values, .. } => {
                        if column.len() != *rows {
                            return Err(BuildError::SizeMismatch {
                                owner,
                                expected: *rows,
                                found: column.len(),
                            });
                        }
                        values.push(column);
                    }
                    other => {
                        return Err(BuildError::UnexpectedNode {
                            event,
                            expected: kind.expected(),
                            found: other.kind_name(),
                        });
                    }
                }
            }
        }

        if let Some(top) = self.frames.top_mut() {
            top.slot = None;
        }
        Ok(())
    }

    /// Declared type of a pending slot and a description for diagnostics.
    fn slot_declaration(
        &self,
        event: &'static str,
        kind: SlotKind,
        parent: NodeId,
        index: usize,
    ) -> BuildResult<(String, String)> {
        match (kind, self.arena.get(parent)) {
            (SlotKind::Argument | SlotKind::Member, Node::Call { call, origin, .. })
                if (kind == SlotKind::Member) == (*origin == CallOrigin::Structure) =>
            {
                let slot = call.slots.get(index).ok_or_else(|| BuildError::SlotOutOfRange {
                    owner: call.source_name(),
                    index,
                    len: call.slots.len(),
                })?;
                let what = if kind == SlotKind::Member {
                    "member"
                } else {
                    "argument"
                };
                Ok((
                    slot.ty.name.clone(),
                    format!("{what} `{}` of `{}`", slot.name, call.source_name()),
                ))
            }
            (SlotKind::Element, Node::Array { element, .. }) => Ok((
                element.name.clone(),
                format!("element {index} of `{element}[]`"),
            )),
            (_, other) => Err(BuildError::UnexpectedNode {
                event,
                expected: kind.expected(),
                found: other.kind_name(),
            }),
        }
    }

    pub(super) fn on_call_begin(
        &mut self,
        type_name: &str,
        name: &str,
        args: &[ArgumentDecl],
    ) -> BuildResult<bool> {
        self.expect_expression_position("call_begin")?;
        let result = self.resolver.resolve_type(type_name);
        let (namespace, local) = self.resolver.resolve_call(name);
        let slots = self.resolve_slots(args);
        self.push_open(Node::Call {
            call: Call::new(result, namespace, local, slots),
            origin: CallOrigin::Function,
            arguments: BTreeMap::new(),
        })
    }

    pub(super) fn on_call_end(&mut self) -> BuildResult<()> {
        self.seal("call_end", Construct::Call(CallOrigin::Function))
            .map(|_| ())
    }

    pub(super) fn on_argument_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open_slot("argument_begin", SlotKind::Argument, index)
    }

    pub(super) fn on_argument_end(&mut self) -> BuildResult<()> {
        self.close_slot("argument_end", SlotKind::Argument)
    }

    pub(super) fn on_structure_begin(&mut self, name: &str) -> BuildResult<bool> {
        self.expect_expression_position("structure_begin")?;
        let structure = self
            .registry
            .structure(name)
            .ok_or_else(|| BuildError::UnknownStructure(name.to_string()))?;
        let call = Call::new(
            structure.ty.clone(),
            structure.ty.namespace.clone(),
            structure.ty.name.clone(),
            structure.members.clone(),
        );
        self.push_open(Node::Call {
            call,
            origin: CallOrigin::Structure,
            arguments: BTreeMap::new(),
        })
    }

    pub(super) fn on_structure_end(&mut self) -> BuildResult<()> {
        self.seal("structure_end", Construct::Call(CallOrigin::Structure))
            .map(|_| ())
    }

    pub(super) fn on_structure_member_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open_slot("structure_member_begin", SlotKind::Member, index)
    }

    pub(super) fn on_structure_member_end(&mut self) -> BuildResult<()> {
        self.close_slot("structure_member_end", SlotKind::Member)
    }

    pub(super) fn on_array_begin(&mut self, element_type: &str, size: usize) -> BuildResult<bool> {
        self.expect_expression_position("array_begin")?;
        let element = self.resolver.resolve_type(element_type);
        self.push_open(Node::Array {
            element,
            declared: size,
            elements: Vec::with_capacity(size),
        })
    }

    pub(super) fn on_array_end(&mut self) -> BuildResult<()> {
        self.seal("array_end", Construct::Array).map(|_| ())
    }

    pub(super) fn on_array_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open_slot("array_element_begin", SlotKind::Element, index)
    }

    pub(super) fn on_array_element_end(&mut self) -> BuildResult<()> {
        self.close_slot("array_element_end", SlotKind::Element)
    }

    pub(super) fn on_vector_begin(&mut self, type_name: &str) -> BuildResult<bool> {
        self.expect_expression_position("vector_begin")?;
        let declared = vector_size(&canonical_type_name(type_name))
            .ok_or_else(|| BuildError::InvalidVectorType(type_name.to_string()))?;
        self.push_open(Node::Vector {
            declared,
            components: Vec::with_capacity(declared),
        })
    }

    pub(super) fn on_vector_end(&mut self) -> BuildResult<()> {
        self.seal("vector_end", Construct::Vector).map(|_| ())
    }

    pub(super) fn on_vector_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open_slot("vector_element_begin", SlotKind::Component, index)
    }

    pub(super) fn on_vector_element_end(&mut self) -> BuildResult<()> {
        self.close_slot("vector_element_end", SlotKind::Component)
    }

    pub(super) fn on_matrix_begin(&mut self, type_name: &str) -> BuildResult<bool> {
        self.expect_expression_position("matrix_begin")?;
        let (columns, rows) = matrix_size(&canonical_type_name(type_name))
            .ok_or_else(|| BuildError::InvalidMatrixType(type_name.to_string()))?;
        self.push_open(Node::Matrix {
            columns,
            rows,
            values: Vec::with_capacity(columns),
        })
    }

    pub(super) fn on_matrix_end(&mut self) -> BuildResult<()> {
        self.seal("matrix_end", Construct::Matrix).map(|_| ())
    }

    pub(super) fn on_matrix_element_begin(&mut self, index: usize) -> BuildResult<bool> {
        self.open_slot("matrix_element_begin", SlotKind::Column, index)
    }

    pub(super) fn on_matrix_element_end(&mut self) -> BuildResult<()> {
        self.close_slot("matrix_element_end", SlotKind::Column)
    }

    pub(super) fn on_reference_parameter(&mut self, index: u32) -> BuildResult<()> {
        let declared = self.current_material("reference_parameter")?.parameters.len();
        if index as usize >= declared {
            return Err(BuildError::UnknownParameter(index));
        }
        self.push_leaf("reference_parameter", Expression::Parameter(index))
    }

    pub(super) fn on_reference_temporary(&mut self, index: u32) -> BuildResult<()> {
        let declared = self.current_material("reference_temporary")?.temporaries.len();
        if index as usize >= declared {
            return Err(BuildError::UnknownTemporary(index));
        }
        self.push_leaf("reference_temporary", Expression::Temporary(index))
    }

    /// Only an unset texture can be default-constructed.
    pub(super) fn on_default_ref(&mut self, type_name: &str) -> BuildResult<()> {
        if canonical_type_name(type_name) != "texture_2d" {
            return Err(BuildError::Unsupported(format!(
                "default-constructed `{type_name}`"
            )));
        }
        self.push_leaf(
            "default_ref",
            Expression::Constant(Value::Texture(TextureValue::default())),
        )
    }

    pub(super) fn on_value(&mut self, event: &'static str, value: Value) -> BuildResult<()> {
        self.push_leaf(event, Expression::Constant(value))
    }

    pub(super) fn on_value_enum(
        &mut self,
        type_name: &str,
        value: i32,
        name: &str,
    ) -> BuildResult<()> {
        self.expect_expression_position("value_enum")?;
        let ty = self.resolver.resolve_type(type_name);
        self.on_value(
            "value_enum",
            Value::Enum(EnumValue {
                ty,
                symbol: name.to_string(),
                ordinal: value,
            }),
        )
    }

    pub(super) fn on_value_texture(&mut self, path: &str, gamma: GammaMode) -> BuildResult<()> {
        self.expect_expression_position("value_texture")?;
        // An unset texture renders as `texture_2d()` and needs no gamma import.
        if !path.is_empty() {
            self.resolver.register_import("tex", "gamma_mode");
        }
        self.on_value(
            "value_texture",
            Value::Texture(TextureValue {
                path: path.to_string(),
                gamma,
            }),
        )
    }
}

fn check_size(node: &Node, declared: usize, found: usize) -> BuildResult<()> {
    if declared != found {
        return Err(BuildError::SizeMismatch {
            owner: node.owner_name(),
            expected: declared,
            found,
        });
    }
    Ok(())
}
