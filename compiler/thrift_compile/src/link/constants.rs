//! Constant evaluation.
//!
//! A literal is checked against the type it is assigned to, with typedefs
//! unwrapped. Integers are range-checked against the target width. A few
//! coercions are allowed:
//!
//! - `0` and `1` to `bool`
//! - integers to `double`
//! - strings to `binary`
//! - list literals to sets
//! - integers to an enum that has an item with that value
//! - map literals with string keys to structs, unions, and exceptions
//!
//! References to other constants stay references; the referenced value
//! must fit the expected type.

use thrift_ir::{Constant, ConstantMap, ConstantReference, ConstantValue, StructureKind};
use tracing::trace;

use super::lookup::ConstantTarget;
use super::{Linker, Result, Site};
use crate::error::{CompileError, CompileErrorKind};
use crate::pool::{Primitive, Requiredness, TypeId, TypeSpec};
use crate::value::{ConstantSpec, TypedValue, Value};
use crate::{ConstId, ModuleId};

/// The part of a resolved type that decides which literals it accepts.
#[derive(Copy, Clone, Debug)]
enum Shape {
    Primitive(Primitive),
    List(TypeId),
    Set(TypeId),
    Map(TypeId, TypeId),
    Enum,
    Struct(StructureKind),
}

impl Shape {
    fn of(spec: &TypeSpec) -> Option<Shape> {
        Some(match spec {
            TypeSpec::Primitive { kind, .. } => Shape::Primitive(*kind),
            TypeSpec::List { value, .. } => Shape::List(*value),
            TypeSpec::Set { value, .. } => Shape::Set(*value),
            TypeSpec::Map { key, value, .. } => Shape::Map(*key, *value),
            TypeSpec::Enum(_) => Shape::Enum,
            TypeSpec::Struct(spec) => Shape::Struct(spec.kind),
            TypeSpec::Typedef(_) => return None,
        })
    }
}

impl<'a> Linker<'a> {
    pub(super) fn resolve_constant(
        &mut self,
        module: ModuleId,
        constant: &'a Constant,
    ) -> Result<ConstId> {
        let ty = self.resolve_type(module, &constant.ty)?;
        let value = self.eval_constant(module, &constant.value, ty, constant.line)?;
        let id = ConstId::next(self.constants.len());
        self.constants.push(ConstantSpec {
            name: constant.name.clone(),
            module,
            value: TypedValue { ty, value },
            line: constant.line,
        });
        Ok(id)
    }

    /// Evaluate `value` as a value of type `expected`.
    ///
    /// `line` locates errors; it is the line of the constant or field the
    /// value belongs to.
    pub(super) fn eval_constant(
        &mut self,
        module: ModuleId,
        value: &'a ConstantValue,
        expected: TypeId,
        line: u32,
    ) -> Result<Value> {
        let site = Site { module, line };
        let target = self.types.unwrap_typedefs(expected);
        let shape = self.shape(target, site)?;
        trace!(kind = value.kind_name(), expected = ?expected, "evaluating constant");

        match (value, shape) {
            (ConstantValue::Reference(reference), _) => {
                self.eval_reference(module, reference, expected, target, shape)
            }
            (ConstantValue::Bool(b), Shape::Primitive(Primitive::Bool)) => Ok(Value::Bool(*b)),
            (ConstantValue::Int(i @ (0 | 1)), Shape::Primitive(Primitive::Bool)) => {
                Ok(Value::Bool(*i == 1))
            }
            (ConstantValue::Int(i), Shape::Primitive(Primitive::Double)) => {
                let i = self.check_int(*i, Primitive::I64, expected, site)?;
                Ok(Value::Double(int_to_double(i)))
            }
            (ConstantValue::Int(i), Shape::Primitive(kind)) if kind.int_range().is_some() => {
                self.check_int(*i, kind, expected, site).map(Value::Int)
            }
            (ConstantValue::Int(i), Shape::Enum) => {
                let i = self.check_int(*i, Primitive::I64, expected, site)?;
                self.enum_item_by_value(i, target, expected, site)
            }
            (ConstantValue::Double(d), Shape::Primitive(Primitive::Double)) => {
                Ok(Value::Double(*d))
            }
            (
                ConstantValue::String(s),
                Shape::Primitive(Primitive::String | Primitive::Binary),
            ) => Ok(Value::String(s.clone())),
            (ConstantValue::List(list), Shape::List(element)) => {
                Ok(Value::List(self.eval_items(module, &list.items, element, line)?))
            }
            (ConstantValue::List(list), Shape::Set(element)) => {
                Ok(Value::Set(self.eval_items(module, &list.items, element, line)?))
            }
            (ConstantValue::Map(map), Shape::Map(key, value)) => {
                let mut pairs = Vec::with_capacity(map.items.len());
                for item in &map.items {
                    let k = self.eval_constant(module, &item.key, key, line)?;
                    let v = self.eval_constant(module, &item.value, value, line)?;
                    pairs.push((k, v));
                }
                Ok(Value::Map(pairs))
            }
            (ConstantValue::Map(map), Shape::Struct(kind)) => {
                self.eval_struct_literal(module, map, target, kind, expected, line)
            }
            (value, _) => Err(self.mismatch(site, expected, value.kind_name())),
        }
    }

    fn eval_items(
        &mut self,
        module: ModuleId,
        items: &'a [ConstantValue],
        element: TypeId,
        line: u32,
    ) -> Result<Vec<Value>> {
        items
            .iter()
            .map(|item| self.eval_constant(module, item, element, line))
            .collect()
    }

    fn eval_reference(
        &mut self,
        module: ModuleId,
        reference: &'a ConstantReference,
        expected: TypeId,
        target: TypeId,
        shape: Shape,
    ) -> Result<Value> {
        let site = Site {
            module,
            line: reference.line,
        };
        match self.resolve_constant_reference(module, &reference.name, reference.line)? {
            ConstantTarget::EnumItem { ty, name, value } => {
                if ty == target {
                    return Ok(Value::EnumItem { name, value });
                }
                match shape {
                    Shape::Primitive(kind) if kind.int_range().is_some() => {
                        self.check_int(i128::from(value), kind, expected, site)
                            .map(Value::Int)
                    }
                    _ => Err(self.mismatch(
                        site,
                        expected,
                        format!("enum item {}", reference.name),
                    )),
                }
            }
            ConstantTarget::Constant(id) => {
                let Some(constant) = self.constant(id) else {
                    return Err(self.internal(site, format!("{id:?} is not resolved")));
                };
                if self.types.unwrap_typedefs(constant.ty()) != target {
                    self.check_value_fits(&constant.value.value, target, expected, site)?;
                }
                Ok(Value::Reference(id))
            }
        }
    }

    /// Check that an already evaluated value is acceptable as `target`.
    fn check_value_fits(
        &self,
        value: &Value,
        target: TypeId,
        expected: TypeId,
        site: Site,
    ) -> Result<()> {
        let target = self.types.unwrap_typedefs(target);
        let shape = self.shape(target, site)?;
        match (value, shape) {
            (Value::Reference(id), _) => match self.constant(*id) {
                Some(constant) => {
                    self.check_value_fits(&constant.value.value, target, expected, site)
                }
                None => Err(self.internal(site, format!("{id:?} is not resolved"))),
            },
            (Value::Bool(_), Shape::Primitive(Primitive::Bool))
            | (Value::Int(0 | 1), Shape::Primitive(Primitive::Bool))
            | (Value::Int(_) | Value::Double(_), Shape::Primitive(Primitive::Double))
            | (Value::String(_), Shape::Primitive(Primitive::String | Primitive::Binary)) => {
                Ok(())
            }
            (Value::Int(i), Shape::Primitive(kind)) if kind.int_range().is_some() => {
                self.check_int(i128::from(*i), kind, expected, site).map(|_| ())
            }
            (Value::EnumItem { value, .. }, Shape::Primitive(kind))
                if kind.int_range().is_some() =>
            {
                self.check_int(i128::from(*value), kind, expected, site).map(|_| ())
            }
            (Value::Int(i), Shape::Enum) => self
                .enum_item_by_value(*i, target, expected, site)
                .map(|_| ()),
            (
                Value::List(items) | Value::Set(items),
                Shape::List(element) | Shape::Set(element),
            ) => items
                .iter()
                .try_for_each(|item| self.check_value_fits(item, element, element, site)),
            (Value::Map(pairs), Shape::Map(key, value)) => pairs.iter().try_for_each(|(k, v)| {
                self.check_value_fits(k, key, key, site)?;
                self.check_value_fits(v, value, value, site)
            }),
            (value, _) => Err(self.mismatch(site, expected, value.kind_name())),
        }
    }

    /// Map literal assigned to a struct-like: keys name fields.
    fn eval_struct_literal(
        &mut self,
        module: ModuleId,
        map: &'a ConstantMap,
        target: TypeId,
        kind: StructureKind,
        expected: TypeId,
        line: u32,
    ) -> Result<Value> {
        let site = Site { module, line };
        let fields: Vec<(String, TypeId, Requiredness)> = match self.types.spec(target) {
            Some(TypeSpec::Struct(spec)) => spec
                .fields
                .iter()
                .map(|field| (field.name.clone(), field.ty, field.requiredness))
                .collect(),
            _ => return Err(self.internal(site, format!("{target:?} is not a struct"))),
        };

        let mut values: Vec<Option<Value>> = vec![None; fields.len()];
        for item in &map.items {
            let ConstantValue::String(key) = &item.key else {
                return Err(self.mismatch(
                    site,
                    expected,
                    format!("map with {} keys", item.key.kind_name()),
                ));
            };
            let Some(index) = fields.iter().position(|(name, ..)| name == key) else {
                return Err(self.mismatch(
                    site,
                    expected,
                    format!("map with unknown field {key:?}"),
                ));
            };
            if values[index].is_some() {
                return Err(self.mismatch(
                    site,
                    expected,
                    format!("map setting field {key:?} twice"),
                ));
            }
            let value = self.eval_constant(module, &item.value, fields[index].1, line)?;
            values[index] = Some(value);
        }

        for ((name, _, requiredness), value) in fields.iter().zip(&values) {
            if *requiredness == Requiredness::Required && value.is_none() {
                return Err(self.mismatch(
                    site,
                    expected,
                    format!("map missing required field {name:?}"),
                ));
            }
        }
        let set = values.iter().filter(|value| value.is_some()).count();
        if kind == StructureKind::Union && set != 1 {
            return Err(self.mismatch(
                site,
                expected,
                format!("map setting {set} union fields"),
            ));
        }

        Ok(Value::Struct {
            fields: fields
                .into_iter()
                .zip(values)
                .filter_map(|((name, ..), value)| value.map(|value| (name, value)))
                .collect(),
        })
    }

    fn enum_item_by_value(
        &self,
        raw: i64,
        target: TypeId,
        expected: TypeId,
        site: Site,
    ) -> Result<Value> {
        let item = self
            .types
            .spec(target)
            .and_then(TypeSpec::as_enum)
            .and_then(|spec| spec.item_by_value(raw));
        match item {
            Some(item) => Ok(Value::EnumItem {
                name: item.name.clone(),
                value: item.value,
            }),
            None => Err(self.mismatch(site, expected, format!("integer {raw}"))),
        }
    }

    fn check_int(&self, raw: i128, kind: Primitive, expected: TypeId, site: Site) -> Result<i64> {
        let in_range = kind
            .int_range()
            .is_some_and(|(min, max)| raw >= i128::from(min) && raw <= i128::from(max));
        match i64::try_from(raw) {
            Ok(value) if in_range => Ok(value),
            _ => Err(self.error(
                site,
                CompileErrorKind::ConstantRange {
                    value: raw.to_string(),
                    ty: self.types.display(expected),
                },
            )),
        }
    }

    fn shape(&self, target: TypeId, site: Site) -> Result<Shape> {
        self.types
            .spec(target)
            .and_then(Shape::of)
            .ok_or_else(|| self.internal(site, format!("{target:?} is not resolved")))
    }

    fn mismatch(&self, site: Site, expected: TypeId, found: impl Into<String>) -> CompileError {
        self.error(
            site,
            CompileErrorKind::ConstantTypeMismatch {
                expected: self.types.display(expected),
                found: found.into(),
            },
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn int_to_double(value: i64) -> f64 {
    value as f64
}
