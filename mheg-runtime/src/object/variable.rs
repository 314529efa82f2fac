// MHEG - mheg-runtime
// Module: Variable family
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Variable payloads and the operations on them.
//!
//! Everything here is pure: resolving Generic operands and emitting events
//! is the interpreter's job.

use mheg_error::{codes, kinds, Error, Result};
use mheg_foundation::{ObjectReference, OctetString, VariableKind, VariableValue};

/// Relational operator of TestVariable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// 1
    Equal,
    /// 2
    NotEqual,
    /// 3
    Less,
    /// 4
    LessOrEqual,
    /// 5
    Greater,
    /// 6
    GreaterOrEqual,
}

impl Comparison {
    /// Operator for an authored code
    ///
    /// # Errors
    ///
    /// `INVALID_OPERATOR` for a code outside 1..=6.
    pub fn from_code(code: i32) -> Result<Self> {
        Ok(match code {
            1 => Self::Equal,
            2 => Self::NotEqual,
            3 => Self::Less,
            4 => Self::LessOrEqual,
            5 => Self::Greater,
            6 => Self::GreaterOrEqual,
            _ => return Err(kinds::invalid_operator()),
        })
    }

    /// True for the operators every kind supports
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    fn apply_ordering(self, ordering: core::cmp::Ordering) -> bool {
        use core::cmp::Ordering::{Equal, Greater, Less};
        match self {
            Self::Equal => ordering == Equal,
            Self::NotEqual => ordering != Equal,
            Self::Less => ordering == Less,
            Self::LessOrEqual => ordering != Greater,
            Self::Greater => ordering == Greater,
            Self::GreaterOrEqual => ordering != Less,
        }
    }

    fn apply_equality(self, equal: bool) -> bool {
        match self {
            Self::NotEqual => !equal,
            _ => equal,
        }
    }
}

/// Integer arithmetic applied in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arithmetic {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

/// Variable payload with its authored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableState {
    /// Current value
    pub value:    VariableValue,
    /// Value restored by Preparation
    pub original: VariableValue,
}

impl VariableState {
    /// Variable whose original and current value are `value`
    pub fn new(value: VariableValue) -> Self {
        Self { original: value.clone(), value }
    }

    /// Fixed kind
    pub const fn kind(&self) -> VariableKind {
        self.original.kind()
    }

    /// Restore the original value
    pub fn reset(&mut self) {
        self.value = self.original.clone();
    }

    /// Store `value`, converting integers and octet strings into each
    /// other.
    ///
    /// # Errors
    ///
    /// `TYPE_MISMATCH` for any other cross-kind value; the payload is left
    /// unchanged.
    pub fn assign(&mut self, value: VariableValue) -> Result<()> {
        self.value = match (self.kind(), value) {
            (VariableKind::Integer, VariableValue::OctetString(s)) => VariableValue::Integer(s.parse_integer()),
            (VariableKind::OctetString, VariableValue::Integer(i)) => {
                VariableValue::OctetString(OctetString::from_integer(i))
            }
            (kind, value) if value.kind() == kind => value,
            _ => return Err(Error::type_error("Value cannot be stored in a variable of this kind")),
        };
        Ok(())
    }

    /// Compare the current value with `other` of the same kind.
    ///
    /// Object references are compared by `references_equal`, which resolves
    /// both sides in their own scope.
    ///
    /// # Errors
    ///
    /// `INVALID_OPERATOR` for an ordering operator on a non-integer kind,
    /// `TYPE_MISMATCH` if `other` has another kind.
    pub fn compare(
        &self,
        operator: Comparison,
        other: &VariableValue,
        references_equal: impl FnOnce(&ObjectReference, &ObjectReference) -> bool,
    ) -> Result<bool> {
        if !operator.is_equality() && self.kind() != VariableKind::Integer {
            return Err(kinds::invalid_operator());
        }
        match (&self.value, other) {
            (VariableValue::Integer(a), VariableValue::Integer(b)) => Ok(operator.apply_ordering(a.cmp(b))),
            (VariableValue::Boolean(a), VariableValue::Boolean(b)) => Ok(operator.apply_equality(a == b)),
            (VariableValue::OctetString(a), VariableValue::OctetString(b)) => {
                Ok(operator.apply_equality(a == b))
            }
            (VariableValue::ContentReference(a), VariableValue::ContentReference(b)) => {
                Ok(operator.apply_equality(a == b))
            }
            (VariableValue::ObjectReference(a), VariableValue::ObjectReference(b)) => {
                Ok(operator.apply_equality(references_equal(a, b)))
            }
            _ => Err(Error::type_error("Comparison value has another kind than the variable")),
        }
    }

    /// Apply integer arithmetic with wrapping semantics.
    ///
    /// # Errors
    ///
    /// `DIVISION_BY_ZERO` for divide or modulo by zero, `TYPE_MISMATCH` if
    /// this is not an integer variable. The payload is left unchanged.
    pub(crate) fn apply(&mut self, operation: Arithmetic, operand: i32) -> Result<()> {
        let VariableValue::Integer(value) = &mut self.value else {
            return Err(Error::type_error("Arithmetic on a non-integer variable"));
        };
        if operand == 0 && matches!(operation, Arithmetic::Divide | Arithmetic::Modulo) {
            return Err(Error::parameter_error(codes::DIVISION_BY_ZERO, "Divide by zero"));
        }
        *value = match operation {
            Arithmetic::Add => value.wrapping_add(operand),
            Arithmetic::Subtract => value.wrapping_sub(operand),
            Arithmetic::Multiply => value.wrapping_mul(operand),
            Arithmetic::Divide => value.wrapping_div(operand),
            Arithmetic::Modulo => value.wrapping_rem(operand),
        };
        Ok(())
    }

    /// Append to an octet-string variable.
    ///
    /// # Errors
    ///
    /// `TYPE_MISMATCH` if this is not an octet-string variable.
    pub fn append(&mut self, suffix: &OctetString) -> Result<()> {
        match &mut self.value {
            VariableValue::OctetString(value) => {
                value.append(suffix);
                Ok(())
            }
            _ => Err(Error::type_error("Append on a non octet-string variable")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integer(value: i32) -> VariableState {
        VariableState::new(VariableValue::Integer(value))
    }

    #[test]
    fn test_assign_converts_between_integer_and_string() {
        let mut var = integer(0);
        var.assign(VariableValue::OctetString(OctetString::from("-12x"))).unwrap();
        assert_eq!(var.value, VariableValue::Integer(-12));

        let mut text = VariableState::new(VariableValue::OctetString(OctetString::new()));
        text.assign(VariableValue::Integer(305)).unwrap();
        assert_eq!(text.value, VariableValue::OctetString(OctetString::from("305")));
    }

    #[test]
    fn test_assign_rejects_other_kinds() {
        let mut var = VariableState::new(VariableValue::Boolean(true));
        assert!(var.assign(VariableValue::Integer(1)).is_err());
        assert_eq!(var.value, VariableValue::Boolean(true));
    }

    #[test]
    fn test_compare_integers() {
        let var = integer(5);
        let never = |_: &ObjectReference, _: &ObjectReference| false;
        assert_eq!(var.compare(Comparison::Less, &VariableValue::Integer(10), never), Ok(true));
        assert_eq!(var.compare(Comparison::GreaterOrEqual, &VariableValue::Integer(5), never), Ok(true));
        assert_eq!(var.compare(Comparison::NotEqual, &VariableValue::Integer(5), never), Ok(false));
    }

    #[test]
    fn test_ordering_is_integer_only() {
        let var = VariableState::new(VariableValue::OctetString(OctetString::from("a")));
        let result =
            var.compare(Comparison::Less, &VariableValue::OctetString(OctetString::from("b")), |_, _| false);
        assert_eq!(result.unwrap_err().code, codes::INVALID_OPERATOR);
        assert!(Comparison::from_code(7).is_err());
    }

    #[test]
    fn test_arithmetic_wraps_and_guards_zero() {
        let mut var = integer(i32::MAX);
        var.apply(Arithmetic::Add, 1).unwrap();
        assert_eq!(var.value, VariableValue::Integer(i32::MIN));

        let mut var = integer(7);
        assert_eq!(var.apply(Arithmetic::Modulo, 0).unwrap_err().code, codes::DIVISION_BY_ZERO);
        assert_eq!(var.value, VariableValue::Integer(7));
        var.apply(Arithmetic::Modulo, 4).unwrap();
        assert_eq!(var.value, VariableValue::Integer(3));
    }

    #[test]
    fn test_reset_restores_original() {
        let mut var = integer(3);
        var.apply(Arithmetic::Multiply, 3).unwrap();
        var.reset();
        assert_eq!(var.value, VariableValue::Integer(3));
    }
}
