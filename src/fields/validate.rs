//! Post-deserialization validators.

use serde_json::Value;

use crate::error::FieldError;
use crate::traits::Field;

/// A validator that fails with `reason` whenever `predicate` rejects the value.
pub fn validate_with_message<T, F>(
    predicate: F,
    reason: impl Into<String>,
) -> impl Fn(&T) -> Result<(), FieldError> + Send + Sync
where
    T: ?Sized,
    F: Fn(&T) -> bool + Send + Sync,
{
    let reason = reason.into();
    move |value: &T| {
        if predicate(value) {
            Ok(())
        } else {
            Err(FieldError::Invalid(reason.clone()))
        }
    }
}

/// Wraps a field and runs `validator` on every successfully deserialized value.
pub struct Validated<F, V> {
    field: F,
    validator: V,
}

impl<F, V> Validated<F, V>
where
    F: Field,
    V: Fn(&F::Output) -> Result<(), FieldError>,
{
    pub fn new(field: F, validator: V) -> Self {
        Validated { field, validator }
    }

    pub fn inner(&self) -> &F {
        &self.field
    }
}

impl<F, V> Field for Validated<F, V>
where
    F: Field,
    V: Fn(&F::Output) -> Result<(), FieldError>,
{
    type Input = F::Input;
    type Output = F::Output;

    fn serialize(&self, value: &F::Input) -> Result<Value, FieldError> {
        self.field.serialize(value)
    }

    fn deserialize(&self, value: &Value) -> Result<F::Output, FieldError> {
        let output = self.field.deserialize(value)?;
        (self.validator)(&output)?;
        Ok(output)
    }
}
