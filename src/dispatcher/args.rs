// Typed access to a tool call's `arguments` object

use serde_json::{Map, Value};

use super::catalog::ToolSpec;
use crate::error::{HdcError, HdcResult};

pub(super) struct ToolArgs<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> ToolArgs<'a> {
    /// Accepts an object or null (no arguments); every required parameter of `spec` must
    /// be present and non-null.
    pub(super) fn new(spec: &ToolSpec, value: &'a Value) -> HdcResult<Self> {
        let map = match value {
            Value::Object(map) => Some(map),
            Value::Null => None,
            _ => return Err(HdcError::invalid("arguments", "must be an object")),
        };
        let args = Self { map };
        if let Some(missing) = spec.required().find(|name| args.value(name).is_none()) {
            return Err(HdcError::MissingArgument(missing.to_string()));
        }
        Ok(args)
    }

    fn value(&self, name: &str) -> Option<&'a Value> {
        self.map?.get(name).filter(|v| !v.is_null())
    }

    pub(super) fn opt_str(&self, name: &str) -> HdcResult<Option<&'a str>> {
        match self.value(name) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(HdcError::invalid(name, "must be non-empty"))
            }
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(HdcError::invalid(name, "must be a string")),
        }
    }

    pub(super) fn str(&self, name: &str) -> HdcResult<&'a str> {
        self.opt_str(name)?
            .ok_or_else(|| HdcError::MissingArgument(name.to_string()))
    }

    /// Free text (typed input, log tags). Whitespace is content here; quoting happens later.
    pub(super) fn opt_text(&self, name: &str) -> HdcResult<Option<&'a str>> {
        match self.value(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(HdcError::invalid(name, "must be a string")),
        }
    }

    pub(super) fn text(&self, name: &str) -> HdcResult<&'a str> {
        self.opt_text(name)?
            .ok_or_else(|| HdcError::MissingArgument(name.to_string()))
    }

    /// Non-negative integer; numeric strings are accepted since some clients send them.
    pub(super) fn opt_u32(&self, name: &str) -> HdcResult<Option<u32>> {
        let Some(value) = self.value(name) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        parsed.map(Some).ok_or_else(|| {
            HdcError::invalid(
                name,
                format!("expected a non-negative integer, got {}", value),
            )
        })
    }

    pub(super) fn u32(&self, name: &str) -> HdcResult<u32> {
        self.opt_u32(name)?
            .ok_or_else(|| HdcError::MissingArgument(name.to_string()))
    }

    /// Key code or key name.
    pub(super) fn opt_key(&self, name: &str) -> HdcResult<Option<String>> {
        match self.value(name) {
            None => Ok(None),
            Some(Value::Number(n)) if n.is_u64() => Ok(Some(n.to_string())),
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.trim().to_string())),
            Some(other) => Err(HdcError::invalid(
                name,
                format!("expected a key code or name, got {}", other),
            )),
        }
    }

    pub(super) fn key(&self, name: &str) -> HdcResult<String> {
        self.opt_key(name)?
            .ok_or_else(|| HdcError::MissingArgument(name.to_string()))
    }
}
