//! File-level version configuration.
//!
//! A unit selects its output convention with a file-level attribute:
//! `@@jsxConfig({jsx: 2})` or `@@jsxConfig({jsx: 3})`. The `jsx` field is
//! consumed by the scan; any other fields of the record are re-emitted
//! untouched, and the whole attribute is dropped once it carries nothing
//! else.

use jsx_ast::{Expr, ExprKind, Literal, Marker, RecordField};
use smol_str::SmolStr;

use crate::error::{RewriteError, RewriteErrorKind};

/// The attribute name carrying the version configuration record.
pub const CONFIG_ATTRIBUTE: &str = "jsxConfig";
/// The record field naming the jsx version.
pub const VERSION_FIELD: &str = "jsx";

/// The output convention a unit is rewritten against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsxVersion {
    /// The `ReasonReact.element` / `ReactDOMRe` convention.
    #[default]
    V2,
    /// The `React.createElement` + props-constructor convention.
    V3,
}

/// The result of scanning one configuration attribute.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConfigScan {
    /// The version the attribute selects, if its record has a `jsx` field.
    pub version: Option<JsxVersion>,
    /// The attribute to re-emit, or `None` when the record emptied out.
    pub remaining: Option<Marker>,
}

/// Scans a `jsxConfig` attribute, consuming its `jsx` field.
pub(crate) fn scan_config(marker: &Marker) -> Result<ConfigScan, RewriteError> {
    let payload = marker.payload.as_ref().ok_or_else(|| {
        RewriteError::new(RewriteErrorKind::InvalidVersionConfigShape, marker.span)
    })?;
    let ExprKind::Record(fields) = &payload.kind else {
        return Err(RewriteError::new(
            RewriteErrorKind::InvalidVersionConfigShape,
            payload.span,
        ));
    };

    let mut version = None;
    let mut rest: Vec<RecordField> = Vec::with_capacity(fields.len());
    for field in fields {
        if field.name == VERSION_FIELD && version.is_none() {
            version = Some(parse_version(&field.value)?);
        } else {
            rest.push(field.clone());
        }
    }

    if version.is_none() {
        return Ok(ConfigScan {
            version: None,
            remaining: Some(marker.clone()),
        });
    }

    let remaining = if rest.is_empty() {
        None
    } else {
        let record = Expr::new(ExprKind::Record(rest), payload.span);
        Some(Marker::with_payload(marker.name.clone(), record, marker.span))
    };
    Ok(ConfigScan { version, remaining })
}

fn parse_version(value: &Expr) -> Result<JsxVersion, RewriteError> {
    match &value.kind {
        ExprKind::Literal(Literal::Int(2)) => Ok(JsxVersion::V2),
        ExprKind::Literal(Literal::Int(3)) => Ok(JsxVersion::V3),
        other => Err(RewriteError::new(
            RewriteErrorKind::InvalidVersionNumber {
                found: render_value(other),
            },
            value.span,
        )),
    }
}

fn render_value(kind: &ExprKind) -> SmolStr {
    match kind {
        ExprKind::Literal(Literal::Int(n)) => SmolStr::new(n.to_string()),
        ExprKind::Literal(Literal::Str(s)) => SmolStr::new(format!("\"{s}\"")),
        _ => SmolStr::new("a non-integer value"),
    }
}
