//! Configuration change validation.
//!
//! ## Pipeline (in order):
//! 1. Resolve override flags (unknown flag is a hard failure)
//! 2. Decode the current revision (schema failure is a hard failure, no diff)
//! 3. Diff the previous revision against the current one
//! 4. Scope validation (skipped for an empty diff)
//! 5. Document checks on the decoded current revision
//! 6. Account deletion, then the change-policy catalog
//!
//! Policy violations are not errors: they are collected into the report and
//! decide its [`Verdict`]. Errors are reserved for input the guard cannot
//! judge at all.

use lzguard_core::checks::run_document_checks;
use lzguard_core::diff::{compute_diff, render_human_summary, DiffEntry};
use lzguard_core::errors::{GuardError, LzError};
use lzguard_core::guard::catalog::select;
use lzguard_core::guard::{evaluate, prior_account_names, PathPredicate, RuleGroup, Violation};
use lzguard_core::landing_zone::decode_accelerator_config;
use lzguard_core::options::GuardOptions;
use lzguard_core::scope::validate_scope;
use lzguard_core::value::ConfigValue;
use lzguard_core::{log_op_end, log_op_error, log_op_start};
use lzguard_core_types::{RequestContext, RequestId};
use serde::Serialize;
use serde_json::Value;

use super::document::document_digest;
use crate::Result;

/// Outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// No violations; the deployment may proceed
    Accepted,
    /// At least one violation; a configuration fix is required
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accepted => "Accepted",
            Verdict::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a caller needs to act on a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub request_id: RequestId,
    pub verdict: Verdict,
    /// Scope, document-check, account-deletion and catalog violations, in that order
    pub violations: Vec<Violation>,
    pub diff: Vec<DiffEntry>,
    /// Current revision after decoding, with defaults filled in
    pub decoded: ConfigValue,
    /// SHA256 of the canonical previous document
    pub previous_digest: String,
    /// SHA256 of the canonical current document
    pub current_digest: String,
}

impl ValidationReport {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// Violation messages in report order
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Human-readable rendering of the diff for review output
    pub fn diff_summary(&self) -> String {
        render_human_summary(&self.diff)
    }
}

/// Validate `current` against `previous` with default options.
///
/// ## Errors
///
/// - `DecodeFailed`: `current` does not conform to the landing-zone schema
pub fn validate_change(
    previous: &Value,
    current: &Value,
    catalog: &[PathPredicate],
) -> Result<ValidationReport> {
    validate_change_with(
        previous,
        current,
        catalog,
        &GuardOptions::default(),
        &RequestContext::new(),
    )
}

/// Validate `current` against `previous` under `options`.
///
/// Both documents are diffed as parsed, so fields the schema would default
/// never show up as additions. Only `current` is decoded; `previous` may
/// predate the current schema.
///
/// ## Errors
///
/// - `InvalidOptions`: an override flag is unknown
/// - `DecodeFailed`: `current` does not conform to the landing-zone schema
/// - `MissingScopeTargets`: `ACCOUNT` or `OU` scope without targets
pub fn validate_change_with(
    previous: &Value,
    current: &Value,
    catalog: &[PathPredicate],
    options: &GuardOptions,
    ctx: &RequestContext,
) -> Result<ValidationReport> {
    log_op_start!(
        "validate_change",
        request_id = ctx.request_id.as_str(),
        trace_id = ctx.trace_str(),
        scope = options.scope.as_str()
    );
    let start = std::time::Instant::now();

    let report = validate_change_impl(previous, current, catalog, options, ctx).map_err(|e| {
        let field_error_count = match &e {
            GuardError::Decode(decode) => decode.errors.len(),
            _ => 0,
        };
        log_op_error!(
            "validate_change",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            field_error_count = field_error_count
        );
        with_context(e, ctx)
    })?;

    log_op_end!(
        "validate_change",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        diff_len = report.diff.len(),
        violation_count = report.violations.len(),
        verdict = report.verdict.as_str()
    );

    Ok(report)
}

fn with_context(err: GuardError, ctx: &RequestContext) -> LzError {
    let err = LzError::from(err)
        .with_op("validate_change")
        .with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}

fn validate_change_impl(
    previous: &Value,
    current: &Value,
    catalog: &[PathPredicate],
    options: &GuardOptions,
    ctx: &RequestContext,
) -> std::result::Result<ValidationReport, GuardError> {
    let overrides = options.resolve_overrides()?;
    let decoded = decode_accelerator_config(current)?;

    let previous_tree = ConfigValue::from_json(previous);
    let current_tree = ConfigValue::from_json(current);
    let diff = compute_diff(&previous_tree, &current_tree);
    tracing::debug!(diff_len = diff.len(), "Computed config diff");

    let mut violations = Vec::new();
    if !diff.is_empty() {
        violations.extend(validate_scope(options, &diff)?);
    }
    violations.extend(run_document_checks(&decoded, &diff, options, &overrides));

    let account_names = if overrides.suppresses(RuleGroup::DeleteAccounts) {
        Vec::new()
    } else {
        prior_account_names(&previous_tree)
    };
    let predicates = select(catalog, &overrides);
    violations.extend(evaluate(&predicates, &diff, &account_names));

    let verdict = if violations.is_empty() {
        Verdict::Accepted
    } else {
        Verdict::Rejected
    };

    Ok(ValidationReport {
        request_id: ctx.request_id.clone(),
        verdict,
        violations,
        diff,
        decoded,
        previous_digest: document_digest(previous),
        current_digest: document_digest(current),
    })
}
