// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `check` command.
//!
//! Evaluates the guard for a path, then replays the decision against an
//! in-memory history to show where the session would land.

use std::sync::Arc;

use serde::Serialize;
use sitegate_config::SiteGateConfig;
use sitegate_core::{
    GuardDecision, GuardOutcome, MemoryHistory, Session, TransitionNavigator, TransitionOutcome,
    User,
};

use crate::cli::{CheckArgs, Cli, OutputFormat};
use crate::error::{BinError, BinResult};

/// The result of a guard check.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Requested path.
    pub path: String,
    /// Evaluated session.
    pub session: Session,
    /// Whether the path needs a session at all.
    pub protected: bool,
    /// Most specific route rule covering the path.
    pub rule: Option<String>,
    /// Guard decision.
    pub decision: GuardDecision,
    /// How the redirect would be carried out, if there is one.
    pub transition: Option<TransitionOutcome>,
    /// Path the session would end up on.
    pub lands_on: String,
}

/// Executes the `check` command.
pub fn check(cli: &Cli, args: CheckArgs) -> BinResult<()> {
    let config = super::load_config(cli)?;
    let report = evaluate(&config, &args)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|e| BinError::runtime(format!("Failed to render JSON: {}", e)))?;
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn session_for(args: &CheckArgs) -> Session {
    if args.loading {
        Session::loading()
    } else if args.anonymous {
        Session::anonymous()
    } else {
        match &args.role {
            Some(role) => Session::authenticated(User::new(role.as_str()).with_id("cli")),
            None => Session::anonymous(),
        }
    }
}

fn evaluate(config: &SiteGateConfig, args: &CheckArgs) -> BinResult<CheckReport> {
    if !args.path.starts_with('/') {
        return Err(BinError::usage(format!(
            "path must start with '/': {}",
            args.path
        )));
    }

    let policy = config.access_policy()?;
    let session = session_for(args);
    let guard = policy.guard_for(&args.path);
    let decision = guard.evaluate(&session);

    let history = Arc::new(MemoryHistory::new(args.path.clone()));
    let navigator = TransitionNavigator::immediate(history);
    let transition = navigator.follow(&decision);

    Ok(CheckReport {
        path: args.path.clone(),
        protected: guard.is_protected(),
        rule: policy.rule_for(&args.path).map(|rule| rule.path.clone()),
        lands_on: navigator.current_path(),
        session,
        decision,
        transition,
    })
}

fn render_text(report: &CheckReport) -> String {
    let session = if report.session.loading {
        "loading".to_string()
    } else if report.session.is_authenticated {
        format!("authenticated (role: {})", report.session.role())
    } else {
        "unauthenticated".to_string()
    };

    let outcome = match &report.decision.outcome {
        GuardOutcome::Render => "render".to_string(),
        GuardOutcome::Placeholder => "placeholder".to_string(),
        GuardOutcome::Redirect(request) => format!(
            "redirect to {}{}",
            request.target_path,
            if request.replace { " (replace)" } else { "" }
        ),
    };

    let mut out = String::new();
    out.push_str(&format!("Path:      {}\n", report.path));
    out.push_str(&format!("Session:   {}\n", session));
    out.push_str(&format!(
        "Rule:      {}\n",
        report.rule.as_deref().unwrap_or(if report.protected {
            "(authentication only)"
        } else {
            "(public)"
        })
    ));
    out.push_str(&format!("State:     {}\n", report.decision.state));
    out.push_str(&format!("Outcome:   {}\n", outcome));
    out.push_str(&format!("Lands on:  {}\n", report.lands_on));
    out
}
