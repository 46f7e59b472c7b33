use crate::infra::{
    parse_date, parse_timestamp, read_source, InMemoryDeadlineStateStore,
    InMemoryNotificationQueue,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Args;
use filing_control::config::AppConfig;
use filing_control::engine::{evaluate_compliance, ComplianceResult, EntityProfile, QUESTIONS};
use filing_control::error::AppError;
use filing_control::filings::{
    compute_obligations, create_assessment_snapshot, AssessmentSnapshot, FilingInput, Obligation,
    DEADLINE_ENGINE_VERSION,
};
use filing_control::monitoring::{
    compute_notification_events, DeadlineImporter, DeadlineState, MonitorRunSummary,
    MonitorService, NotificationEvent,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Questionnaire answers as JSON, keyed by question id (`-` reads stdin)
    #[arg(long)]
    pub(crate) profile: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ObligationsArgs {
    /// Filing questionnaire JSON (`-` reads stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Filing questionnaire JSON (`-` reads stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Timestamp recorded on the deadline schedule (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) computed_at: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct NotifyArgs {
    #[arg(long)]
    pub(crate) entity_id: String,
    /// Form of the tracked deadline
    #[arg(long)]
    pub(crate) form: String,
    /// Due date of the tracked deadline (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) due_date: NaiveDate,
    /// Days remaining at the new observation
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) next_days: i64,
    /// Days remaining at the previous observation; omit for a first observation
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) prev_days: Option<i64>,
    #[arg(long, default_value = DEADLINE_ENGINE_VERSION)]
    pub(crate) engine_version: String,
}

#[derive(Args, Debug)]
pub(crate) struct MonitorArgs {
    /// Deadline export CSV (entity_id,form,due_date[,engine_version,basis])
    #[arg(long)]
    pub(crate) deadlines: PathBuf,
    /// JSON file holding the last observed state per entity
    #[arg(long)]
    pub(crate) state: Option<PathBuf>,
    /// Write the updated states back to `--state`
    #[arg(long, requires = "state")]
    pub(crate) write_state: bool,
    /// Observation date (YYYY-MM-DD). Defaults to FC_REFERENCE_DATE, then today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_questions(json: bool) -> Result<(), AppError> {
    emit(json, &QUESTIONS, || {
        QUESTIONS
            .iter()
            .map(|question| format!("{:<28} {}", question.id, question.text))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

pub(crate) fn run_evaluate(args: EvaluateArgs, json: bool) -> Result<(), AppError> {
    let result = evaluate_answers(&read_source(&args.profile)?)?;
    info!(
        risk_score = result.risk_score,
        risk_level = result.risk_level.label(),
        forms = result.required_forms.len(),
        "compliance evaluated"
    );
    emit(json, &result, || render_compliance(&result))
}

pub(crate) fn run_obligations(args: ObligationsArgs, json: bool) -> Result<(), AppError> {
    let input: FilingInput = serde_json::from_str(&read_source(&args.input)?)?;
    let obligations = compute_obligations(&input);
    emit(json, &obligations, || render_obligations(&obligations))
}

pub(crate) fn run_assess(args: AssessArgs, json: bool) -> Result<(), AppError> {
    let input: FilingInput = serde_json::from_str(&read_source(&args.input)?)?;
    let computed_at = args.computed_at.unwrap_or_else(Utc::now);
    let snapshot = create_assessment_snapshot(&input, computed_at);
    info!(
        tax_year = snapshot.deadlines.tax_year,
        deadlines = snapshot.deadlines.deadlines.len(),
        "assessment snapshot created"
    );
    emit(json, &snapshot, || render_assessment(&snapshot))
}

pub(crate) fn run_notify(args: NotifyArgs, json: bool) -> Result<(), AppError> {
    let events = notify_events(&args);
    emit(json, &events, || render_events(&events))
}

pub(crate) fn run_monitor(
    args: MonitorArgs,
    config: &AppConfig,
    json: bool,
) -> Result<(), AppError> {
    let today = args
        .today
        .or(config.monitor.reference_date)
        .unwrap_or_else(|| Local::now().date_naive());

    let entities = DeadlineImporter::from_path(&args.deadlines)?;
    let states = Arc::new(match &args.state {
        Some(path) => InMemoryDeadlineStateStore::load(path)?,
        None => InMemoryDeadlineStateStore::default(),
    });
    let queue = Arc::new(InMemoryNotificationQueue::default());

    let service = MonitorService::new(states.clone(), queue);
    let summary = service.run(&entities, today);

    if let (true, Some(path)) = (args.write_state, &args.state) {
        std::fs::write(path, states.to_json()?)?;
        info!(path = %path.display(), "deadline states written");
    }

    emit(json, &summary, || render_monitor_summary(&summary, today))
}

fn emit<T, F>(json: bool, value: &T, text: F) -> Result<(), AppError>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn evaluate_answers(raw: &str) -> Result<ComplianceResult, AppError> {
    let answers: BTreeMap<String, bool> = serde_json::from_str(raw)?;
    let profile = EntityProfile::from_answers(&answers)?;
    Ok(evaluate_compliance(&profile))
}

fn notify_events(args: &NotifyArgs) -> Vec<NotificationEvent> {
    let state = |days: i64| {
        DeadlineState::derive(
            days,
            args.form.as_str(),
            args.due_date,
            args.engine_version.as_str(),
        )
    };

    let prev = args.prev_days.map(state);
    let next = state(args.next_days);
    compute_notification_events(prev.as_ref(), &next, &args.entity_id)
}

fn render_compliance(result: &ComplianceResult) -> String {
    let mut lines = vec![
        format!("Entity classification: {}", result.entity_classification),
        format!(
            "Risk: {} ({})",
            result.risk_score,
            result.risk_level.label()
        ),
    ];

    if result.required_forms.is_empty() {
        lines.push("Required forms: none".to_string());
    } else {
        lines.push("Required forms:".to_string());
        lines.extend(result.required_forms.iter().map(|form| format!("  - {form}")));
    }

    for penalty in &result.penalties {
        lines.push(format!(
            "Penalty: {} {} per failure ({}; {})",
            penalty.currency, penalty.amount, penalty.description, penalty.citation
        ));
    }
    for (currency, total) in result.penalty_exposure() {
        lines.push(format!("Penalty exposure: {currency} {total}"));
    }

    if !result.legal_basis.is_empty() {
        lines.push(format!("Legal basis: {}", result.legal_basis.join(", ")));
    }
    lines.push(format!("Engine version: {}", result.version));
    lines.join("\n")
}

fn render_obligations(obligations: &[Obligation]) -> String {
    obligations
        .iter()
        .enumerate()
        .map(|(index, obligation)| {
            let form = obligation
                .form
                .as_deref()
                .map(|form| format!(" [{form}]"))
                .unwrap_or_default();
            format!(
                "{}. {}{}\n   {}\n   {}",
                index + 1,
                obligation.title,
                form,
                obligation.authority,
                obligation.explanation
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_assessment(snapshot: &AssessmentSnapshot) -> String {
    let mut lines = vec![
        format!(
            "{} | foreign owned: {} | tax year {}",
            snapshot.entity_profile.entity_type.label(),
            snapshot.entity_profile.foreign_owned,
            snapshot.deadlines.tax_year
        ),
        String::new(),
        "Obligations".to_string(),
        render_obligations(&snapshot.obligations),
        String::new(),
    ];

    if snapshot.deadlines.deadlines.is_empty() {
        lines.push("Deadlines: none".to_string());
    } else {
        lines.push("Deadlines".to_string());
        lines.extend(snapshot.deadlines.deadlines.iter().map(|deadline| {
            format!(
                "  - {}: {} ({})",
                deadline.form, deadline.due_date, deadline.basis
            )
        }));
    }
    lines.push(format!(
        "Deadline engine {} at {}",
        snapshot.deadlines.engine_version,
        snapshot.deadlines.computed_at.to_rfc3339()
    ));
    lines.join("\n")
}

fn render_events(events: &[NotificationEvent]) -> String {
    if events.is_empty() {
        return "No notification events.".to_string();
    }

    events
        .iter()
        .map(|event| {
            let previous = event
                .payload
                .previous_status
                .map(|status| format!(" (was {status})"))
                .unwrap_or_default();
            format!(
                "{:<15} {} | {} days | {} / {}{}",
                event.event_type.as_str(),
                event.event_key,
                event.payload.days_remaining,
                event.payload.status,
                event.payload.urgency,
                previous
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_monitor_summary(summary: &MonitorRunSummary, today: NaiveDate) -> String {
    let mut lines = vec![
        format!("Monitor run for {today}"),
        format!(
            "- {} entities | {} states updated | {} without deadlines | {} failed",
            summary.processed_entities,
            summary.updated_states,
            summary.skipped_no_deadlines,
            summary.failed_entities
        ),
        format!(
            "- {} events created | {} duplicates skipped | {} enqueue failures",
            summary.created_events, summary.skipped_duplicates, summary.failed_events
        ),
    ];

    if !summary.events.is_empty() {
        lines.push(render_events(&summary.events));
    }
    lines.join("\n")
}
