//! CLI command implementations
//!
//! Every command follows the same boot sequence:
//! 1. Configuration load (file, then flag overrides)
//! 2. Log level applied
//! 3. Knowledge base load (fatal on failure)
//! 4. Engine construction (empty knowledge bases are flagged, not rejected)

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::engine::{Engine, Interview, Session};
use crate::inference::FactStore;
use crate::knowledge::KnowledgeLoader;
use crate::observability::{log_event_with_fields, warn_event, Event, Logger};

use super::args::{Command, Source};
use super::config::Config;
use super::errors::{CliError, CliResult, ProtocolError};
use super::io::{prompt_line, read_document, read_requests, write_error, write_response, write_text};
use super::protocol::Request;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check { source, normalize } => check(&source, normalize.as_deref()),
        Command::Interview {
            source,
            threshold,
            initial_batch,
            batch_size,
        } => {
            let mut config = Config::resolve(&source)?;
            if let Some(threshold) = threshold {
                config.diagnosis_threshold = threshold;
            }
            if let Some(initial_batch) = initial_batch {
                config.initial_batch = initial_batch;
            }
            if let Some(batch_size) = batch_size {
                config.batch_size = batch_size;
            }
            config.validate()?;
            interview(&config)
        }
        Command::Diagnose { source, threshold } => {
            let mut config = Config::resolve(&source)?;
            if let Some(threshold) = threshold {
                config.diagnosis_threshold = threshold;
            }
            config.validate()?;
            diagnose(&config)
        }
        Command::Serve { source } => serve(&Config::resolve(&source)?),
    }
}

/// Applies the configured log level and loads the engine
pub fn boot(config: &Config) -> CliResult<Arc<Engine>> {
    Logger::set_min_severity(config.severity()?);
    let engine = Engine::load(config.knowledge_path()?)?;
    Ok(Arc::new(engine))
}

/// Load a knowledge base and report what it contains.
///
/// With `normalize`, the loaded document is also written to that path
/// using the English field names.
pub fn check(source: &Source, normalize: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(source)?;
    let engine = boot(&config)?;

    let mut data = report(&engine);
    if let Some(out) = normalize {
        normalize_to(&engine, out)?;
        data["normalized"] = json!(out.display().to_string());
    }

    write_response(data, engine.load_warnings())
}

/// Writes the engine's knowledge base to `out`
pub fn normalize_to(engine: &Engine, out: &Path) -> CliResult<()> {
    KnowledgeLoader::new(out).save(engine.knowledge())?;
    Ok(())
}

/// Summary of a loaded knowledge base
pub fn report(engine: &Engine) -> Value {
    let kb = engine.knowledge();

    let importance: Vec<Value> = engine
        .importance()
        .ranked()
        .into_iter()
        .map(|(code, score)| json!({"code": code, "importance": score}))
        .collect();

    let unknown_references: Vec<Value> = kb
        .unknown_references()
        .into_iter()
        .map(|(outcome, code)| json!({"outcome": outcome, "code": code}))
        .collect();

    json!({
        "predicates": kb.predicate_count(),
        "rules": kb.rule_count(),
        "outcomes": kb.outcomes().collect::<Vec<_>>(),
        "importance": importance,
        "unknown_references": unknown_references
    })
}

/// Interactive yes/no interview on stdin/stdout
///
/// Ends when no discriminating question remains or input runs out, then
/// prints diagnoses and the explanation of the leading outcome.
pub fn interview(config: &Config) -> CliResult<()> {
    let engine = boot(config)?;
    let mut interview = Interview::new(engine.session(), config.interview());

    for warning in engine.load_warnings() {
        write_text(&warning.to_string())?;
    }

    while let Some(question) = interview.current_question() {
        let progress = interview.progress();
        let prompt = format!(
            "[{}/{}] {}? [y/n] ",
            progress.answered + 1,
            progress.total,
            question.description
        );

        let Some(line) = prompt_line(&prompt)? else {
            break;
        };

        match parse_answer(&line) {
            Some(value) => {
                interview.answer(value);
            }
            None => write_text("Please answer y or n.")?,
        }
    }

    let summary = interview.summary(config.diagnosis_threshold);
    write_text("")?;
    write_text(&format!(
        "Answered {} of {} questions.",
        summary.answered, summary.total_predicates
    ))?;

    if summary.diagnoses.is_empty() {
        write_text(&format!(
            "No diagnosis reaches {:.1}%.",
            config.diagnosis_threshold
        ))?;
        return Ok(());
    }

    write_text("Diagnoses:")?;
    for diagnosis in &summary.diagnoses {
        write_text(&format!("  {:>6.1}%  {}", diagnosis.percentage, diagnosis.outcome))?;
    }

    if let Some(best) = &summary.best {
        write_text("")?;
        write_text(&best.to_string())?;
    }

    Ok(())
}

/// Reads a yes/no answer. Accepts English and Spanish forms.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "s" | "si" | "sí" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// One-shot diagnosis of a JSON object of facts read from stdin
pub fn diagnose(config: &Config) -> CliResult<()> {
    let engine = boot(config)?;
    let facts = parse_facts(read_document()?)?;

    let mut session = engine.session();
    let data = diagnose_facts(&mut session, &facts, config.diagnosis_threshold);

    write_response(data, &session.take_warnings())
}

/// Facts document: `{"f1": true, "f2": false}`
pub fn parse_facts(document: Value) -> CliResult<FactStore> {
    serde_json::from_value(document).map_err(|e| {
        CliError::invalid_input(format!("Facts must be an object of booleans: {}", e))
    })
}

/// Records `facts` into `session` and reports diagnoses with explanations
pub fn diagnose_facts(session: &mut Session, facts: &FactStore, threshold: f64) -> Value {
    for (code, value) in facts.iter() {
        session.set_fact(code, value);
    }

    let diagnoses = session.diagnoses(threshold);
    let explainer = session.engine().explainer();
    let explanations: Vec<_> = diagnoses
        .iter()
        .map(|d| explainer.explain(&d.outcome, session.facts()))
        .collect();
    let progress = session.progress();

    json!({
        "threshold": threshold,
        "diagnoses": diagnoses,
        "explanations": explanations,
        "answered": progress.answered,
        "total_predicates": progress.total
    })
}

/// JSON-lines request loop over a single session
///
/// A rejected request gets an error response and the loop continues.
/// An I/O failure on stdin ends the loop.
pub fn serve(config: &Config) -> CliResult<()> {
    let engine = boot(config)?;
    let mut session = engine.session();
    let mut handled = 0usize;

    let session_id = session.id().to_string();
    log_event_with_fields(Event::ServeBegin, &[("session", session_id.as_str())]);

    for line in read_requests() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                write_error(e.code_str(), e.message())?;
                break;
            }
        };
        handled += 1;

        let (op, result) = handle_request(&mut session, &line, config.diagnosis_threshold);

        match result {
            Ok(data) => write_response(data, &session.take_warnings())?,
            Err(e) => {
                let message = e.to_string();
                warn_event(
                    Event::RequestRejected,
                    &[("code", e.code()), ("message", message.as_str()), ("op", op)],
                );
                write_error(e.code(), &message)?;
            }
        }
    }

    let handled = handled.to_string();
    log_event_with_fields(
        Event::ServeEnd,
        &[("requests", handled.as_str()), ("session", session_id.as_str())],
    );

    Ok(())
}

/// Parses and applies one request line.
///
/// Returns the operation name alongside the result; a line that does not
/// parse reports `"unknown"`.
pub fn handle_request(
    session: &mut Session,
    line: &str,
    default_threshold: f64,
) -> (&'static str, Result<Value, ProtocolError>) {
    match Request::parse(line) {
        Ok(request) => (request.op(), request.apply(session, default_threshold)),
        Err(e) => ("unknown", Err(e)),
    }
}
