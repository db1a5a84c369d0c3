use folio_core::{CorrelationEngine, CorrelationResult, DisplayWindow, Ticker};
use serde::Serialize;

use crate::cli::CorrelateArgs;
use crate::error::CliError;

use super::{CommandResult, Session};

#[derive(Debug, Serialize)]
struct CorrelateResponseData<'a> {
    window: DisplayWindow,
    candidates: usize,
    correlations: &'a [CorrelationResult],
}

pub fn run(
    args: &CorrelateArgs,
    extra: &[Ticker],
    session: &Session,
) -> Result<CommandResult, CliError> {
    let index = session.build_index();
    let engine =
        CorrelationEngine::with_config(&session.store, session.settings.engine.correlation.clone());
    let candidates = engine.candidates(&session.basket, extra);
    let ranking = engine.rank(&index, &candidates, &session.window);

    let correlations = match args.top {
        Some(n) => ranking.top(n),
        None => ranking.results(),
    };
    let data = serde_json::to_value(CorrelateResponseData {
        window: session.window,
        candidates: candidates.len(),
        correlations,
    })?;

    let result = CommandResult::ok(data).with_warnings(session.warnings.clone());
    if ranking.is_empty() {
        return Ok(result.with_warning("no candidate has enough overlapping returns"));
    }
    Ok(result)
}
