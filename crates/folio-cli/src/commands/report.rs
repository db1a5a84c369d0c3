use folio_core::{Analysis, AnalysisRequest, Ticker};

use crate::error::CliError;

use super::{CommandResult, Session};

pub fn run(comparisons: &[Ticker], session: &Session) -> Result<CommandResult, CliError> {
    let request = AnalysisRequest::new(session.window)
        .with_comparisons(comparisons.to_vec())
        .with_sma_periods(session.settings.engine.statistics.sma_periods.clone());
    let report = Analysis::new(session.settings.engine.clone()).run(
        &session.store,
        &session.basket,
        &request,
    );

    let empty = report.windowed.is_empty();
    let data = serde_json::to_value(report)?;

    let result = CommandResult::ok(data).with_warnings(session.warnings.clone());
    if empty {
        return Ok(result.with_warning("index has no points inside the display window"));
    }
    Ok(result)
}
