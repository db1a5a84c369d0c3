use folio_core::StatisticsEngine;

use crate::error::CliError;

use super::{CommandResult, Session};

pub fn run(session: &Session) -> Result<CommandResult, CliError> {
    let index = session.build_index();
    let summary = StatisticsEngine::new().summarize(
        &index,
        &session.store,
        &session.basket,
        &session.window,
        &session.settings.engine.statistics.sma_periods,
    );

    let missing_return = summary.return_pct.is_none();
    let data = serde_json::to_value(summary)?;

    let result = CommandResult::ok(data).with_warnings(session.warnings.clone());
    if missing_return {
        return Ok(result.with_warning("window return is undefined without in-window index points"));
    }
    Ok(result)
}
