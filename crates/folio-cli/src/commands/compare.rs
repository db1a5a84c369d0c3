use folio_core::{
    ComparisonNormalizer, DisplayWindow, IndexPoint, NormalizedSeries, Ticker,
};
use serde::Serialize;

use crate::error::CliError;

use super::{CommandResult, Session};

#[derive(Debug, Serialize)]
struct CompareResponseData {
    window: DisplayWindow,
    index: Vec<IndexPoint>,
    comparisons: Vec<NormalizedSeries>,
}

pub fn run(tickers: &[Ticker], session: &Session) -> Result<CommandResult, CliError> {
    let index = session.build_index();
    let comparisons =
        ComparisonNormalizer::new(&session.store).normalize_all(&index, tickers, &session.window);

    let skipped: Vec<String> = tickers
        .iter()
        .filter(|ticker| !comparisons.iter().any(|series| &series.ticker == *ticker))
        .map(|ticker| format!("{ticker}: no comparable closes inside the display window"))
        .collect();

    let data = serde_json::to_value(CompareResponseData {
        window: session.window,
        index: index.clip(&session.window).to_vec(),
        comparisons,
    })?;

    Ok(CommandResult::ok(data)
        .with_warnings(session.warnings.clone())
        .with_warnings(skipped))
}
