use folio_core::{DisplayWindow, IndexPoint, MovingAverage, StatisticsEngine, Timeframe};
use serde::Serialize;

use crate::cli::IndexArgs;
use crate::error::CliError;

use super::{parse_periods, CommandResult, Session};

#[derive(Debug, Serialize)]
struct IndexResponseData {
    timeframe: Timeframe,
    window: DisplayWindow,
    points: Vec<IndexPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    moving_averages: Vec<MovingAverage>,
}

pub fn run(args: &IndexArgs, session: &Session) -> Result<CommandResult, CliError> {
    let periods = match args.sma.as_deref() {
        Some(raw) => parse_periods(raw)?,
        None => Vec::new(),
    };

    let index = session.build_index();
    let engine = StatisticsEngine::new();
    let moving_averages = periods
        .iter()
        .map(|&period| engine.simple_moving_average(&index, period, &session.window))
        .collect();

    let points = index.clip(&session.window).to_vec();
    let empty = points.is_empty();
    let data = serde_json::to_value(IndexResponseData {
        timeframe: session.timeframe,
        window: session.window,
        points,
        moving_averages,
    })?;

    let result = CommandResult::ok(data).with_warnings(session.warnings.clone());
    if empty {
        return Ok(result.with_warning("index has no points inside the display window"));
    }
    Ok(result)
}
