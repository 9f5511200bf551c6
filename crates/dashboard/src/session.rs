use crate::error::DashboardError;
use crate::render::Renderer;
use analytics::{AnalyticsEngine, DashboardReport, FilterState};
use chrono::NaiveDate;
use core_types::{DateRange, OrderTable};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const PROMPT: &str = "range> ";
const HELP: &str = "\
Commands:
  <start> <end>   select orders approved between two dates (YYYY-MM-DD), inclusive
  reset           select the full date range again
  bounds          show the first and last approval day in the dataset
  help            show this message
  quit | exit     leave the dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Select(DateRange),
    Reset,
    Bounds,
    Help,
    Quit,
    Nothing,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Ok(Command::Nothing),
        ["reset"] => Ok(Command::Reset),
        ["bounds"] => Ok(Command::Bounds),
        ["help"] | ["?"] => Ok(Command::Help),
        ["quit"] | ["exit"] | ["q"] => Ok(Command::Quit),
        [start, end] => Ok(Command::Select(DateRange::new(
            parse_date(start)?,
            parse_date(end)?,
        ))),
        _ => Err(format!("Unrecognised input {:?}. Type 'help' for commands.", line.trim())),
    }
}

fn parse_date(word: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(word, "%Y-%m-%d")
        .map_err(|_| format!("{:?} is not a date in YYYY-MM-DD form", word))
}

/// One user's view of the dashboard: a shared, read-only table plus this
/// session's own date selection.
///
/// Every selection change re-runs the whole aggregation pipeline.
pub struct Session<'a> {
    table: &'a OrderTable,
    renderer: &'a Renderer,
    engine: AnalyticsEngine,
    filter: FilterState,
    top_n: usize,
}

impl<'a> Session<'a> {
    pub fn new(table: &'a OrderTable, renderer: &'a Renderer, top_n: usize) -> Self {
        Self {
            table,
            renderer,
            engine: AnalyticsEngine::new(),
            filter: FilterState::new(table),
            top_n,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Changes the selected range; see `FilterState::set_range`.
    pub fn select(&mut self, range: DateRange) -> Option<DateRange> {
        self.filter.set_range(range)
    }

    /// Aggregates the current selection.
    pub fn refresh(&self) -> Result<DashboardReport, DashboardError> {
        let rows = self.filter.apply(self.table);
        let mut report = self.engine.calculate(rows, self.top_n)?;
        report.range = self.filter.range();
        Ok(report)
    }

    /// Reads commands from `input` until it ends or the user quits, writing a
    /// freshly rendered dashboard after every selection change.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<(), DashboardError> {
        info!(rows = self.table.len(), "Interactive session started");
        writeln!(output, "{}", self.renderer.render(&self.refresh()?))?;
        writeln!(output, "Type 'help' for commands.")?;

        let mut lines = input.lines();
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let line = line?;

            match parse_command(&line) {
                Ok(Command::Select(range)) => {
                    if let Some(effective) = self.select(range).filter(|e| *e != range) {
                        writeln!(output, "Range clamped to {}", effective)?;
                    }
                    writeln!(output, "{}", self.renderer.render(&self.refresh()?))?;
                }
                Ok(Command::Reset) => {
                    self.filter.reset();
                    writeln!(output, "{}", self.renderer.render(&self.refresh()?))?;
                }
                Ok(Command::Bounds) => match self.filter.bounds() {
                    Some(bounds) => writeln!(output, "Approval dates span {}", bounds)?,
                    None => writeln!(output, "The dataset has no approved orders.")?,
                },
                Ok(Command::Help) => writeln!(output, "{}", HELP)?,
                Ok(Command::Quit) => break,
                Ok(Command::Nothing) => {}
                Err(message) => {
                    debug!(%message, "Rejected session input");
                    writeln!(output, "{}", message)?;
                }
            }
        }

        info!("Interactive session ended");
        Ok(())
    }
}
