//! Console alert rendering

use super::AlertSink;
use crate::momentum::{Alert, NewHighVolume, PriceSpike, VolumeClimber};
use crate::snapshot::Snapshot;
use std::io::{self, Write};

const RULE_WIDTH: usize = 80;
const SECTION_WIDTH: usize = 60;

/// Prints the top alerts of each kind as a text table
pub struct ConsoleSink<W: Write = io::Stdout> {
    out: W,
    top_n: usize,
}

impl ConsoleSink<io::Stdout> {
    /// Render to stdout
    pub fn stdout(top_n: usize) -> Self {
        Self::new(io::stdout(), top_n)
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Render to an arbitrary writer
    pub fn new(out: W, top_n: usize) -> Self {
        Self { out, top_n }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, alerts: &[Alert], snapshot: &Snapshot) -> io::Result<()> {
        let climbers: Vec<&VolumeClimber> = alerts
            .iter()
            .filter_map(|a| match a {
                Alert::VolumeClimber(c) => Some(c),
                _ => None,
            })
            .collect();
        let newcomers: Vec<&NewHighVolume> = alerts
            .iter()
            .filter_map(|a| match a {
                Alert::NewHighVolume(n) => Some(n),
                _ => None,
            })
            .collect();
        let spikes: Vec<&PriceSpike> = alerts
            .iter()
            .filter_map(|a| match a {
                Alert::PriceSpike(s) => Some(s),
                _ => None,
            })
            .collect();

        let rule = "=".repeat(RULE_WIDTH);
        let section = "-".repeat(SECTION_WIDTH);

        writeln!(self.out)?;
        writeln!(self.out, "{rule}")?;
        writeln!(
            self.out,
            "MOMENTUM ALERTS - {} ({} tickers)",
            snapshot.timestamp.format("%H:%M:%S"),
            snapshot.len()
        )?;
        writeln!(self.out, "{rule}")?;

        if !climbers.is_empty() {
            writeln!(self.out, "\nVOLUME CLIMBERS ({} found):", climbers.len())?;
            writeln!(self.out, "{section}")?;
            for c in climbers.iter().take(self.top_n) {
                writeln!(
                    self.out,
                    "  {:6} | Rank: {:3} -> {:3} (+{:2}) | Vol: {:>12} | ${:6.2} ({:+5.1}%) | {}",
                    c.ticker,
                    c.previous_rank,
                    c.current_rank,
                    c.rank_delta,
                    format_volume(c.volume),
                    c.price,
                    c.change_pct,
                    c.sector
                )?;
            }
        }

        if !newcomers.is_empty() {
            writeln!(self.out, "\nNEW HIGH VOLUME ({} found):", newcomers.len())?;
            writeln!(self.out, "{section}")?;
            for n in newcomers.iter().take(self.top_n) {
                writeln!(
                    self.out,
                    "  {:6} | NEW -> Rank {:3} | Vol: {:>12} | ${:6.2} ({:+5.1}%) | {}",
                    n.ticker,
                    n.current_rank,
                    format_volume(n.volume),
                    n.price,
                    n.change_pct,
                    n.sector
                )?;
            }
        }

        if !spikes.is_empty() {
            writeln!(self.out, "\nPRICE SPIKES ({} found):", spikes.len())?;
            writeln!(self.out, "{section}")?;
            for s in spikes.iter().take(self.top_n) {
                let rel_vol = s
                    .relative_volume
                    .map(|r| format!("{r:4.1}x"))
                    .unwrap_or_else(|| "  n/a".to_string());
                writeln!(
                    self.out,
                    "  {:6} | ${:6.2} ({:+5.1}%) | Vol: {:>12} | RelVol: {} | {}",
                    s.ticker,
                    s.price,
                    s.change_pct,
                    format_volume(s.volume),
                    rel_vol,
                    s.sector
                )?;
            }
        }

        if alerts.is_empty() {
            writeln!(self.out, "\nNo significant momentum detected this cycle.")?;
        }

        writeln!(self.out, "{rule}")?;
        self.out.flush()
    }
}

impl<W: Write + Send> AlertSink for ConsoleSink<W> {
    fn emit(&mut self, alerts: &[Alert], snapshot: &Snapshot) -> anyhow::Result<()> {
        self.render(alerts, snapshot)?;
        Ok(())
    }
}

/// Whole-number volume with thousands separators
fn format_volume(volume: f64) -> String {
    if !volume.is_finite() {
        return volume.to_string();
    }

    let digits = format!("{:.0}", volume.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if volume < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
