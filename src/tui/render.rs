//! Main rendering logic for TUI.

use std::io;

use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use super::event::SharedPrompt;
use super::style::Styles;
use crate::collector::CpuId;
use crate::fmt::{normalize_query, truncate};
use crate::models::DiskMetric;
use crate::scheduler::{DisplaySink, Frame};
use crate::view::TableViewModel;

/// Column width of the block-device table.
const DISK_COLUMN_WIDTH: u16 = 9;

/// [`DisplaySink`] drawing on a ratatui terminal.
///
/// Keeps the last frame so a status message or prompt change repaints the
/// screen without new data.
pub struct TuiSink<B: Backend> {
    terminal: Terminal<B>,
    prompt: SharedPrompt,
    status: String,
    last: Option<Frame>,
}

impl<B: Backend> TuiSink<B> {
    pub fn new(terminal: Terminal<B>, prompt: SharedPrompt) -> Self {
        Self {
            terminal,
            prompt,
            status: String::new(),
            last: None,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn draw(&mut self) -> io::Result<()> {
        let Some(frame) = self.last.as_ref() else {
            return Ok(());
        };
        let prompt = self.prompt.lock().ok().and_then(|p| p.clone());
        let status = self.status.as_str();
        self.terminal
            .draw(|f| render(f, frame, status, prompt.as_deref()))?;
        Ok(())
    }
}

impl<B: Backend> DisplaySink for TuiSink<B> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        self.last = Some(frame.clone());
        self.draw()
    }

    fn status(&mut self, message: &str) -> io::Result<()> {
        self.status = message.to_string();
        self.draw()
    }
}

/// Main render function.
fn render(f: &mut ratatui::Frame, frame: &Frame, status: &str, prompt: Option<&str>) {
    let disk_height = frame.disks.len().max(1) as u16 + 1;
    let chunks = Layout::vertical([
        Constraint::Length(1),           // Clock, view, interval
        Constraint::Length(1),           // Session summary
        Constraint::Length(1),           // CPU
        Constraint::Length(disk_height), // Block devices
        Constraint::Length(1),           // Status or prompt
        Constraint::Min(3),              // Statistics view
    ])
    .split(f.area());

    f.render_widget(Paragraph::new(header_line(frame)).style(Styles::header()), chunks[0]);
    let activity = frame.activity.map(|a| a.to_string()).unwrap_or_default();
    f.render_widget(Paragraph::new(activity), chunks[1]);
    f.render_widget(Paragraph::new(cpu_line(frame)).style(Styles::cpu()), chunks[2]);
    render_disks(f, chunks[3], &frame.disks);

    let bottom = match prompt {
        Some(p) => Line::from(Span::styled(p.to_string(), Styles::prompt())),
        None => Line::from(Span::styled(status.to_string(), Styles::status())),
    };
    f.render_widget(Paragraph::new(bottom), chunks[4]);

    render_table(f, chunks[5], &frame.table);
}

/// `pgtop: 2024-01-01 12:00:00, view: pg_stat_database, refresh: 1s`
pub(crate) fn header_line(frame: &Frame) -> String {
    format!(
        "pgtop: {}, view: {}, refresh: {}s",
        frame.wall_time.format("%Y-%m-%d %H:%M:%S"),
        frame.view,
        frame.interval.as_secs()
    )
}

/// Aggregate CPU line, or a placeholder until the first diff.
pub(crate) fn cpu_line(frame: &Frame) -> String {
    match frame.cpu.iter().find(|c| c.cpu == CpuId::All) {
        Some(cpu) => format!("cpu {}", cpu),
        None => "cpu collecting...".to_string(),
    }
}

fn render_disks(f: &mut ratatui::Frame, area: Rect, disks: &[DiskMetric]) {
    let header = Row::new(DiskMetric::HEADERS.iter().map(|h| Span::raw(*h))).style(Styles::table_header());
    let rows: Vec<Row> = disks.iter().map(|d| Row::new(d.cells())).collect();
    let widths = vec![Constraint::Length(DISK_COLUMN_WIDTH); DiskMetric::HEADERS.len()];
    f.render_widget(Table::new(rows, widths).header(header).style(Styles::disk()), area);
}

fn render_table(f: &mut ratatui::Frame, area: Rect, model: &TableViewModel) {
    let block = Block::default()
        .title(format!(" {} [{} rows] ", model.title, model.rows.len()))
        .borders(Borders::TOP)
        .style(Styles::default());

    if model.headers.is_empty() {
        f.render_widget(Paragraph::new("collecting...").style(Styles::dim()).block(block), area);
        return;
    }

    let header = Row::new((0..model.headers.len()).map(|i| {
        let style = if model.sort_column == Some(i) {
            Styles::sorted_header()
        } else {
            Styles::table_header()
        };
        Span::styled(model.header_label(i), style)
    }))
    .height(1);

    let rows: Vec<Row> = model
        .rows
        .iter()
        .map(|row| {
            Row::new(
                row.iter()
                    .zip(&model.widths)
                    .map(|(cell, w)| truncate(&normalize_query(&cell.to_string()), *w)),
            )
        })
        .collect();
    let widths: Vec<Constraint> = model.widths.iter().map(|w| Constraint::Length(*w as u16)).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}
